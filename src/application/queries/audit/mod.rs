mod common;
mod detail;
mod filter;
mod list;
mod service;

pub use detail::CANNOT_LOAD_DETAILS;
pub use filter::{RawAuditFilter, parse_filter};
pub use list::ListAuditLogsQuery;
pub use service::AuditQueryService;
