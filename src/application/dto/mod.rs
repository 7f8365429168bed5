pub mod audit;
pub mod auth;
pub mod pagination;
pub mod serde_time;
pub mod users;

pub use audit::{
    ActorKind, ActorOptionDto, ActorView, AuditDetailDisplayDto, AuditDetailDto,
    AuditFilterOptions, AuditLogPage, AuditLogView, SnapshotDisplayDto,
};
pub use auth::{AuthenticatedUser, RequestContext, SessionTokenDto};
pub use pagination::CursorPage;
pub use users::UserDto;
