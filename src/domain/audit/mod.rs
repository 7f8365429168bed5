pub mod cursor;
pub mod entity;
pub mod filter;
pub mod repository;
pub mod snapshot;
pub mod value_objects;

#[cfg(test)]
mod cursor_tests;

pub use cursor::AuditLogCursor;
pub use entity::{AuditLog, NewAuditLog};
pub use filter::AuditLogFilter;
pub use repository::{AuditAppend, AuditLogRepository, JournalActor};
pub use snapshot::{PLACEHOLDER, Snapshot, SnapshotDisplay, decode_for_display, display_field};
pub use value_objects::{AuditAction, AuditActor, AuditLogId, EntityRef};
