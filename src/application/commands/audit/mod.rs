mod record;

pub use record::{AuditRecorder, RecordAuditCommand, RecordAuditCommandBuilder};
