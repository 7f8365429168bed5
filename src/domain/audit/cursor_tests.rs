// src/domain/audit/cursor_tests.rs
use crate::domain::audit::cursor::AuditLogCursor;
use chrono::{Duration, TimeZone, Utc};

#[test]
fn cursor_encode_decode_roundtrip() {
    let created_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap() + Duration::milliseconds(125);
    let c = AuditLogCursor::new(created_at, 42);
    let decoded = AuditLogCursor::decode(&c.encode()).expect("decode should succeed");
    assert_eq!(decoded, c);
}

#[test]
fn cursor_rejects_garbage() {
    assert!(AuditLogCursor::decode("not a cursor!").is_err());
    assert!(AuditLogCursor::decode("bm8tc2VwYXJhdG9y").is_err());
}

#[test]
fn equal_timestamps_fall_back_to_id() {
    let at = Utc::now();
    let cursor = AuditLogCursor::new(at, 10);
    assert!(cursor.precedes(at, 9));
    assert!(!cursor.precedes(at, 10));
    assert!(!cursor.precedes(at + Duration::seconds(1), 1));
    assert!(cursor.precedes(at - Duration::seconds(1), 99));
}
