// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Wall-clock source for session issuing and expiry checks. Journal
/// timestamps come from the store, not from here.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
