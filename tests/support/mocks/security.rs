// tests/support/mocks/security.rs
use std::sync::atomic::{AtomicU64, Ordering};
use workshop_core::application::ports::session::SessionTokens;

/// 連番トークンを発行する決定論的な実装
#[derive(Debug, Default)]
pub struct CountingTokens {
    next: AtomicU64,
}

impl SessionTokens for CountingTokens {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("token-{n}")
    }

    fn hash(&self, token: &str) -> String {
        format!("hashed:{token}")
    }
}
