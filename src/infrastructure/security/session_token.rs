// src/infrastructure/security/session_token.rs
use crate::application::ports::session::SessionTokens;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Opaque bearer tokens built from two random v4 UUIDs. Only the SHA-256
/// digest of a token is ever persisted.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256SessionTokens;

impl SessionTokens for Sha256SessionTokens {
    fn generate(&self) -> String {
        let mut raw = [0u8; 32];
        raw[..16].copy_from_slice(Uuid::new_v4().as_bytes());
        raw[16..].copy_from_slice(Uuid::new_v4().as_bytes());
        URL_SAFE_NO_PAD.encode(raw)
    }

    fn hash(&self, token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique_and_url_safe() {
        let tokens = Sha256SessionTokens;
        let a = tokens.generate();
        let b = tokens.generate();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn hash_is_stable_hex() {
        let tokens = Sha256SessionTokens;
        let h = tokens.hash("abc");
        assert_eq!(
            h,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(h, tokens.hash("abc"));
    }
}
