// src/infrastructure/security/mod.rs
pub mod session_store;
pub mod session_token;
