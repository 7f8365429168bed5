// src/presentation/http/middleware/mod.rs
pub mod request_id;
