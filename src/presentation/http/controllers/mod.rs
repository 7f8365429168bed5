// src/presentation/http/controllers/mod.rs
pub mod audit;
pub mod sessions;
pub mod system;
pub mod users;
