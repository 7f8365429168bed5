// tests/support/mocks/mod.rs
//! テスト用モックの再エクスポート
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod audit;
pub mod security;
pub mod time;
pub mod unit_of_work;
pub mod user_repo;

pub use audit::{FailingOptionsJournal, InMemoryJournal};
pub use security::CountingTokens;
pub use time::{FixedClock, fixed_now};
pub use unit_of_work::InMemoryUnitOfWorkFactory;
pub use user_repo::{FailingUserRepo, InMemoryUsers};
