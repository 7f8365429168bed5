// src/application/ports/mod.rs
pub mod session;
pub mod time;
pub mod unit_of_work;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type ClockPort = dyn time::Clock;
pub type SessionAuthenticatorPort = dyn session::SessionAuthenticator;
pub type SessionTokensPort = dyn session::SessionTokens;
pub type UnitOfWorkFactoryPort = dyn unit_of_work::UnitOfWorkFactory;
