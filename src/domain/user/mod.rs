// src/domain/user/mod.rs
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewUser, User, UserSnapshot, UserUpdate};
pub use repository::{UserRepository, UserWriter};
pub use value_objects::{Capability, DisplayName, EmailAddress, Role, UserId, Username};
