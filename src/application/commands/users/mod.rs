mod capability;
mod create;
mod delete;
mod install;
mod service;
mod update;

pub use create::CreateUserCommand;
pub use delete::DeleteUserCommand;
pub use install::InstallAdminCommand;
pub use service::{USER_ENTITY, UserCommandService};
pub use update::UpdateUserCommand;
