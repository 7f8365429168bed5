mod open;

pub use open::{OpenSessionCommand, SessionCommandService};
