mod auth_commands;
mod progress_commands;
mod user_commands;

pub use auth_commands::{LoginCommand, LogoutCommand, RefreshSessionCommand};
pub use progress_commands::{AddStoreItemCommand, UpdateProgressCommand};
pub use user_commands::{DeleteUserCommand, RegisterUserCommand, UpdateUserCommand};
