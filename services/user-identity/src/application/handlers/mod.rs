mod auth_handlers;
mod progress_handlers;
mod user_handlers;

pub use auth_handlers::{
    LoginHandler, LogoutHandler, RefreshSessionHandler, ValidateAccessTokenHandler,
};
pub use progress_handlers::{AddStoreItemHandler, UpdateProgressHandler};
pub use user_handlers::{
    DeleteUserHandler, GetUserByIdHandler, RegisterUserHandler, UpdateUserHandler,
};
