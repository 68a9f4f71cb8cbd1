mod auth_service;
mod password_service;
mod progress_service;
mod session_refresh;

pub use auth_service::{AuthenticationService, TokenPair};
pub use password_service::PasswordService;
pub use progress_service::ProgressService;
pub use session_refresh::SessionRefreshFlow;
