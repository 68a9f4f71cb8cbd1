//! 认证相关命令

use ludo_cqrs_core::Command;

use crate::domain::services::TokenPair;

/// 登录命令
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl Command for LoginCommand {
    type Result = TokenPair;
}

/// 刷新会话命令
#[derive(Debug, Clone)]
pub struct RefreshSessionCommand {
    pub refresh_token: String,
}

impl Command for RefreshSessionCommand {
    type Result = TokenPair;
}

/// 登出命令
#[derive(Debug, Clone)]
pub struct LogoutCommand {
    pub refresh_token: String,
}

impl Command for LogoutCommand {
    type Result = ();
}
