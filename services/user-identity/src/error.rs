//! 服务错误定义
//!
//! 凭证/令牌类失败对当前调用都是终态；只有 StoreUnavailable
//! 适合调用方做有界重试。用户不存在与密码错误必须合并成同
//! 一个 InvalidCredentials，避免用户名枚举。

use ludo_auth_core::TokenError;
use ludo_errors::AppError;
use thiserror::Error;

use crate::domain::value_objects::{EmailError, UsernameError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid refresh token")]
    RefreshTokenInvalid,

    #[error("Refresh token reuse detected")]
    RefreshTokenReuse,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Password hash error: {0}")]
    HashError(String),
}

impl AuthError {
    /// 存储层错误统一映射
    pub fn store(err: AppError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::TokenExpired,
            TokenError::Invalid(_) => Self::TokenInvalid,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::unauthorized("Invalid credentials"),
            AuthError::TokenInvalid => AppError::unauthorized("Invalid token"),
            AuthError::TokenExpired => AppError::unauthorized("Token expired"),
            AuthError::RefreshTokenInvalid => AppError::unauthorized("Invalid refresh token"),
            AuthError::RefreshTokenReuse => {
                AppError::unauthorized("Refresh token reuse detected")
            }
            AuthError::StoreUnavailable(msg) => AppError::database(msg),
            AuthError::HashError(msg) => AppError::internal(msg),
        }
    }
}

impl From<UsernameError> for AppError {
    fn from(err: UsernameError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        AppError::validation(err.to_string())
    }
}
