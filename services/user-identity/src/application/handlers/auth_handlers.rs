//! 认证处理器

use std::sync::Arc;

use async_trait::async_trait;
use ludo_auth_core::{Claims, TokenValidator};
use ludo_cqrs_core::{CommandHandler, QueryHandler};
use ludo_errors::AppResult;
use metrics::counter;
use tracing::info;

use crate::application::commands::{LoginCommand, LogoutCommand, RefreshSessionCommand};
use crate::application::queries::ValidateAccessTokenQuery;
use crate::domain::services::{AuthenticationService, SessionRefreshFlow, TokenPair};
use crate::error::AuthError;

/// 登录处理器
pub struct LoginHandler {
    auth: Arc<AuthenticationService>,
}

impl LoginHandler {
    pub fn new(auth: Arc<AuthenticationService>) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl CommandHandler<LoginCommand> for LoginHandler {
    async fn handle(&self, command: LoginCommand) -> AppResult<TokenPair> {
        match self.auth.login(&command.username, &command.password).await {
            Ok(pair) => {
                counter!("auth_login_total", "result" => "success").increment(1);
                info!(username = %command.username, "login succeeded");
                Ok(pair)
            }
            Err(err) => {
                counter!("auth_login_total", "result" => "failure").increment(1);
                Err(err.into())
            }
        }
    }
}

/// 会话刷新处理器
pub struct RefreshSessionHandler {
    flow: Arc<SessionRefreshFlow>,
}

impl RefreshSessionHandler {
    pub fn new(flow: Arc<SessionRefreshFlow>) -> Self {
        Self { flow }
    }
}

#[async_trait]
impl CommandHandler<RefreshSessionCommand> for RefreshSessionHandler {
    async fn handle(&self, command: RefreshSessionCommand) -> AppResult<TokenPair> {
        match self.flow.refresh(&command.refresh_token).await {
            Ok(pair) => {
                counter!("auth_refresh_total", "result" => "success").increment(1);
                Ok(pair)
            }
            Err(err) => {
                let result = match &err {
                    AuthError::RefreshTokenReuse => "reuse",
                    _ => "failure",
                };
                counter!("auth_refresh_total", "result" => result).increment(1);
                Err(err.into())
            }
        }
    }
}

/// 登出处理器
pub struct LogoutHandler {
    auth: Arc<AuthenticationService>,
}

impl LogoutHandler {
    pub fn new(auth: Arc<AuthenticationService>) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl CommandHandler<LogoutCommand> for LogoutHandler {
    async fn handle(&self, command: LogoutCommand) -> AppResult<()> {
        self.auth
            .logout(&command.refresh_token)
            .await
            .map_err(Into::into)
    }
}

/// 访问令牌校验处理器
///
/// 纯签名/过期校验，不访问存储
pub struct ValidateAccessTokenHandler {
    validator: Arc<TokenValidator>,
}

impl ValidateAccessTokenHandler {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }
}

#[async_trait]
impl QueryHandler<ValidateAccessTokenQuery> for ValidateAccessTokenHandler {
    async fn handle(&self, query: ValidateAccessTokenQuery) -> AppResult<Claims> {
        self.validator
            .validate(&query.token)
            .map_err(|e| AuthError::from(e).into())
    }
}
