//! 组装层
//!
//! 按依赖顺序显式构造整个子系统：密码服务（无状态）->
//! 仓储 -> 令牌签发/校验 -> 认证服务 -> 刷新流程 -> 处理器。
//! 构造结果交给表示层持有。

use std::sync::Arc;

use ludo_auth_core::{TokenIssuer, TokenValidator};
use ludo_config::AppConfig;
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::application::handlers::{
    AddStoreItemHandler, DeleteUserHandler, GetUserByIdHandler, LoginHandler, LogoutHandler,
    RefreshSessionHandler, RegisterUserHandler, UpdateProgressHandler, UpdateUserHandler,
    ValidateAccessTokenHandler,
};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::domain::services::{AuthenticationService, ProgressService, SessionRefreshFlow};
use crate::infrastructure::persistence::{
    InMemorySessionRepository, InMemoryUserRepository, PostgresSessionRepository,
    PostgresUserRepository,
};

/// 组装完成的服务集合
pub struct Assembly {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub token_validator: Arc<TokenValidator>,
    pub auth_service: Arc<AuthenticationService>,
    pub session_refresh: Arc<SessionRefreshFlow>,

    pub login: Arc<LoginHandler>,
    pub refresh_session: Arc<RefreshSessionHandler>,
    pub logout: Arc<LogoutHandler>,
    pub validate_access_token: Arc<ValidateAccessTokenHandler>,
    pub register_user: Arc<RegisterUserHandler>,
    pub update_user: Arc<UpdateUserHandler>,
    pub delete_user: Arc<DeleteUserHandler>,
    pub get_user_by_id: Arc<GetUserByIdHandler>,
    pub update_progress: Arc<UpdateProgressHandler>,
    pub add_store_item: Arc<AddStoreItemHandler>,
}

impl Assembly {
    /// 用给定仓储组装服务
    pub fn build(
        config: &AppConfig,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        let secret = config.jwt.secret.expose_secret();

        let token_issuer = Arc::new(TokenIssuer::new(
            secret,
            config.jwt.access_expires_in,
            &config.jwt.issuer,
            &config.jwt.audience,
        ));
        let token_validator = Arc::new(TokenValidator::new(
            secret,
            &config.jwt.issuer,
            &config.jwt.audience,
        ));

        let auth_service = Arc::new(AuthenticationService::new(
            users.clone(),
            sessions.clone(),
            token_issuer,
            config.jwt.refresh_expires_in,
        ));
        let session_refresh = Arc::new(SessionRefreshFlow::new(
            users.clone(),
            sessions.clone(),
            auth_service.clone(),
        ));
        let progress_service = Arc::new(ProgressService::new(users.clone()));

        Self {
            login: Arc::new(LoginHandler::new(auth_service.clone())),
            refresh_session: Arc::new(RefreshSessionHandler::new(session_refresh.clone())),
            logout: Arc::new(LogoutHandler::new(auth_service.clone())),
            validate_access_token: Arc::new(ValidateAccessTokenHandler::new(
                token_validator.clone(),
            )),
            register_user: Arc::new(RegisterUserHandler::new(users.clone())),
            update_user: Arc::new(UpdateUserHandler::new(users.clone())),
            delete_user: Arc::new(DeleteUserHandler::new(users.clone(), auth_service.clone())),
            get_user_by_id: Arc::new(GetUserByIdHandler::new(users.clone())),
            update_progress: Arc::new(UpdateProgressHandler::new(progress_service.clone())),
            add_store_item: Arc::new(AddStoreItemHandler::new(progress_service)),
            users,
            sessions,
            token_validator,
            auth_service,
            session_refresh,
        }
    }

    /// Postgres 仓储组装
    pub fn with_postgres(config: &AppConfig, pool: PgPool) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
        let sessions: Arc<dyn SessionRepository> =
            Arc::new(PostgresSessionRepository::new(pool));

        Self::build(config, users, sessions)
    }

    /// 内存仓储组装（本地开发与测试）
    pub fn in_memory(config: &AppConfig) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let sessions: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository::new());

        Self::build(config, users, sessions)
    }
}
