//! 认证服务
//!
//! 登录编排：查找用户 -> 验证密码 -> 签发令牌对 -> 持久化会话。
//! 用户不存在与密码错误都返回 InvalidCredentials。

use std::sync::Arc;

use chrono::{Duration, Utc};
use ludo_auth_core::{RefreshTokenSecret, TokenIssuer};
use ludo_common::UserId;
use serde::Serialize;
use tracing::debug;

use crate::domain::auth::{RevocationReason, Session};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::domain::services::PasswordService;
use crate::domain::user::User;
use crate::domain::value_objects::{PasswordError, Username};
use crate::error::AuthError;

/// 签发的令牌对
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// 认证服务
pub struct AuthenticationService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    token_issuer: Arc<TokenIssuer>,
    refresh_expires_in: i64,
}

impl AuthenticationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        token_issuer: Arc<TokenIssuer>,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            users,
            sessions,
            token_issuer,
            refresh_expires_in,
        }
    }

    /// 登录
    ///
    /// 成功时恰好一次持久化写入（新会话）
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        // 用户名连格式都不对，不可能存在；同样折叠成 InvalidCredentials
        let username = match Username::new(username) {
            Ok(u) => u,
            Err(_) => return Err(AuthError::InvalidCredentials),
        };

        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(AuthError::store)?;

        let user = match user {
            Some(u) => u,
            None => {
                debug!(username = %username, "login failed: unknown username");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let valid = PasswordService::verify_password(password, &user.password_hash)
            .map_err(|e| match e {
                PasswordError::InvalidHash(msg) => AuthError::HashError(msg),
                other => AuthError::HashError(other.to_string()),
            })?;

        if !valid {
            debug!(user_id = %user.id, "login failed: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active() {
            debug!(user_id = %user.id, "login failed: account inactive");
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token_pair(&user).await
    }

    /// 登出：吊销出示的刷新令牌对应的会话
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let digest = RefreshTokenSecret::digest_of(refresh_token);

        let session = self
            .sessions
            .find_by_token_digest(&digest)
            .await
            .map_err(AuthError::store)?
            .ok_or(AuthError::RefreshTokenInvalid)?;

        // 已经吊销的会话再登出一次是无害的
        self.sessions
            .revoke_if_active(&session.id, RevocationReason::LoggedOut)
            .await
            .map_err(AuthError::store)?;

        debug!(user_id = %session.user_id, session_id = %session.id, "session logged out");
        Ok(())
    }

    /// 为用户签发访问+刷新令牌对并持久化新会话
    ///
    /// claims 中的角色是此刻的快照
    pub async fn issue_token_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        let access_token = self
            .token_issuer
            .issue_access_token(&user.id, user.roles.clone())?;

        let secret = RefreshTokenSecret::generate();
        let expires_at = Utc::now() + Duration::seconds(self.refresh_expires_in);
        let session = Session::new(user.id.clone(), secret.digest().to_string(), expires_at);

        self.sessions
            .save(&session)
            .await
            .map_err(AuthError::store)?;

        Ok(TokenPair {
            access_token,
            refresh_token: secret.value().to_string(),
            expires_in: self.token_issuer.access_expires_in(),
            token_type: "Bearer".to_string(),
        })
    }

    /// 吊销用户的所有会话（删除用户等管理操作使用）
    pub async fn revoke_all_sessions(&self, user_id: &UserId) -> Result<u64, AuthError> {
        self.sessions
            .revoke_all_for_user(user_id, RevocationReason::Administrative)
            .await
            .map_err(AuthError::store)
    }
}
