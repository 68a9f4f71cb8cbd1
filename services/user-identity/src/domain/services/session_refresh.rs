//! 会话刷新流程
//!
//! 轮换语义：出示有效的刷新令牌 -> 吊销旧会话 -> 签发新令牌对。
//! 先吊销后签发；取消发生在中间时宁可让这次刷新作废，
//! 也不允许两个刷新令牌同时有效。

use std::sync::Arc;

use ludo_auth_core::RefreshTokenSecret;
use tracing::warn;

use crate::domain::auth::RevocationReason;
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::domain::services::{AuthenticationService, TokenPair};
use crate::error::AuthError;

/// 会话刷新流程
pub struct SessionRefreshFlow {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    auth: Arc<AuthenticationService>,
}

impl SessionRefreshFlow {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        auth: Arc<AuthenticationService>,
    ) -> Self {
        Self {
            users,
            sessions,
            auth,
        }
    }

    /// 用刷新令牌换取新的令牌对
    ///
    /// 同一令牌的并发刷新恰好一个成功，其余得到 RefreshTokenReuse
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let digest = RefreshTokenSecret::digest_of(refresh_token);

        let session = self
            .sessions
            .find_by_token_digest(&digest)
            .await
            .map_err(AuthError::store)?
            .ok_or(AuthError::RefreshTokenInvalid)?;

        if let Some(reason) = session.revocation {
            return match reason {
                RevocationReason::Rotated => {
                    // 已轮换的令牌再次出现：可能被窃取。
                    // 是否吊销整个会话族由外部策略决定。
                    warn!(
                        user_id = %session.user_id,
                        session_id = %session.id,
                        "refresh token reuse detected"
                    );
                    Err(AuthError::RefreshTokenReuse)
                }
                _ => Err(AuthError::RefreshTokenInvalid),
            };
        }

        if session.is_expired() {
            return Err(AuthError::RefreshTokenInvalid);
        }

        // CAS：两个并发刷新只有一个能完成吊销
        let revoked_now = self
            .sessions
            .revoke_if_active(&session.id, RevocationReason::Rotated)
            .await
            .map_err(AuthError::store)?;

        if !revoked_now {
            warn!(
                user_id = %session.user_id,
                session_id = %session.id,
                "lost refresh race, treating as reuse"
            );
            return Err(AuthError::RefreshTokenReuse);
        }

        // 旧会话已吊销，现在才签发替代令牌
        let user = self
            .users
            .find_by_id(&session.user_id)
            .await
            .map_err(AuthError::store)?
            .ok_or(AuthError::RefreshTokenInvalid)?;

        self.auth.issue_token_pair(&user).await
    }
}
