//! 会话 Repository trait

use async_trait::async_trait;
use ludo_common::UserId;
use ludo_errors::AppResult;

use crate::domain::auth::{RevocationReason, Session, SessionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 保存会话
    async fn save(&self, session: &Session) -> AppResult<()>;

    /// 根据刷新令牌摘要查找会话
    async fn find_by_token_digest(&self, digest: &str) -> AppResult<Option<Session>>;

    /// 原子地吊销仍然有效的会话
    ///
    /// 返回 true 表示本次调用完成了吊销；会话已经被吊销时返回
    /// false。两个并发调用恰好一个拿到 true（compare-and-swap）。
    async fn revoke_if_active(
        &self,
        id: &SessionId,
        reason: RevocationReason,
    ) -> AppResult<bool>;

    /// 吊销用户的所有未吊销会话，返回吊销数量
    async fn revoke_all_for_user(
        &self,
        user_id: &UserId,
        reason: RevocationReason,
    ) -> AppResult<u64>;

    /// 删除已过期的会话，返回删除数量
    async fn delete_expired(&self) -> AppResult<u64>;
}
