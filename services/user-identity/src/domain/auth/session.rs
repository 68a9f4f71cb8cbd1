//! 会话实体
//!
//! 一条会话对应一个已签发的刷新令牌。存储的是令牌摘要，
//! 明文只在签发响应里出现一次。

use chrono::{DateTime, Utc};
use ludo_common::UserId;
use ludo_domain_core::Entity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 会话 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 吊销原因
///
/// 轮换吊销和登出吊销必须可区分：再次出示被轮换的令牌
/// 是重放信号，出示已登出的令牌只是无效
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevocationReason {
    /// 刷新轮换时吊销
    Rotated,
    /// 用户登出
    LoggedOut,
    /// 管理操作（如删除用户）
    Administrative,
}

impl std::fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevocationReason::Rotated => write!(f, "Rotated"),
            RevocationReason::LoggedOut => write!(f, "LoggedOut"),
            RevocationReason::Administrative => write!(f, "Administrative"),
        }
    }
}

impl std::str::FromStr for RevocationReason {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Rotated" => Ok(Self::Rotated),
            "LoggedOut" => Ok(Self::LoggedOut),
            "Administrative" => Ok(Self::Administrative),
            _ => Err(()),
        }
    }
}

/// 会话实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    /// 刷新令牌的 SHA-256 摘要
    pub token_digest: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revocation: Option<RevocationReason>,
}

impl Session {
    pub fn new(user_id: UserId, token_digest: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            token_digest,
            created_at: Utc::now(),
            expires_at,
            revocation: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    pub fn is_revoked(&self) -> bool {
        self.revocation.is_some()
    }

    /// 有效 = 未吊销且未过期
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }

    pub fn revoke(&mut self, reason: RevocationReason) {
        self.revocation = Some(reason);
    }
}

impl Entity for Session {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// ============================================================
// 单元测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_session() -> Session {
        let user_id = UserId::new();
        let expires_at = Utc::now() + chrono::Duration::hours(24);

        Session::new(user_id, "test_digest".to_string(), expires_at)
    }

    #[test]
    fn test_create_session() {
        let session = create_test_session();

        assert!(session.revocation.is_none());
        assert!(session.is_active());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_expired_session_is_not_active() {
        let user_id = UserId::new();
        let expires_at = Utc::now() - chrono::Duration::hours(1); // 已过期

        let session = Session::new(user_id, "test_digest".to_string(), expires_at);

        assert!(session.is_expired());
        assert!(!session.is_active());
        assert!(!session.is_revoked());
    }

    #[test]
    fn test_revoke_session() {
        let mut session = create_test_session();

        session.revoke(RevocationReason::Rotated);

        assert!(session.is_revoked());
        assert!(!session.is_active());
        assert_eq!(session.revocation, Some(RevocationReason::Rotated));
    }

    #[test]
    fn test_revocation_reason_roundtrip() {
        for reason in [
            RevocationReason::Rotated,
            RevocationReason::LoggedOut,
            RevocationReason::Administrative,
        ] {
            let parsed: RevocationReason = reason.to_string().parse().unwrap();
            assert_eq!(parsed, reason);
        }

        assert!("Unknown".parse::<RevocationReason>().is_err());
    }
}
