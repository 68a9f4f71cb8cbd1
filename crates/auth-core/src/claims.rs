//! JWT Claims

use chrono::{Duration, Utc};
use ludo_common::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::token::TokenError;

/// JWT Claims
///
/// roles 记录签发时刻用户的角色快照，之后角色变更不会
/// 影响已签发的令牌
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    /// Issuer
    #[serde(default)]
    pub iss: String,
    /// Audience
    #[serde(default)]
    pub aud: String,
    /// Roles
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    pub fn new(
        user_id: &UserId,
        roles: Vec<String>,
        expires_in_secs: i64,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.0.to_string(),
            exp: (now + Duration::seconds(expires_in_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            roles,
        }
    }

    pub fn user_id(&self) -> Result<UserId, TokenError> {
        Uuid::parse_str(&self.sub)
            .map(UserId::from_uuid)
            .map_err(|_| TokenError::Invalid("Invalid user ID in token".to_string()))
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| self.has_role(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_subject_roundtrip() {
        let user_id = UserId::new();
        let claims = Claims::new(&user_id, vec![], 900, "ludo", "ludo-api");

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.exp - claims.iat, 900);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_claims_roles() {
        let user_id = UserId::new();
        let claims = Claims::new(
            &user_id,
            vec!["user".to_string(), "moderator".to_string()],
            900,
            "ludo",
            "ludo-api",
        );

        assert!(claims.has_role("user"));
        assert!(claims.has_role("moderator"));
        assert!(!claims.has_role("admin"));
        assert!(claims.has_any_role(&["admin", "moderator"]));
        assert!(!claims.has_any_role(&["admin", "root"]));
    }

    #[test]
    fn test_claims_bad_subject() {
        let user_id = UserId::new();
        let mut claims = Claims::new(&user_id, vec![], 900, "ludo", "ludo-api");
        claims.sub = "not-a-uuid".to_string();

        assert!(claims.user_id().is_err());
    }
}
