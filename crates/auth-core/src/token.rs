//! 访问令牌的签发与校验

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ludo_common::UserId;

use crate::claims::Claims;

/// 令牌错误
///
/// 过期和无效必须可区分：过期的令牌曾经是真的，
/// 调用方可以走刷新流程；无效的令牌直接拒绝
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// 访问令牌签发器
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    access_expires_in: i64,
    issuer: String,
    audience: String,
}

impl TokenIssuer {
    pub fn new(
        secret: &str,
        access_expires_in: i64,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            access_expires_in,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// 签发访问令牌
    ///
    /// roles 是签发时刻的角色快照
    pub fn issue_access_token(
        &self,
        user_id: &UserId,
        roles: Vec<String>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(
            user_id,
            roles,
            self.access_expires_in,
            &self.issuer,
            &self.audience,
        );

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Invalid(format!("Failed to sign token: {}", e)))
    }

    /// 访问令牌有效期（秒）
    pub fn access_expires_in(&self) -> i64 {
        self.access_expires_in
    }
}

/// 访问令牌校验器
///
/// 先验签名再看过期：伪造/畸形的输入在任何存储查询之前就被拒绝
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0; // 不允许时间偏差

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// 校验令牌并提取 Claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        let claims = token_data.claims;

        if claims.jti.is_empty() {
            return Err(TokenError::Invalid("Token ID (jti) missing".to_string()));
        }

        Ok(claims)
    }
}
