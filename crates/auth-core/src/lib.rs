//! ludo-auth-core - 认证核心库
//!
//! 访问令牌是无状态签名 JWT，刷新令牌是持久化的不透明随机值。
//! 签名密钥在构造时注入，进程内不可变。

mod claims;
mod refresh;
mod token;

pub use claims::Claims;
pub use refresh::RefreshTokenSecret;
pub use token::{TokenError, TokenIssuer, TokenValidator};
