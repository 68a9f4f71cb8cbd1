//! 密码服务

use crate::domain::value_objects::{HashedPassword, Password, PasswordError};

/// 密码服务
pub struct PasswordService;

impl PasswordService {
    /// 哈希密码（先过强度校验）
    pub fn hash_password(password: &str) -> Result<HashedPassword, PasswordError> {
        let password = Password::new(password)?;
        HashedPassword::from_plain(password.as_str())
    }

    /// 验证密码
    ///
    /// 不匹配返回 Ok(false)；Err 只代表存储的摘要损坏
    pub fn verify_password(
        password: &str,
        hash: &HashedPassword,
    ) -> Result<bool, PasswordError> {
        hash.verify(password)
    }
}
