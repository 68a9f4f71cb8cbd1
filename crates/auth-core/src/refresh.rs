//! 不透明刷新令牌

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// 新签发的刷新令牌
///
/// value 只交给客户端；存储侧只保留 digest，
/// 泄露的存储无法还原出可用的令牌
pub struct RefreshTokenSecret {
    value: String,
    digest: String,
}

impl RefreshTokenSecret {
    /// 生成新的刷新令牌（32 字节 OsRng）
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let value = hex::encode(bytes);
        let digest = Self::digest_of(&value);
        Self { value, digest }
    }

    /// 计算令牌值的存储摘要
    pub fn digest_of(value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// 明文令牌值
    pub fn value(&self) -> &str {
        &self.value
    }

    /// 存储摘要
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl std::fmt::Debug for RefreshTokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenSecret")
            .field("value", &"[REDACTED]")
            .field("digest", &self.digest)
            .finish()
    }
}
