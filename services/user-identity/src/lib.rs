//! 用户身份服务
//!
//! 凭证校验、令牌生命周期、用户 CRUD 与进度管理。
//! 表示层（HTTP/WebSocket）不在本 crate 内，组装结果通过
//! [`assembly::Assembly`] 交给上层。

pub mod application;
pub mod assembly;
pub mod domain;
pub mod error;
pub mod infrastructure;
