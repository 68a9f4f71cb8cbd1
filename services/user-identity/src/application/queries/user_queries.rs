//! 用户相关查询

use ludo_auth_core::Claims;
use ludo_cqrs_core::Query;

use crate::application::dto::UserDto;

/// 按 ID 查询用户
#[derive(Debug, Clone)]
pub struct GetUserByIdQuery {
    pub user_id: String,
}

impl Query for GetUserByIdQuery {
    type Result = UserDto;
}

/// 校验访问令牌并取出 Claims
///
/// 下游处理器用它做请求授权
#[derive(Debug, Clone)]
pub struct ValidateAccessTokenQuery {
    pub token: String,
}

impl Query for ValidateAccessTokenQuery {
    type Result = Claims;
}
