//! 用户相关命令

use ludo_cqrs_core::Command;

use crate::application::dto::UserDto;

/// 注册用户命令
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

impl Command for RegisterUserCommand {
    type Result = UserDto;
}

/// 更新用户命令
///
/// None 字段表示不修改
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl Command for UpdateUserCommand {
    type Result = UserDto;
}

/// 删除用户命令
#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub user_id: String,
}

impl Command for DeleteUserCommand {
    type Result = ();
}
