//! 进度相关命令

use ludo_cqrs_core::Command;

use crate::application::dto::ProgressDto;

/// 更新进度命令
#[derive(Debug, Clone)]
pub struct UpdateProgressCommand {
    pub user_id: String,
    pub level: i32,
    pub experience: i64,
}

impl Command for UpdateProgressCommand {
    type Result = ProgressDto;
}

/// 添加商店物品命令
#[derive(Debug, Clone)]
pub struct AddStoreItemCommand {
    pub user_id: String,
    pub item_id: String,
}

impl Command for AddStoreItemCommand {
    type Result = ProgressDto;
}
