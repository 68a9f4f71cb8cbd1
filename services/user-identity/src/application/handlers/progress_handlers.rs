//! 进度处理器

use std::sync::Arc;

use async_trait::async_trait;
use ludo_common::UserId;
use ludo_cqrs_core::CommandHandler;
use ludo_errors::{AppError, AppResult};

use crate::application::commands::{AddStoreItemCommand, UpdateProgressCommand};
use crate::application::dto::ProgressDto;
use crate::domain::services::ProgressService;

fn parse_user_id(raw: &str) -> AppResult<UserId> {
    UserId::from_string(raw).map_err(|_| AppError::validation("Invalid user ID"))
}

/// 更新进度处理器
pub struct UpdateProgressHandler {
    progress: Arc<ProgressService>,
}

impl UpdateProgressHandler {
    pub fn new(progress: Arc<ProgressService>) -> Self {
        Self { progress }
    }
}

#[async_trait]
impl CommandHandler<UpdateProgressCommand> for UpdateProgressHandler {
    async fn handle(&self, command: UpdateProgressCommand) -> AppResult<ProgressDto> {
        let user_id = parse_user_id(&command.user_id)?;

        let progress = self
            .progress
            .update_progress(&user_id, command.level, command.experience)
            .await?;

        Ok(ProgressDto::from(progress))
    }
}

/// 添加商店物品处理器
pub struct AddStoreItemHandler {
    progress: Arc<ProgressService>,
}

impl AddStoreItemHandler {
    pub fn new(progress: Arc<ProgressService>) -> Self {
        Self { progress }
    }
}

#[async_trait]
impl CommandHandler<AddStoreItemCommand> for AddStoreItemHandler {
    async fn handle(&self, command: AddStoreItemCommand) -> AppResult<ProgressDto> {
        let user_id = parse_user_id(&command.user_id)?;

        let progress = self
            .progress
            .add_store_item(&user_id, &command.item_id)
            .await?;

        Ok(ProgressDto::from(progress))
    }
}
