//! 进度服务

use std::sync::Arc;

use ludo_common::UserId;
use ludo_errors::{AppError, AppResult};
use tracing::debug;

use crate::domain::repositories::UserRepository;
use crate::domain::user::Progress;

/// 进度服务
pub struct ProgressService {
    users: Arc<dyn UserRepository>,
}

impl ProgressService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// 更新用户的等级与经验
    pub async fn update_progress(
        &self,
        user_id: &UserId,
        level: i32,
        experience: i64,
    ) -> AppResult<Progress> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        user.progress.update(level, experience)?;
        user.audit_info.update(Some(user_id.clone()));

        self.users.update(&user).await?;

        debug!(user_id = %user_id, level, experience, "progress updated");
        Ok(user.progress)
    }

    /// 为用户添加商店物品（幂等）
    pub async fn add_store_item(&self, user_id: &UserId, item_id: &str) -> AppResult<Progress> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let added = user.progress.add_store_item(item_id)?;

        // 已拥有时跳过写入
        if added {
            user.audit_info.update(Some(user_id.clone()));
            self.users.update(&user).await?;
            debug!(user_id = %user_id, item_id, "store item added");
        }

        Ok(user.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::repositories::MockUserRepository;

    #[tokio::test]
    async fn test_update_progress_missing_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let svc = ProgressService::new(Arc::new(users));

        let err = svc
            .update_progress(&UserId::new(), 1, 100)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
