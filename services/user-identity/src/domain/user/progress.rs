//! 用户进度

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户进度：等级、经验与已拥有的商店物品
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    pub level: i32,
    pub experience: i64,
    pub store_items: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            level: 0,
            experience: 0,
            store_items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// 更新等级与经验
    pub fn update(&mut self, level: i32, experience: i64) -> Result<(), ProgressError> {
        if level < 0 {
            return Err(ProgressError::NegativeLevel(level));
        }
        if experience < 0 {
            return Err(ProgressError::NegativeExperience(experience));
        }

        self.level = level;
        self.experience = experience;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// 添加商店物品；已拥有时不重复添加
    ///
    /// 返回是否真的新增了物品
    pub fn add_store_item(&mut self, item_id: impl Into<String>) -> Result<bool, ProgressError> {
        let item_id = item_id.into();
        if item_id.is_empty() {
            return Err(ProgressError::EmptyItemId);
        }

        if self.store_items.contains(&item_id) {
            return Ok(false);
        }

        self.store_items.push(item_id);
        self.updated_at = Utc::now();
        Ok(true)
    }

    pub fn owns_item(&self, item_id: &str) -> bool {
        self.store_items.iter().any(|i| i == item_id)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress 错误
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("Level must be non-negative, got {0}")]
    NegativeLevel(i32),

    #[error("Experience must be non-negative, got {0}")]
    NegativeExperience(i64),

    #[error("Store item id must not be empty")]
    EmptyItemId,
}

impl From<ProgressError> for ludo_errors::AppError {
    fn from(err: ProgressError) -> Self {
        ludo_errors::AppError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progress_is_empty() {
        let progress = Progress::new();

        assert_eq!(progress.level, 0);
        assert_eq!(progress.experience, 0);
        assert!(progress.store_items.is_empty());
    }

    #[test]
    fn test_update_progress() {
        let mut progress = Progress::new();

        progress.update(3, 1250).unwrap();

        assert_eq!(progress.level, 3);
        assert_eq!(progress.experience, 1250);
    }

    #[test]
    fn test_update_rejects_negative() {
        let mut progress = Progress::new();

        assert!(progress.update(-1, 0).is_err());
        assert!(progress.update(0, -5).is_err());
    }

    #[test]
    fn test_add_store_item_idempotent() {
        let mut progress = Progress::new();

        assert!(progress.add_store_item("sword_01").unwrap());
        assert!(!progress.add_store_item("sword_01").unwrap());

        assert_eq!(progress.store_items.len(), 1);
        assert!(progress.owns_item("sword_01"));
    }

    #[test]
    fn test_add_store_item_rejects_empty_id() {
        let mut progress = Progress::new();
        assert!(progress.add_store_item("").is_err());
    }
}
