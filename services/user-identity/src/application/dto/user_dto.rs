//! User DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::{Progress, User};

/// 对外暴露的用户视图；不携带密码哈希
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub roles: Vec<String>,
    pub status: String,
    pub progress: ProgressDto,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            display_name: user.display_name,
            roles: user.roles,
            status: user.status.to_string(),
            progress: ProgressDto::from(user.progress),
            created_at: user.audit_info.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressDto {
    pub level: i32,
    pub experience: i64,
    pub store_items: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Progress> for ProgressDto {
    fn from(progress: Progress) -> Self {
        Self {
            level: progress.level,
            experience: progress.experience,
            store_items: progress.store_items,
            updated_at: progress.updated_at,
        }
    }
}
