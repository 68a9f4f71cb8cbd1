//! 用户实体

use ludo_common::{AuditInfo, UserId};
use ludo_domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};

use crate::domain::user::Progress;
use crate::domain::value_objects::{Email, HashedPassword, Username};

/// 用户状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl Default for UserStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "Active"),
            UserStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub display_name: Option<String>,
    /// 角色名列表；签发令牌时快照进 claims
    pub roles: Vec<String>,
    pub status: UserStatus,
    pub progress: Progress,
    pub audit_info: AuditInfo,
}

impl User {
    pub fn new(username: Username, email: Email, password_hash: HashedPassword) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            display_name: None,
            roles: Vec::new(),
            status: UserStatus::default(),
            progress: Progress::new(),
            audit_info: AuditInfo::default(),
        }
    }

    pub fn activate(&mut self) {
        self.status = UserStatus::Active;
    }

    pub fn deactivate(&mut self) {
        self.status = UserStatus::Inactive;
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn update_password(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
    }

    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
    }

    pub fn change_email(&mut self, email: Email) {
        self.email = email;
    }

    pub fn add_role(&mut self, role: impl Into<String>) {
        let role = role.into();
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
    }

    pub fn remove_role(&mut self, role: &str) {
        self.roles.retain(|r| r != role);
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for User {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

// ============================================================
// 单元测试
// ============================================================
