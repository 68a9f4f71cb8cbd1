//! 角色与权限

use serde::{Deserialize, Serialize};

/// 权限
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub name: String,
}

impl Permission {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 角色：一组权限的命名集合
///
/// 用户通过角色名引用角色；令牌里只带角色名快照，
/// 权限展开由下游授权层完成
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: Vec::new(),
        }
    }

    /// 注册时分配的默认角色
    pub fn user() -> Self {
        let mut role = Self::new("user");
        role.grant(Permission::new("profile.read"));
        role.grant(Permission::new("profile.write"));
        role.grant(Permission::new("progress.write"));
        role
    }

    pub fn admin() -> Self {
        let mut role = Self::user();
        role.name = "admin".to_string();
        role.grant(Permission::new("users.manage"));
        role
    }

    pub fn grant(&mut self, permission: Permission) {
        if !self.permissions.contains(&permission) {
            self.permissions.push(permission);
        }
    }

    pub fn revoke(&mut self, name: &str) {
        self.permissions.retain(|p| p.name != name);
    }

    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.name == name)
    }
}
