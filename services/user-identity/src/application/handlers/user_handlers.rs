//! 用户处理器

use std::sync::Arc;

use async_trait::async_trait;
use ludo_common::UserId;
use ludo_cqrs_core::{CommandHandler, QueryHandler};
use ludo_errors::{AppError, AppResult};
use tracing::info;

use crate::application::commands::{DeleteUserCommand, RegisterUserCommand, UpdateUserCommand};
use crate::application::dto::UserDto;
use crate::application::queries::GetUserByIdQuery;
use crate::domain::repositories::UserRepository;
use crate::domain::services::{AuthenticationService, PasswordService};
use crate::domain::user::{Role, User};
use crate::domain::value_objects::{Email, Username};

fn parse_user_id(raw: &str) -> AppResult<UserId> {
    UserId::from_string(raw).map_err(|_| AppError::validation("Invalid user ID"))
}

/// 注册处理器
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl CommandHandler<RegisterUserCommand> for RegisterUserHandler {
    async fn handle(&self, command: RegisterUserCommand) -> AppResult<UserDto> {
        let username = Username::new(&command.username)?;
        let email = Email::new(&command.email)?;

        if self.users.exists_by_username(&username).await? {
            return Err(AppError::conflict("Username already exists"));
        }
        if self.users.exists_by_email(&email).await? {
            return Err(AppError::conflict("Email already exists"));
        }

        let password_hash = PasswordService::hash_password(&command.password)?;

        let mut user = User::new(username, email, password_hash);
        user.set_display_name(command.display_name);
        user.add_role(Role::user().name);

        self.users.save(&user).await?;

        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(UserDto::from(user))
    }
}

/// 更新用户处理器
pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl CommandHandler<UpdateUserCommand> for UpdateUserHandler {
    async fn handle(&self, command: UpdateUserCommand) -> AppResult<UserDto> {
        let user_id = parse_user_id(&command.user_id)?;

        let mut user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if let Some(display_name) = command.display_name {
            user.set_display_name(Some(display_name));
        }

        if let Some(raw_email) = command.email {
            let email = Email::new(&raw_email)?;
            if email != user.email && self.users.exists_by_email(&email).await? {
                return Err(AppError::conflict("Email already exists"));
            }
            user.change_email(email);
        }

        user.audit_info.update(Some(user_id.clone()));
        self.users.update(&user).await?;

        Ok(UserDto::from(user))
    }
}

/// 删除用户处理器
///
/// 删除用户的同时吊销其全部会话
pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
    auth: Arc<AuthenticationService>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, auth: Arc<AuthenticationService>) -> Self {
        Self { users, auth }
    }
}

#[async_trait]
impl CommandHandler<DeleteUserCommand> for DeleteUserHandler {
    async fn handle(&self, command: DeleteUserCommand) -> AppResult<()> {
        let user_id = parse_user_id(&command.user_id)?;

        if self.users.find_by_id(&user_id).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }

        let revoked = self.auth.revoke_all_sessions(&user_id).await?;
        self.users.delete(&user_id).await?;

        info!(user_id = %user_id, revoked_sessions = revoked, "user deleted");
        Ok(())
    }
}

/// 按 ID 查询用户处理器
pub struct GetUserByIdHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserByIdHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl QueryHandler<GetUserByIdQuery> for GetUserByIdHandler {
    async fn handle(&self, query: GetUserByIdQuery) -> AppResult<UserDto> {
        let user_id = parse_user_id(&query.user_id)?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(UserDto::from(user))
    }
}
