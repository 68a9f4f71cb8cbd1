use async_trait::async_trait;
use ludo_common::{AuditInfo, UserId};
use ludo_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domain::repositories::UserRepository;
use crate::domain::user::{Progress, User, UserStatus};
use crate::domain::value_objects::{Email, HashedPassword, Username};

const SELECT_COLUMNS: &str = r#"
    SELECT id, username, email, password_hash, display_name, roles, status,
           progress_level, progress_experience, store_items, created_at, updated_at
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_username(&self, username: &Username) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE username = $1", SELECT_COLUMNS))
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE email = $1", SELECT_COLUMNS))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        Ok(row.map(|r| r.into()))
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        debug!(user_id = %user.id, "saving user");

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, display_name, roles, status,
                               progress_level, progress_experience, store_items,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(&user.display_name)
        .bind(user.roles.join(" "))
        .bind(user.status.to_string())
        .bind(user.progress.level)
        .bind(user.progress.experience)
        .bind(user.progress.store_items.join(" "))
        .bind(user.audit_info.created_at)
        .bind(user.audit_info.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                AppError::conflict("Username or email already exists")
            } else {
                AppError::database(format!("Failed to save user: {}", e))
            }
        })?;

        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        debug!(user_id = %user.id, "updating user");

        sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, display_name = $4, roles = $5, status = $6,
                progress_level = $7, progress_experience = $8, store_items = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(&user.display_name)
        .bind(user.roles.join(" "))
        .bind(user.status.to_string())
        .bind(user.progress.level)
        .bind(user.progress.experience)
        .bind(user.progress.store_items.join(" "))
        .bind(user.audit_info.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update user: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> AppResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete user: {}", e)))?;

        Ok(())
    }

    async fn exists_by_username(&self, username: &Username) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check username: {}", e)))?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check email: {}", e)))?;

        Ok(exists)
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    display_name: Option<String>,
    roles: String,
    status: String,
    progress_level: i32,
    progress_experience: i64,
    store_items: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let status = match row.status.as_str() {
            "Inactive" => UserStatus::Inactive,
            _ => UserStatus::Active,
        };

        Self {
            id: UserId::from_uuid(row.id),
            username: Username(row.username),
            email: Email(row.email),
            password_hash: HashedPassword::from_hash(row.password_hash),
            display_name: row.display_name,
            roles: row
                .roles
                .split_whitespace()
                .map(|s| s.to_string())
                .collect(),
            status,
            progress: Progress {
                level: row.progress_level,
                experience: row.progress_experience,
                store_items: row
                    .store_items
                    .split_whitespace()
                    .map(|s| s.to_string())
                    .collect(),
                updated_at: row.updated_at,
            },
            audit_info: AuditInfo {
                created_at: row.created_at,
                created_by: None,
                updated_at: row.updated_at,
                updated_by: None,
            },
        }
    }
}
