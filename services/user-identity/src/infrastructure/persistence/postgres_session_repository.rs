use async_trait::async_trait;
use ludo_common::UserId;
use ludo_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domain::auth::{RevocationReason, Session, SessionId};
use crate::domain::repositories::SessionRepository;

pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> AppResult<()> {
        debug!(session_id = %session.id, "saving session");

        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, token_digest, created_at, expires_at,
                                  revoked, revocation_reason)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.id.0)
        .bind(session.user_id.0)
        .bind(&session.token_digest)
        .bind(session.created_at)
        .bind(session.expires_at)
        .bind(session.revocation.is_some())
        .bind(session.revocation.map(|r| r.to_string()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save session: {}", e)))?;

        Ok(())
    }

    async fn find_by_token_digest(&self, digest: &str) -> AppResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, token_digest, created_at, expires_at, revoked, revocation_reason
            FROM sessions
            WHERE token_digest = $1
            "#,
        )
        .bind(digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find session: {}", e)))?;

        Ok(row.map(|r| r.into()))
    }

    async fn revoke_if_active(
        &self,
        id: &SessionId,
        reason: RevocationReason,
    ) -> AppResult<bool> {
        // WHERE revoked = FALSE 让两个并发吊销恰好一个生效
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET revoked = TRUE, revocation_reason = $2
            WHERE id = $1 AND revoked = FALSE
            "#,
        )
        .bind(id.0)
        .bind(reason.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to revoke session: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke_all_for_user(
        &self,
        user_id: &UserId,
        reason: RevocationReason,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET revoked = TRUE, revocation_reason = $2
            WHERE user_id = $1 AND revoked = FALSE
            "#,
        )
        .bind(user_id.0)
        .bind(reason.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to revoke sessions: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete expired sessions: {}", e)))?;

        Ok(result.rows_affected())
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    token_digest: String,
    created_at: chrono::DateTime<chrono::Utc>,
    expires_at: chrono::DateTime<chrono::Utc>,
    revoked: bool,
    revocation_reason: Option<String>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        let revocation = if row.revoked {
            // 历史数据缺失原因时按管理吊销处理
            Some(
                row.revocation_reason
                    .as_deref()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(RevocationReason::Administrative),
            )
        } else {
            None
        };

        Self {
            id: SessionId(row.id),
            user_id: UserId::from_uuid(row.user_id),
            token_digest: row.token_digest,
            created_at: row.created_at,
            expires_at: row.expires_at,
            revocation,
        }
    }
}
