//! 内存版仓储
//!
//! 无数据库场景（本地开发、集成测试）下的实现；
//! 用互斥锁保证吊销 CAS 的原子性

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use ludo_common::UserId;
use ludo_errors::{AppError, AppResult};
use uuid::Uuid;

use crate::domain::auth::{RevocationReason, Session, SessionId};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::domain::user::User;
use crate::domain::value_objects::{Email, Username};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, User>> {
        self.users.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.lock().get(&id.0).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> AppResult<Option<User>> {
        Ok(self
            .lock()
            .values()
            .find(|u| u.username == *username)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        Ok(self.lock().values().find(|u| u.email == *email).cloned())
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let mut users = self.lock();

        let duplicate = users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if duplicate {
            return Err(AppError::conflict("Username or email already exists"));
        }

        users.insert(user.id.0, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        self.lock().insert(user.id.0, user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> AppResult<()> {
        self.lock().remove(&id.0);
        Ok(())
    }

    async fn exists_by_username(&self, username: &Username) -> AppResult<bool> {
        Ok(self.lock().values().any(|u| u.username == *username))
    }

    async fn exists_by_email(&self, email: &Email) -> AppResult<bool> {
        Ok(self.lock().values().any(|u| u.email == *email))
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> AppResult<()> {
        self.lock().insert(session.id.0, session.clone());
        Ok(())
    }

    async fn find_by_token_digest(&self, digest: &str) -> AppResult<Option<Session>> {
        Ok(self
            .lock()
            .values()
            .find(|s| s.token_digest == digest)
            .cloned())
    }

    async fn revoke_if_active(
        &self,
        id: &SessionId,
        reason: RevocationReason,
    ) -> AppResult<bool> {
        let mut sessions = self.lock();

        match sessions.get_mut(&id.0) {
            Some(session) if session.revocation.is_none() => {
                session.revoke(reason);
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Ok(false),
        }
    }

    async fn revoke_all_for_user(
        &self,
        user_id: &UserId,
        reason: RevocationReason,
    ) -> AppResult<u64> {
        let mut sessions = self.lock();
        let mut revoked = 0u64;

        for session in sessions.values_mut() {
            if session.user_id == *user_id && session.revocation.is_none() {
                session.revoke(reason);
                revoked += 1;
            }
        }

        Ok(revoked)
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let mut sessions = self.lock();
        let now = Utc::now();
        let before = sessions.len();

        sessions.retain(|_, s| s.expires_at > now);

        Ok((before - sessions.len()) as u64)
    }
}
