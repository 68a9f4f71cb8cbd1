mod memory;
mod postgres_session_repository;
mod postgres_user_repository;

pub use memory::{InMemorySessionRepository, InMemoryUserRepository};
pub use postgres_session_repository::PostgresSessionRepository;
pub use postgres_user_repository::PostgresUserRepository;
