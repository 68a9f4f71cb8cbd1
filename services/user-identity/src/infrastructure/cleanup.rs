//! 过期会话清理
//!
//! 过期会话对校验结果没有影响（查到也会被拒绝），
//! 清理只是回收存储空间

use std::sync::Arc;
use std::time::Duration;

use ludo_common::retry::{RetryConfig, with_retry};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::domain::repositories::SessionRepository;

/// 周期性删除过期会话，直到收到停机信号
pub async fn run_session_sweeper(
    sessions: Arc<dyn SessionRepository>,
    period: Duration,
    shutdown: CancellationToken,
) {
    let retry = RetryConfig::default();
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // interval 的第一跳是立即的
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("session sweeper stopped");
                return;
            }
            _ = ticker.tick() => {
                // 存储暂时不可用是唯一值得重试的失败
                match with_retry(&retry, "delete_expired_sessions", || sessions.delete_expired())
                    .await
                {
                    Ok(deleted) if deleted > 0 => {
                        info!(deleted, "expired sessions removed");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "expired session sweep failed");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};
    use ludo_common::UserId;

    use crate::domain::auth::Session;
    use crate::domain::repositories::SessionRepository;
    use crate::infrastructure::persistence::InMemorySessionRepository;

    #[tokio::test]
    async fn test_sweeper_removes_only_expired() {
        let sessions = Arc::new(InMemorySessionRepository::new());

        let expired = Session::new(
            UserId::new(),
            "expired_digest".to_string(),
            Utc::now() - ChronoDuration::hours(1),
        );
        let live = Session::new(
            UserId::new(),
            "live_digest".to_string(),
            Utc::now() + ChronoDuration::hours(1),
        );
        sessions.save(&expired).await.unwrap();
        sessions.save(&live).await.unwrap();

        let deleted = sessions.delete_expired().await.unwrap();
        assert_eq!(deleted, 1);

        assert!(
            sessions
                .find_by_token_digest("expired_digest")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            sessions
                .find_by_token_digest("live_digest")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_sweeper_stops_on_shutdown() {
        let sessions: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository::new());
        let shutdown = CancellationToken::new();

        let handle = tokio::spawn(run_session_sweeper(
            sessions,
            Duration::from_secs(3600),
            shutdown.clone(),
        ));

        shutdown.cancel();
        handle.await.unwrap();
    }
}
