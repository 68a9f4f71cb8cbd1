//! User Identity Service - 用户身份服务入口
//!
//! 加载配置、组装服务、托管后台清理任务。
//! 表示层在独立 crate 中，消费这里的 Assembly。

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use ludo_config::AppConfig;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::info;

use user_identity::assembly::Assembly;
use user_identity::infrastructure::cleanup::run_session_sweeper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load("config").context("failed to load configuration")?;

    if config.is_production() {
        ludo_telemetry::init_tracing_json(&config.telemetry.log_level);
    } else {
        ludo_telemetry::init_tracing(&config.telemetry.log_level);
    }
    let _metrics_handle = ludo_telemetry::init_metrics();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(config.database.url.expose_secret())
        .await
        .context("failed to connect to postgres")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let assembly = Assembly::with_postgres(&config, pool.clone());
    info!(app = %config.app_name, env = %config.app_env, "user-identity assembled");

    let shutdown = CancellationToken::new();
    let sweeper = tokio::spawn(run_session_sweeper(
        Arc::clone(&assembly.sessions),
        Duration::from_secs(config.cleanup.interval_secs),
        shutdown.clone(),
    ));

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("shutdown signal received");

    shutdown.cancel();
    let _ = sweeper.await;
    pool.close().await;

    Ok(())
}
