//! 认证全流程测试（内存仓储）

use ludo_config::{
    AppConfig, CleanupConfig, DatabaseConfig, JwtConfig, TelemetryConfig,
};
use ludo_cqrs_core::{CommandHandler, QueryHandler};
use secrecy::Secret;

use user_identity::application::commands::{LoginCommand, RegisterUserCommand};
use user_identity::application::queries::ValidateAccessTokenQuery;
use user_identity::assembly::Assembly;
use user_identity::domain::repositories::UserRepository;
use user_identity::domain::user::User;
use user_identity::domain::value_objects::{Email, HashedPassword, Username};
use user_identity::error::AuthError;

fn test_config(access_expires_in: i64) -> AppConfig {
    AppConfig {
        app_name: "user-identity-test".to_string(),
        app_env: "test".to_string(),
        database: DatabaseConfig {
            url: Secret::new("postgres://unused".to_string()),
            max_connections: 1,
            acquire_timeout_secs: 1,
        },
        jwt: JwtConfig {
            secret: Secret::new("test-secret-key-at-least-32-chars-long".to_string()),
            access_expires_in,
            refresh_expires_in: 604800,
            issuer: "ludo".to_string(),
            audience: "ludo-api".to_string(),
        },
        telemetry: TelemetryConfig {
            log_level: "info".to_string(),
        },
        cleanup: CleanupConfig::default(),
    }
}

fn assembly() -> Assembly {
    Assembly::in_memory(&test_config(900))
}

async fn register(assembly: &Assembly, username: &str, password: &str) -> String {
    let dto = assembly
        .register_user
        .handle(RegisterUserCommand {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: password.to_string(),
            display_name: None,
        })
        .await
        .unwrap();
    dto.id
}

#[tokio::test]
async fn test_login_issues_validatable_token_pair() {
    let assembly = assembly();
    let user_id = register(&assembly, "alice", "Secr3t!pass").await;

    let pair = assembly
        .auth_service
        .login("alice", "Secr3t!pass")
        .await
        .unwrap();

    assert_eq!(pair.token_type, "Bearer");
    assert_eq!(pair.expires_in, 900);

    // 访问令牌校验通过，subject 是用户 id，角色是签发时的快照
    let claims = assembly.token_validator.validate(&pair.access_token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert!(claims.has_role("user"));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
    let assembly = assembly();

    // alice 存在，密码用存储好的哈希（跳过注册强度校验的场景）
    let user = User::new(
        Username::new("alice").unwrap(),
        Email::new("alice@example.com").unwrap(),
        HashedPassword::from_plain("Secr3t!").unwrap(),
    );
    assembly.users.save(&user).await.unwrap();

    // 正确密码登录成功
    assert!(assembly.auth_service.login("alice", "Secr3t!").await.is_ok());

    // 密码错误与用户不存在返回同一种错误
    let wrong_password = assembly
        .auth_service
        .login("alice", "wrong")
        .await
        .unwrap_err();
    let unknown_user = assembly
        .auth_service
        .login("bob", "anything")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_user, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_refresh_rotates_and_detects_reuse() {
    let assembly = assembly();
    register(&assembly, "carol", "Secr3t!pass").await;

    let pair1 = assembly
        .auth_service
        .login("carol", "Secr3t!pass")
        .await
        .unwrap();

    // 第一次刷新成功，拿到新令牌对
    let pair2 = assembly
        .session_refresh
        .refresh(&pair1.refresh_token)
        .await
        .unwrap();
    assert_ne!(pair1.refresh_token, pair2.refresh_token);

    // 重放已轮换的令牌 -> 重用信号
    assert!(matches!(
        assembly
            .session_refresh
            .refresh(&pair1.refresh_token)
            .await
            .unwrap_err(),
        AuthError::RefreshTokenReuse
    ));

    // 新令牌仍然可用
    assert!(
        assembly
            .session_refresh
            .refresh(&pair2.refresh_token)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_concurrent_refresh_has_exactly_one_winner() {
    let assembly = assembly();
    register(&assembly, "dave", "Secr3t!pass").await;

    let pair = assembly
        .auth_service
        .login("dave", "Secr3t!pass")
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        assembly.session_refresh.refresh(&pair.refresh_token),
        assembly.session_refresh.refresh(&pair.refresh_token),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);

    // 输家看到的是重用信号
    let loser = if a.is_err() { a } else { b };
    assert!(matches!(loser.unwrap_err(), AuthError::RefreshTokenReuse));
}

#[tokio::test]
async fn test_never_issued_token_is_invalid_not_reuse() {
    let assembly = assembly();

    assert!(matches!(
        assembly.session_refresh.refresh("deadbeef").await.unwrap_err(),
        AuthError::RefreshTokenInvalid
    ));
}

#[tokio::test]
async fn test_logout_then_refresh_rejected() {
    let assembly = assembly();
    register(&assembly, "erin", "Secr3t!pass").await;

    let pair = assembly
        .auth_service
        .login("erin", "Secr3t!pass")
        .await
        .unwrap();

    assembly
        .auth_service
        .logout(&pair.refresh_token)
        .await
        .unwrap();

    // 登出吊销不是轮换吊销，按无效处理
    assert!(matches!(
        assembly
            .session_refresh
            .refresh(&pair.refresh_token)
            .await
            .unwrap_err(),
        AuthError::RefreshTokenInvalid
    ));
}

#[tokio::test]
async fn test_expired_access_token_fails_as_expired() {
    // 访问令牌有效期为负：签出来即过期
    let assembly = Assembly::in_memory(&test_config(-60));
    register(&assembly, "frank", "Secr3t!pass").await;

    let pair = assembly
        .auth_service
        .login("frank", "Secr3t!pass")
        .await
        .unwrap();

    // 必须是 Expired 而不是 Invalid
    assert!(matches!(
        assembly.token_validator.validate(&pair.access_token),
        Err(ludo_auth_core::TokenError::Expired)
    ));
}

#[tokio::test]
async fn test_login_and_validate_through_handlers() {
    let assembly = assembly();
    let user_id = register(&assembly, "grace", "Secr3t!pass").await;

    let pair = assembly
        .login
        .handle(LoginCommand {
            username: "grace".to_string(),
            password: "Secr3t!pass".to_string(),
        })
        .await
        .unwrap();

    let claims = assembly
        .validate_access_token
        .handle(ValidateAccessTokenQuery {
            token: pair.access_token,
        })
        .await
        .unwrap();

    assert_eq!(claims.sub, user_id);
}

#[tokio::test]
async fn test_login_failure_surfaces_as_401_at_handler_boundary() {
    let assembly = assembly();

    let err = assembly
        .login
        .handle(LoginCommand {
            username: "nobody".to_string(),
            password: "whatever".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 401);
    // 错误文案不区分“用户不存在”和“密码错误”
    assert!(err.to_string().contains("Invalid credentials"));
}
