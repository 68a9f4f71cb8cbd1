//! 用户 CRUD 与进度流程测试（内存仓储）

use ludo_config::{
    AppConfig, CleanupConfig, DatabaseConfig, JwtConfig, TelemetryConfig,
};
use ludo_cqrs_core::{CommandHandler, QueryHandler};
use secrecy::Secret;

use user_identity::application::commands::{
    AddStoreItemCommand, DeleteUserCommand, RegisterUserCommand, UpdateProgressCommand,
    UpdateUserCommand,
};
use user_identity::application::dto::UserDto;
use user_identity::application::queries::GetUserByIdQuery;
use user_identity::assembly::Assembly;
use user_identity::domain::repositories::UserRepository;
use user_identity::error::AuthError;

fn test_config() -> AppConfig {
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
            access_expires_in: 900,
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
    Assembly::in_memory(&test_config())
}

async fn register(assembly: &Assembly, username: &str) -> UserDto {
    assembly
        .register_user
        .handle(RegisterUserCommand {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "Secr3t!pass".to_string(),
            display_name: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_register_then_get_by_id() {
    let assembly = assembly();
    let registered = register(&assembly, "alice").await;

    assert_eq!(registered.username, "alice");
    assert_eq!(registered.email, "alice@example.com");
    assert_eq!(registered.status, "Active");
    assert_eq!(registered.roles, vec!["user".to_string()]);
    assert_eq!(registered.progress.level, 0);

    let fetched = assembly
        .get_user_by_id
        .handle(GetUserByIdQuery {
            user_id: registered.id.clone(),
        })
        .await
        .unwrap();

    assert_eq!(fetched.id, registered.id);
    assert_eq!(fetched.username, "alice");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let assembly = assembly();
    register(&assembly, "alice").await;

    let err = assembly
        .register_user
        .handle(RegisterUserCommand {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
            password: "Secr3t!pass".to_string(),
            display_name: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let assembly = assembly();
    register(&assembly, "alice").await;

    let err = assembly
        .register_user
        .handle(RegisterUserCommand {
            username: "alice2".to_string(),
            email: "alice@example.com".to_string(),
            password: "Secr3t!pass".to_string(),
            display_name: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_register_weak_password_rejected() {
    let assembly = assembly();

    let err = assembly
        .register_user
        .handle(RegisterUserCommand {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "weak".to_string(),
            display_name: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_update_user() {
    let assembly = assembly();
    let registered = register(&assembly, "alice").await;

    let updated = assembly
        .update_user
        .handle(UpdateUserCommand {
            user_id: registered.id.clone(),
            display_name: Some("Alice".to_string()),
            email: Some("alice+new@example.com".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(updated.display_name, Some("Alice".to_string()));
    assert_eq!(updated.email, "alice+new@example.com");
}

#[tokio::test]
async fn test_update_user_to_taken_email_conflicts() {
    let assembly = assembly();
    let alice = register(&assembly, "alice").await;
    register(&assembly, "bob").await;

    let err = assembly
        .update_user
        .handle(UpdateUserCommand {
            user_id: alice.id,
            display_name: None,
            email: Some("bob@example.com".to_string()),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_delete_user_revokes_sessions() {
    let assembly = assembly();
    let registered = register(&assembly, "alice").await;

    let pair = assembly
        .auth_service
        .login("alice", "Secr3t!pass")
        .await
        .unwrap();

    assembly
        .delete_user
        .handle(DeleteUserCommand {
            user_id: registered.id.clone(),
        })
        .await
        .unwrap();

    // 用户已删除
    let err = assembly
        .get_user_by_id
        .handle(GetUserByIdQuery {
            user_id: registered.id,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    // 会话已被管理吊销，刷新被拒绝且不是重用信号
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
async fn test_update_progress_and_add_store_item() {
    let assembly = assembly();
    let registered = register(&assembly, "alice").await;

    let progress = assembly
        .update_progress
        .handle(UpdateProgressCommand {
            user_id: registered.id.clone(),
            level: 3,
            experience: 1250,
        })
        .await
        .unwrap();

    assert_eq!(progress.level, 3);
    assert_eq!(progress.experience, 1250);

    // 两次添加同一件物品只保留一份
    assembly
        .add_store_item
        .handle(AddStoreItemCommand {
            user_id: registered.id.clone(),
            item_id: "sword_01".to_string(),
        })
        .await
        .unwrap();

    let progress = assembly
        .add_store_item
        .handle(AddStoreItemCommand {
            user_id: registered.id.clone(),
            item_id: "sword_01".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(progress.store_items, vec!["sword_01".to_string()]);
}

#[tokio::test]
async fn test_update_progress_rejects_negative() {
    let assembly = assembly();
    let registered = register(&assembly, "alice").await;

    let err = assembly
        .update_progress
        .handle(UpdateProgressCommand {
            user_id: registered.id,
            level: -1,
            experience: 0,
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_claims_are_issuance_time_snapshot() {
    let assembly = assembly();
    let registered = register(&assembly, "alice").await;

    let old_pair = assembly
        .auth_service
        .login("alice", "Secr3t!pass")
        .await
        .unwrap();

    // 之后给用户加角色
    let user_id = ludo_common::UserId::from_string(&registered.id).unwrap();
    let mut user = assembly.users.find_by_id(&user_id).await.unwrap().unwrap();
    user.add_role("moderator");
    assembly.users.update(&user).await.unwrap();

    // 旧令牌的角色还是签发时的快照
    let old_claims = assembly
        .token_validator
        .validate(&old_pair.access_token)
        .unwrap();
    assert!(old_claims.has_role("user"));
    assert!(!old_claims.has_role("moderator"));

    // 新签发的令牌才会带上新角色
    let new_pair = assembly
        .auth_service
        .login("alice", "Secr3t!pass")
        .await
        .unwrap();
    let new_claims = assembly
        .token_validator
        .validate(&new_pair.access_token)
        .unwrap();
    assert!(new_claims.has_role("moderator"));
}
