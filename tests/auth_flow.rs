// Service-level tests for registration, login, and the abuse limiter

mod common;

use taskhub_server::error::ApiError;
use taskhub_server::models::TaskDraft;

#[tokio::test]
async fn register_then_login_round_trip() {
    let state = common::test_state();

    let (user, token) = state
        .auth_service
        .register("alice", "alice@example.com", "password1")
        .await
        .unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");

    // the registration token resolves to the new user's identity
    assert_eq!(state.tokens.verify(&token).unwrap(), user.id);

    let (login_user, login_token) = state
        .auth_service
        .login("alice@example.com", "password1")
        .await
        .unwrap();
    assert_eq!(login_user.id, user.id);
    assert_eq!(state.tokens.verify(&login_token).unwrap(), user.id);
}

#[tokio::test]
async fn email_comparison_is_case_insensitive() {
    let state = common::test_state();

    state
        .auth_service
        .register("alice", "Alice@Example.com", "password1")
        .await
        .unwrap();

    let (user, _) = state
        .auth_service
        .login("alice@example.com", "password1")
        .await
        .unwrap();
    assert_eq!(user.username, "alice");

    let err = state
        .auth_service
        .register("other", "ALICE@EXAMPLE.COM", "password2")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateEmail));
}

#[tokio::test]
async fn duplicate_email_leaves_first_user_intact() {
    let state = common::test_state();

    state
        .auth_service
        .register("alice", "alice@example.com", "password1")
        .await
        .unwrap();

    let err = state
        .auth_service
        .register("impostor", "alice@example.com", "password2")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateEmail));

    let stored = state
        .storage
        .get_user_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.username, "alice");
}

#[tokio::test]
async fn password_is_stored_hashed_and_never_exposed() {
    let state = common::test_state();

    let (profile, _) = state
        .auth_service
        .register("alice", "alice@example.com", "password1")
        .await
        .unwrap();

    let stored = state
        .storage
        .get_user_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "password1");
    assert!(stored.password_hash.starts_with("$2"));

    // the profile view carries no credential material at all
    let json = serde_json::to_value(&profile).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert!(keys
        .iter()
        .all(|k| !k.to_lowercase().contains("password") && !k.to_lowercase().contains("hash")));
}

#[tokio::test]
async fn login_failures_feed_the_counter_and_success_resets_it() {
    let state = common::test_state();

    state
        .auth_service
        .register("alice", "alice@example.com", "password1")
        .await
        .unwrap();

    let err = state
        .auth_service
        .login("alice@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));
    assert_eq!(state.rate_limiter.failure_count(), 1);

    // an unknown email is NotFound and does not count as a failure
    let err = state
        .auth_service
        .login("nobody@example.com", "whatever1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::UserNotFound));
    assert_eq!(state.rate_limiter.failure_count(), 1);

    state
        .auth_service
        .login("alice@example.com", "password1")
        .await
        .unwrap();
    assert_eq!(state.rate_limiter.failure_count(), 0);
}

#[tokio::test]
async fn limiter_blocks_before_the_credential_store_is_consulted() {
    // small ceiling to keep the bcrypt work in this test reasonable; the
    // production default is 50 (AUTH_MAX_LOGIN_FAILURES)
    let mut config = common::test_config();
    config.auth.max_login_failures = 3;
    let state = common::test_state_with_config(config);

    state
        .auth_service
        .register("alice", "alice@example.com", "password1")
        .await
        .unwrap();

    for _ in 0..3 {
        let err = state
            .auth_service
            .login("alice@example.com", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }
    assert_eq!(state.rate_limiter.failure_count(), 3);

    // blocked: even an unknown email now gets TooManyAttempts instead of
    // UserNotFound, proving the store was never reached
    let err = state
        .auth_service
        .login("nobody@example.com", "whatever1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::TooManyAttempts));

    let err = state
        .auth_service
        .login("alice@example.com", "password1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::TooManyAttempts));
}

#[tokio::test]
async fn profile_lookup_resolves_registered_users() {
    let state = common::test_state();

    let (user, _) = state
        .auth_service
        .register("alice", "alice@example.com", "password1")
        .await
        .unwrap();

    let profile = state.auth_service.profile(&user.id).await.unwrap();
    assert_eq!(profile.email, "alice@example.com");

    let err = state.auth_service.profile("no-such-id").await.unwrap_err();
    assert!(matches!(err, ApiError::UserNotFound));
}

#[tokio::test]
async fn cross_owner_task_access_reads_as_not_found() {
    let state = common::test_state();

    let (alice, _) = state
        .auth_service
        .register("alice", "alice@example.com", "password1")
        .await
        .unwrap();
    let (bob, _) = state
        .auth_service
        .register("bob", "bob@example.com", "password1")
        .await
        .unwrap();

    let task = state
        .task_service
        .create(
            &alice.id,
            TaskDraft {
                title: "write report".to_string(),
                description: None,
                category: "work".to_string(),
                deadline: None,
            },
        )
        .await
        .unwrap();

    let err = state.task_service.get(&bob.id, task.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let err = state
        .task_service
        .mark_completed(&bob.id, task.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let err = state
        .task_service
        .delete(&bob.id, task.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // the owner still sees an untouched task
    let still_there = state.task_service.get(&alice.id, task.id).await.unwrap();
    assert_eq!(still_there.title, "write report");
    assert!(!still_there.completed);
}
