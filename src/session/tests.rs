use super::*;
use crate::error::ClientErrorStatus;
use crate::request::MockHttpClient;
use crate::storage::KeyValueStorage;
use crate::testing::{Fixture, GatedHttpClient, api_url};
use serde_json::json;
use std::cell::Cell;

// =========================================================
// 辅助函数
// =========================================================

fn user_json(id: i64, username: &str) -> serde_json::Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "first_name": "",
        "last_name": "",
        "is_staff": false,
        "is_superuser": false
    })
}

fn mock_login_ok(client: &MockHttpClient) {
    client.mock_response(
        &api_url("/auth/login/"),
        200,
        json!({ "message": "登录成功", "user": user_json(1, "alice") }),
    );
}

// =========================================================
// SessionHandle 测试
// =========================================================

#[test]
fn test_handle_starts_anonymous() {
    let handle = SessionHandle::new();
    assert_eq!(handle.snapshot(), Session::default());
    assert!(!handle.is_authenticated());
    assert_eq!(handle.epoch(), 0);
}

#[test]
fn test_listeners_see_every_change() {
    let handle = SessionHandle::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    handle.subscribe(move |s| sink.borrow_mut().push(s.authenticated));

    handle.establish(None);
    handle.reset();

    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[test]
fn test_listener_may_read_handle() {
    let handle = SessionHandle::new();
    let reader = handle.clone();
    let observed = Rc::new(Cell::new(false));
    let sink = observed.clone();
    handle.subscribe(move |_| sink.set(reader.is_authenticated()));

    handle.establish(None);
    assert!(observed.get());
}

#[test]
fn test_establish_keeps_existing_user_when_none_given() {
    let handle = SessionHandle::new();
    let user = UserRecord {
        id: Some(9),
        username: Some("zed".into()),
        ..UserRecord::default()
    };
    handle.establish(Some(user.clone()));
    handle.establish(None);
    assert_eq!(handle.user(), Some(user));
}

#[test]
fn test_establish_if_current_rejects_old_epoch() {
    let handle = SessionHandle::new();
    let epoch = handle.epoch();
    handle.reset();
    assert!(!handle.establish_if_current(epoch, None));
    assert!(!handle.is_authenticated());
    assert!(handle.establish_if_current(handle.epoch(), None));
    assert!(handle.is_authenticated());
}

// =========================================================
// login 测试
// =========================================================

#[tokio::test]
async fn test_login_success_authenticates() {
    let fx = Fixture::new();
    let store = fx.store();
    mock_login_ok(store.client().transport());

    let resp = store
        .login(&Credentials::new("alice", "pw"))
        .await
        .unwrap();

    assert_eq!(resp.message.as_deref(), Some("登录成功"));
    assert!(store.is_authenticated());
    assert_eq!(store.user().unwrap().username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_login_failure_stays_anonymous() {
    let fx = Fixture::new();
    let store = fx.store();
    store.client().transport().mock_response(
        &api_url("/auth/login/"),
        400,
        json!({ "error": "用户名和密码不能为空" }),
    );

    let err = store
        .login(&Credentials::new("", ""))
        .await
        .unwrap_err();

    assert_eq!(err.status, ClientErrorStatus::Rejected);
    assert_eq!(err.message(), "用户名和密码不能为空");
    assert!(!store.is_authenticated());
    assert_eq!(store.user(), None);
}

#[tokio::test]
async fn test_login_with_bad_password_hits_unauthorized_path() {
    let fx = Fixture::new();
    let store = fx.store();
    store.client().transport().mock_response(
        &api_url("/auth/login/"),
        401,
        json!({ "error": "用户名或密码错误" }),
    );

    let err = store
        .login(&Credentials::new("alice", "wrong"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!store.is_authenticated());
    assert_eq!(fx.visits(), vec!["/login".to_string()]);
}

// =========================================================
// logout 测试
// =========================================================

#[tokio::test]
async fn test_logout_clears_everything() {
    let fx = Fixture::new();
    let store = fx.store();
    mock_login_ok(store.client().transport());
    store
        .client()
        .transport()
        .mock_response(&api_url("/auth/logout/"), 200, json!({ "message": "登出成功" }));

    store.login(&Credentials::new("alice", "pw")).await.unwrap();
    fx.local.set("token", "t");
    fx.local.set("layout", "compact");
    fx.session_storage.set("draft", "x");

    store.logout().await;

    assert_eq!(store.session().snapshot(), Session::default());
    assert!(fx.local.is_empty());
    assert!(fx.session_storage.is_empty());
}

#[tokio::test]
async fn test_logout_succeeds_locally_when_backend_fails() {
    let fx = Fixture::new();
    let store = fx.store();
    store.session().establish(Some(UserRecord::default()));
    fx.local.set("token", "t");
    store
        .client()
        .transport()
        .mock_failure(&api_url("/auth/logout/"), "connection reset");

    store.logout().await;

    assert!(!store.is_authenticated());
    assert_eq!(store.user(), None);
    assert!(fx.local.is_empty());
}

#[tokio::test]
async fn test_logout_with_expired_session() {
    let fx = Fixture::new();
    let store = fx.store();
    store.session().establish(None);
    store
        .client()
        .transport()
        .mock_response(&api_url("/auth/logout/"), 401, json!({}));

    store.logout().await;

    assert!(!store.is_authenticated());
    assert_eq!(fx.visits(), vec!["/login".to_string()]);
}

// =========================================================
// fetch_current_user 测试
// =========================================================

#[tokio::test]
async fn test_fetch_current_user_success() {
    let fx = Fixture::new();
    let store = fx.store();
    store.client().transport().mock_response(
        &api_url("/auth/user/"),
        200,
        json!({ "user": user_json(5, "dave") }),
    );

    let user = store.fetch_current_user().await.unwrap();

    assert_eq!(user.id, Some(5));
    assert!(store.is_authenticated());
    assert_eq!(store.user(), Some(user));
}

#[tokio::test]
async fn test_fetch_current_user_accepts_sparse_record() {
    let fx = Fixture::new();
    let store = fx.store();
    store.client().transport().mock_response(
        &api_url("/auth/user/"),
        200,
        json!({ "user": { "username": "alice", "email": null } }),
    );

    let user = store.fetch_current_user().await.unwrap();

    assert!(store.is_authenticated());
    assert_eq!(user.id, None);
    assert_eq!(user.display_name(), "alice");
}

#[tokio::test]
async fn test_fetch_current_user_failure_leaves_state() {
    let fx = Fixture::new();
    let store = fx.store();
    let before = UserRecord {
        id: Some(2),
        username: Some("erin".into()),
        ..UserRecord::default()
    };
    store.session().establish(Some(before.clone()));
    store.client().transport().mock_response(
        &api_url("/auth/user/"),
        503,
        json!({ "error": "maintenance" }),
    );

    let err = store.fetch_current_user().await.unwrap_err();

    assert_eq!(err.http_status(), Some(503));
    assert!(store.is_authenticated());
    assert_eq!(store.user(), Some(before));
}

#[tokio::test]
async fn test_stale_fetch_does_not_reauthenticate_after_logout() {
    let fx = Fixture::new();
    let transport = GatedHttpClient::new(MockHttpClient::new());
    transport.inner.mock_response(
        &api_url("/auth/user/"),
        200,
        json!({ "user": user_json(1, "alice") }),
    );
    transport
        .inner
        .mock_response(&api_url("/auth/logout/"), 200, json!({}));
    let release = transport.hold(&api_url("/auth/user/"));
    let store = SessionStore::new(fx.client_with(transport));

    let (fetched, _) = tokio::join!(store.fetch_current_user(), async {
        store.logout().await;
        let _ = release.send(());
    });

    let err = fetched.unwrap_err();
    assert_eq!(err.status, ClientErrorStatus::Superseded);
    assert!(!store.is_authenticated());
    assert_eq!(store.user(), None);
}
