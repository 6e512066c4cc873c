//! End-to-end client behaviour against an in-process backend.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use shared::actions::AdminAction;
use shared::query::{Effect, ListQuery, Orders};
use shared::{ApiClient, ApiError, Navigator, ReqwestTransport, SessionStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const TOKEN: &str = "tok-admin-1";

#[derive(Default)]
struct Backend {
    seen_auth: Mutex<Vec<String>>,
    seen_queries: Mutex<Vec<HashMap<String, String>>>,
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    match (body["email"].as_str(), body["password"].as_str()) {
        (Some("flood@dallani.app"), _) => (StatusCode::TOO_MANY_REQUESTS, Json(json!({}))),
        (Some("admin@dallani.app"), Some("secret")) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "accessToken": TOKEN,
                "user": {"id": 1, "name": "مدير النظام", "email": "admin@dallani.app", "role": "ADMIN"}
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "بيانات الدخول غير صحيحة"})),
        ),
    }
}

async fn stats(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> impl IntoResponse {
    let auth = bearer(&headers);
    backend.seen_auth.lock().unwrap().push(auth.clone());
    if auth != format!("Bearer {TOKEN}") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "unauthorized"})));
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "stats": {"totalOrders": 42, "activeDrivers": "7"}})),
    )
}

async fn orders(
    State(backend): State<Arc<Backend>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    backend.seen_queries.lock().unwrap().push(params.clone());
    let orders = if params.get("status").map(String::as_str) == Some("REQUESTED") {
        json!([{"id": "o-2", "status": "REQUESTED", "itemsText": "خبز"}])
    } else {
        json!([
            {"id": "o-1", "status": "DELIVERED", "itemsText": "حليب"},
            {"id": "o-2", "status": "REQUESTED", "itemsText": "خبز"}
        ])
    };
    Json(json!({"success": true, "orders": orders}))
}

async fn block_driver() -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "message": "السائق محظور مسبقاً"})),
    )
}

async fn spawn_backend() -> (String, Arc<Backend>) {
    let backend = Arc::new(Backend::default());
    let app = Router::new()
        .route("/api/auth/admin/login", post(login))
        .route("/api/admin/stats", get(stats))
        .route("/api/admin/orders", get(orders))
        .route("/api/admin/drivers/{id}/block", post(block_driver))
        .with_state(Arc::clone(&backend));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), backend)
}

#[derive(Default)]
struct CountingNavigator(AtomicUsize);

impl Navigator for CountingNavigator {
    fn to_login(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn client(base_url: &str) -> (ApiClient, Arc<CountingNavigator>) {
    let navigator = Arc::new(CountingNavigator::default());
    let client = ApiClient::new(
        base_url,
        Arc::new(ReqwestTransport::new()),
        SessionStore::in_memory(),
        Arc::clone(&navigator) as Arc<dyn Navigator>,
    );
    (client, navigator)
}

#[tokio::test]
async fn test_login_then_authorized_fetch() {
    let (base_url, backend) = spawn_backend().await;
    let (client, navigator) = client(&base_url);

    let success = client.login("admin@dallani.app", "secret").await.unwrap();
    assert_eq!(success.user.unwrap().display_name(), "مدير النظام");
    assert_eq!(client.session().token().as_deref(), Some(TOKEN));

    let stats = client.fetch_stats().await.unwrap();
    assert_eq!(stats.total_orders, 42);
    assert_eq!(stats.active_drivers, 7);
    assert_eq!(backend.seen_auth.lock().unwrap().as_slice(), [format!("Bearer {TOKEN}")]);
    assert_eq!(navigator.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_login_failures() {
    let (base_url, _backend) = spawn_backend().await;
    let (client, _navigator) = client(&base_url);

    let err = client.login("flood@dallani.app", "x").await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimited(_)));
    assert_eq!(err.user_message(), "محاولات كثيرة لتسجيل الدخول، يرجى المحاولة بعد قليل");

    let err = client.login("admin@dallani.app", "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.user_message(), "بيانات الدخول غير صحيحة");
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_rejected_token_forces_logout() {
    let (base_url, _backend) = spawn_backend().await;
    let (client, navigator) = client(&base_url);
    client.session().set_token("stale").unwrap();

    let err = client.fetch_stats().await.unwrap_err();
    assert!(err.is_session_expired());
    assert!(!client.session().is_authenticated());
    assert_eq!(navigator.0.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_orders_page_round_trip() {
    let (base_url, backend) = spawn_backend().await;
    let (client, _navigator) = client(&base_url);
    client.login("admin@dallani.app", "secret").await.unwrap();

    let mut query: ListQuery<Orders> = ListQuery::new(Duration::from_millis(500));
    let Effect::Fetch(ticket) = query.mount() else {
        panic!("mount must fetch");
    };
    let result = client.fetch_list::<Orders>(&ticket).await;
    assert!(query.resolve(&ticket, result));
    assert_eq!(query.items().len(), 2);

    let Effect::Fetch(ticket) = query.set_filter(Some(shared::models::OrderStatus::Requested)) else {
        panic!("status change must fetch");
    };
    let result = client.fetch_list::<Orders>(&ticket).await;
    assert!(query.resolve(&ticket, result));
    assert_eq!(query.items().len(), 1);
    assert_eq!(query.items()[0].id, "o-2");

    let queries = backend.seen_queries.lock().unwrap();
    assert_eq!(queries[0].get("status"), None);
    assert_eq!(queries[1].get("status").map(String::as_str), Some("REQUESTED"));
}

#[tokio::test]
async fn test_rejected_action_keeps_server_message() {
    let (base_url, _backend) = spawn_backend().await;
    let (client, _navigator) = client(&base_url);
    client.login("admin@dallani.app", "secret").await.unwrap();

    let action = AdminAction::BlockDriver {
        driver_id: "d-7".into(),
    };
    let err = client.perform(&action).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "السائق محظور مسبقاً");
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (client, _navigator) = client(&format!("http://{addr}/api"));
    let err = client.login("admin@dallani.app", "secret").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
