//! Integration tests for the `dallani` binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use predicates::prelude::PredicateBooleanExt;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TOKEN: &str = "tok-cli-1";

/// Command isolated from the caller's session and configuration.
fn dallani(home: &Path, api_url: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("dallani");
    cmd.current_dir(home)
        .env("DALLANI_TOKEN_FILE", home.join("admin_token"))
        .env_remove("DALLANI_API_URL")
        .env_remove("DALLANI_SEARCH_DEBOUNCE_MS")
        .env_remove("DALLANI_LOG_LEVEL")
        .env_remove("DALLANI_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .arg("--api-url")
        .arg(api_url)
        .timeout(std::time::Duration::from_secs(10));
    cmd
}

const UNUSED_API: &str = "http://127.0.0.1:9/api";

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    dallani(home.path(), UNUSED_API)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("login"))
        .stdout(predicates::str::contains("settlements"))
        .stdout(predicates::str::contains("audit-logs"))
        .stdout(predicates::str::contains("--json"));
}

#[test]
fn test_config_writes_defaults() {
    let home = TempDir::new().unwrap();
    let target = home.path().join("dallani.toml");
    dallani(home.path(), UNUSED_API)
        .arg("config")
        .arg("--output")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicates::str::contains("generated successfully"));

    let content = fs::read_to_string(&target).unwrap();
    assert!(content.contains("api_url = \"http://localhost:3000/api\""));
    assert!(content.contains("search_debounce_ms = 500"));

    dallani(home.path(), UNUSED_API)
        .arg("config")
        .arg("--output")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicates::str::contains("already exists"));
}

#[test]
fn test_completion_script() {
    let home = TempDir::new().unwrap();
    dallani(home.path(), UNUSED_API)
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicates::str::contains("dallani"));
}

#[test]
fn test_whoami_without_session() {
    let home = TempDir::new().unwrap();
    dallani(home.path(), UNUSED_API)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicates::str::contains("غير مسجل الدخول"));
}

#[test]
fn test_listing_requires_session() {
    let home = TempDir::new().unwrap();
    dallani(home.path(), UNUSED_API)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicates::str::contains("لا توجد جلسة نشطة"));
}

#[test]
fn test_blank_password_is_rejected_locally() {
    let home = TempDir::new().unwrap();
    dallani(home.path(), UNUSED_API)
        .args(["login", "--email", "admin@dallani.app", "--password-stdin"])
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicates::str::contains("يرجى إدخال البريد الإلكتروني وكلمة المرور"));
    assert!(!home.path().join("admin_token").exists());
}

#[test]
fn test_debounce_below_floor_is_a_config_error() {
    let home = TempDir::new().unwrap();
    dallani(home.path(), UNUSED_API)
        .env("DALLANI_SEARCH_DEBOUNCE_MS", "100")
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to load configuration"));
}

#[test]
fn test_invalid_filter_value() {
    let home = TempDir::new().unwrap();
    dallani(home.path(), UNUSED_API)
        .args(["drivers", "--filter", "sleeping"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("invalid value").and(predicates::str::contains("--filter")));
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({"success": true, "accessToken": TOKEN, "user": {"id": 1, "name": "مدير"}})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "بيانات الدخول غير صحيحة"})),
        )
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {TOKEN}").as_str())
}

async fn settlements(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    let drivers = if params.get("date").map(String::as_str) == Some("2025-11-26") {
        json!([
            {"id": "d1", "name": "أحمد", "phone": "0999", "pendingSettlement": "25.5", "isBlocked": false},
            {"id": "d2", "name": "خالد", "phone": "0911", "pendingSettlement": 60, "isBlocked": true}
        ])
    } else {
        json!([])
    };
    (
        StatusCode::OK,
        Json(json!({"success": true, "drivers": drivers, "totalPending": 85.5, "driversCount": 2})),
    )
}

async fn block_driver(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/auth/admin/login", post(login))
        .route("/api/admin/settlements/daily", get(settlements))
        .route("/api/admin/drivers/{id}/block", post(block_driver));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_login_export_and_action_against_backend() {
    let api_url = spawn_backend().await;
    let home = TempDir::new().unwrap();
    let home_path = home.path().to_path_buf();

    tokio::task::spawn_blocking(move || {
        dallani(&home_path, &api_url)
            .args(["login", "--email", "admin@dallani.app", "--password-stdin"])
            .write_stdin("secret\n")
            .assert()
            .success()
            .stdout(predicates::str::contains("مرحباً مدير"));
        assert_eq!(fs::read_to_string(home_path.join("admin_token")).unwrap(), TOKEN);

        dallani(&home_path, &api_url)
            .args(["settlements", "--date", "2025-11-26"])
            .assert()
            .success()
            .stdout(predicates::str::contains("85.50 د"))
            .stdout(predicates::str::contains("60.00 د !"));

        dallani(&home_path, &api_url)
            .args(["settlements", "--date", "2025-11-26", "--export"])
            .arg(&home_path)
            .assert()
            .success();
        let csv = fs::read_to_string(home_path.join("settlements_2025-11-26.csv")).unwrap();
        assert_eq!(
            csv,
            "\u{FEFF}السائق,الهاتف,المبلغ المستحق,الحالة\nأحمد,0999,25.50,نشط\nخالد,0911,60.00,محظور"
        );

        dallani(&home_path, &api_url)
            .args(["settlements", "--date", "2025-11-27", "--export"])
            .assert()
            .failure()
            .stderr(predicates::str::contains("لا توجد بيانات للتصدير"));

        dallani(&home_path, &api_url)
            .args(["driver", "block", "d1", "--yes"])
            .assert()
            .success()
            .stdout(predicates::str::contains("تم الحظر بنجاح"));

        dallani(&home_path, &api_url)
            .args(["driver", "block", "d1"])
            .write_stdin("n\n")
            .assert()
            .success()
            .stdout(predicates::str::contains("تم الإلغاء"));

        dallani(&home_path, &api_url).arg("logout").assert().success();
        assert!(!home_path.join("admin_token").exists());
    })
    .await
    .unwrap();
}
