#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode};
use records_server::db::repository::employee;
use records_server::services::build_router;
use records_server::{Config, DbService, ServerState};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Router over a fresh in-memory store
pub async fn test_app() -> (Router, SqlitePool) {
    test_app_with(Config::default()).await
}

pub async fn test_app_with(config: Config) -> (Router, SqlitePool) {
    let pool = DbService::in_memory().await.unwrap().pool;
    let state = ServerState::new(config, pool.clone());
    (build_router(state), pool)
}

/// Make every insert of a row named `Boom` fail inside the store
pub async fn install_failing_trigger(pool: &SqlitePool) {
    sqlx::query(
        "CREATE TRIGGER reject_boom BEFORE INSERT ON employee WHEN NEW.name = 'Boom'
         BEGIN SELECT RAISE(ABORT, 'simulated store failure'); END",
    )
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count(pool: &SqlitePool) -> i64 {
    employee::count(pool).await.unwrap()
}

/// Send one request and decode the JSON body (Null when empty)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
