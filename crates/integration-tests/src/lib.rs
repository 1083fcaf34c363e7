//! Integration tests for the customer directory.
//!
//! # Running Tests
//!
//! ```bash
//! # HTTP tests against the in-memory client
//! cargo test -p customer-directory-integration-tests
//!
//! # Database tests (needs DIRECTORY_DATABASE_URL)
//! cargo test -p customer-directory-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `directory_http` - router behavior with a scripted client
//! - `directory_db` - DAOs and business rules against a live `PostgreSQL`

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use customer_directory_server::AppState;
use customer_directory_server::db::mock::MockClient;
use customer_directory_server::db::{PgClient, create_pool};
use secrecy::SecretString;
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

/// Tables the directory expects; created if absent.
pub const SCHEMA: &str = include_str!("../fixtures/schema.sql");

static DATABASE: Mutex<()> = Mutex::const_new(());

/// Serializes tests sharing the live database.
pub async fn lock_database() -> MutexGuard<'static, ()> {
    DATABASE.lock().await
}

/// Connect to the test database and make sure the schema exists.
///
/// # Panics
///
/// Panics if no database URL is configured or the database is unreachable.
pub async fn live_client() -> PgClient {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DIRECTORY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("DIRECTORY_DATABASE_URL must be set for database tests");

    let pool = create_pool(&SecretString::from(url), 4)
        .await
        .expect("Failed to connect to test database");
    sqlx::raw_sql(SCHEMA)
        .execute(&pool)
        .await
        .expect("Failed to create schema");

    PgClient::new(pool)
}

/// A router over a fresh scripted client.
#[must_use]
pub fn mock_app() -> (Router, MockClient) {
    let client = MockClient::new();
    let app = customer_directory_server::routes::routes(AppState::new(client.clone(), ""));
    (app, client)
}

/// Send one request and return its status and body.
///
/// An empty body comes back as `Null`; a non-JSON body as a string.
///
/// # Panics
///
/// Panics if the request cannot be built.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}
