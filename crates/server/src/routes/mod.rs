//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                    - Liveness
//! GET    /health/ready                              - Database readiness
//!
//! # Customers
//! GET    /customers                                 - Search (query filters)
//! POST   /customers                                 - Create
//! DELETE /customers                                 - Delete every customer
//! GET    /customers/{id}                            - Details
//! DELETE /customers/{id}                            - Delete one
//!
//! # Addresses
//! GET    /customers/{id}/addresses                  - List
//! POST   /customers/{id}/addresses                  - Register
//! DELETE /customers/{id}/addresses                  - Delete all of them
//! GET    /customers/{id}/addresses/{address_id}     - One address
//!
//! # Phones
//! GET    /customers/{id}/phones                     - List
//! POST   /customers/{id}/phones                     - Register
//! GET    /customers/{id}/phones/{phone_id}          - One phone
//! DELETE /customers/{id}/phones/{phone_id}          - Delete one
//! ```

pub mod addresses;
pub mod customers;
pub mod phones;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::db::{SqlClient, Statement};
use crate::state::AppState;

/// Body returned when a resource has been created.
#[derive(Debug, Serialize)]
pub struct Created<T> {
    pub id: T,
}

/// Create the customer routes router.
pub fn customer_routes<C: SqlClient>() -> Router<AppState<C>> {
    Router::new()
        .route(
            "/customers",
            get(customers::search::<C>)
                .post(customers::create::<C>)
                .delete(customers::delete_all::<C>),
        )
        .route(
            "/customers/{id}",
            get(customers::show::<C>).delete(customers::delete::<C>),
        )
        .route(
            "/customers/{id}/addresses",
            get(addresses::index::<C>)
                .post(addresses::create::<C>)
                .delete(addresses::delete_all::<C>),
        )
        .route("/customers/{id}/addresses/{address_id}", get(addresses::show::<C>))
        .route(
            "/customers/{id}/phones",
            get(phones::index::<C>).post(phones::create::<C>),
        )
        .route(
            "/customers/{id}/phones/{phone_id}",
            get(phones::show::<C>).delete(phones::delete::<C>),
        )
}

/// Create all routes, health checks included, bound to `state`.
pub fn routes<C: SqlClient>(state: AppState<C>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness::<C>))
        .merge(customer_routes())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness<C: SqlClient>(State(state): State<AppState<C>>) -> StatusCode {
    match state.client().query(Statement::new("SELECT 1")).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
