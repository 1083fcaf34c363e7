//! Customer route handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use customer_directory_core::{Customer, CustomerId, SearchFilter};
use tracing::instrument;

use super::Created;
use crate::business::CustomerPayload;
use crate::db::SqlClient;
use crate::error::AppError;
use crate::state::AppState;

/// Search customers.
///
/// Every query parameter is optional; an empty result answers 404.
#[instrument(skip(state))]
pub async fn search<C: SqlClient>(
    State(state): State<AppState<C>>,
    filter: Result<Query<SearchFilter>, QueryRejection>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let Query(filter) = filter?;
    let customers = state.customers().search(&filter).await?;
    if customers.is_empty() {
        return Err(AppError::NotFound(
            "No customer matches the search criteria".to_string(),
        ));
    }
    Ok(Json(customers))
}

#[instrument(skip(state))]
pub async fn show<C: SqlClient>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(state.customers().get_details(&id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create<C: SqlClient>(
    State(state): State<AppState<C>>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Created<CustomerId>>), AppError> {
    let Json(payload) = payload?;
    let id = state.customers().create(payload).await?;
    tracing::info!(customer_id = %id, "Customer created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[instrument(skip(state))]
pub async fn delete<C: SqlClient>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.customers().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every customer.
#[instrument(skip(state))]
pub async fn delete_all<C: SqlClient>(
    State(state): State<AppState<C>>,
) -> Result<StatusCode, AppError> {
    state.customers().delete_all().await?;
    tracing::info!("All customers deleted");
    Ok(StatusCode::NO_CONTENT)
}
