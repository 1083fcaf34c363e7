//! Address route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use customer_directory_core::{Address, AddressId};
use tracing::instrument;

use super::Created;
use crate::business::AddressPayload;
use crate::db::SqlClient;
use crate::error::AppError;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn index<C: SqlClient>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Address>>, AppError> {
    Ok(Json(state.addresses().list(&id).await?))
}

#[instrument(skip(state))]
pub async fn show<C: SqlClient>(
    State(state): State<AppState<C>>,
    Path((id, address_id)): Path<(String, String)>,
) -> Result<Json<Address>, AppError> {
    Ok(Json(state.addresses().get(&id, &address_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create<C: SqlClient>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
    payload: Result<Json<AddressPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Created<AddressId>>), AppError> {
    let Json(payload) = payload?;
    let address_id = state.addresses().register(&id, payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id: address_id })))
}

/// Delete every address of a customer.
#[instrument(skip(state))]
pub async fn delete_all<C: SqlClient>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.addresses().delete_all(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
