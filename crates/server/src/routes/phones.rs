//! Phone route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use customer_directory_core::{Phone, PhoneId};
use tracing::instrument;

use super::Created;
use crate::business::PhonePayload;
use crate::db::SqlClient;
use crate::error::AppError;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn index<C: SqlClient>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Phone>>, AppError> {
    Ok(Json(state.phones().list(&id).await?))
}

#[instrument(skip(state))]
pub async fn show<C: SqlClient>(
    State(state): State<AppState<C>>,
    Path((id, phone_id)): Path<(String, String)>,
) -> Result<Json<Phone>, AppError> {
    Ok(Json(state.phones().get(&id, &phone_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create<C: SqlClient>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
    payload: Result<Json<PhonePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Created<PhoneId>>), AppError> {
    let Json(payload) = payload?;
    let phone_id = state.phones().register(&id, payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id: phone_id })))
}

#[instrument(skip(state))]
pub async fn delete<C: SqlClient>(
    State(state): State<AppState<C>>,
    Path((id, phone_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state.phones().delete(&id, &phone_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
