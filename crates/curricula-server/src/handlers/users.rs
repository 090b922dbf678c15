//! User handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use curricula_core::User;

use crate::error::ApiError;
use crate::schema::users::{CreateUserRequest, MessageResponse};
use crate::state::AppState;

/// `GET /api/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state.call(move |svc| svc.get_user(&id)).await?;
    Ok(Json(user))
}

/// `POST /api/users`
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(req) = payload?;
    state.call(move |svc| svc.create_user(req)).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Usuario creado"))))
}
