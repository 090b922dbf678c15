//! Subject (asignatura) handlers: create, update, delete, get, list.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::ApiError;
use crate::schema::subjects::{
    CatalogEntry, CreateSubjectRequest, DeleteSubjectResponse, SubjectEnvelope,
    UpdateSubjectRequest,
};
use crate::state::AppState;

/// Creates (or overwrites) a subject and its program links.
///
/// `POST /api/asignaturas`
pub async fn create_subject(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubjectEnvelope>), ApiError> {
    let Json(req) = payload?;
    let created = state.call(move |svc| svc.create_subject(req)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replaces a subject, deleting links of programs it no longer lists.
///
/// `PUT /api/asignaturas/{codigo_asignatura}`
pub async fn update_subject(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<UpdateSubjectRequest>, JsonRejection>,
) -> Result<Json<SubjectEnvelope>, ApiError> {
    let Json(req) = payload?;
    let updated = state
        .call(move |svc| svc.update_subject(&code, req))
        .await?;
    Ok(Json(updated))
}

/// `DELETE /api/asignaturas/{codigo_asignatura}`
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DeleteSubjectResponse>, ApiError> {
    let deleted = state.call(move |svc| svc.delete_subject(&code)).await?;
    Ok(Json(deleted))
}

/// `GET /api/asignaturas/{codigo_asignatura}`
pub async fn get_subject(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<SubjectEnvelope>, ApiError> {
    let subject = state.call(move |svc| svc.get_subject(&code)).await?;
    Ok(Json(subject))
}

/// Lists every subject with its placements.
///
/// `GET /api/asignaturas`
pub async fn list_subjects(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let entries = state.call(|svc| svc.list_subjects()).await?;
    Ok(Json(entries))
}
