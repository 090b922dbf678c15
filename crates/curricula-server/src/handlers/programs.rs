//! Program (carrera) handlers.

use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::schema::programs::CurriculumResponse;
use crate::state::AppState;

/// Lists a program's subjects ordered by semester.
///
/// `GET /api/carreras/{codigo_carrera}/asignaturas`
///
/// Answers `{ "message": ... }` instead of `[]` when the program has nothing
/// to list.
pub async fn program_curriculum(
    State(state): State<AppState>,
    Path(program): Path<String>,
) -> Result<Json<CurriculumResponse>, ApiError> {
    let curriculum = state
        .call(move |svc| svc.program_curriculum(&program))
        .await?;
    Ok(Json(curriculum))
}
