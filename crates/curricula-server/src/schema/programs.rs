//! Program curriculum response types.

use serde::Serialize;
use serde_json::Number;

use curricula_core::{ProgramCode, SubjectCode};

/// One subject of a program's curriculum, flattened with its placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurriculumEntry {
    pub codigo_asignatura: SubjectCode,
    pub nombre_asignatura: String,
    pub unidades_credito: Number,
    pub semestre: Number,
    pub requisitos: Vec<String>,
}

/// Body of `GET /api/carreras/{codigo_carrera}/asignaturas`.
///
/// A program with nothing to list answers with a message object rather than
/// an empty array. Clients must handle both shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CurriculumResponse {
    Subjects(Vec<CurriculumEntry>),
    Empty { message: String },
}

impl CurriculumResponse {
    pub fn empty(program: &ProgramCode) -> Self {
        CurriculumResponse::Empty {
            message: format!("No hay asignaturas registradas para la carrera {}", program),
        }
    }
}
