//! Subject (asignatura) request/response types.
//!
//! Request fields are all optional at the serde level so that a missing field
//! is reported as a 400 naming the field, instead of a generic
//! deserialization failure.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use curricula_core::{CoreError, Placement, ProgramCode, Subject, SubjectCode, SubjectDraft};

use super::{required, required_text};

/// One `carreras[]` entry of a create/update request.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacementRequest {
    pub codigo_carrera: Option<String>,
    pub semestre: Option<Number>,
    #[serde(default)]
    pub requisitos: Vec<String>,
}

impl PlacementRequest {
    fn into_placement(self) -> Result<Placement, CoreError> {
        Ok(Placement {
            program_code: ProgramCode::new(required_text("codigo_carrera", self.codigo_carrera)?)?,
            semester: required("semestre", self.semestre)?,
            prerequisites: self.requisitos,
        })
    }
}

fn into_placements(carreras: Vec<PlacementRequest>) -> Result<Vec<Placement>, CoreError> {
    carreras
        .into_iter()
        .map(PlacementRequest::into_placement)
        .collect()
}

/// `POST /api/asignaturas` body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubjectRequest {
    pub codigo_asignatura: Option<String>,
    pub nombre_asignatura: Option<String>,
    pub unidades_credito: Option<Number>,
    pub carreras: Option<Vec<PlacementRequest>>,
}

impl CreateSubjectRequest {
    /// Validates presence of every field. Creation needs at least one program.
    pub fn into_draft(self) -> Result<SubjectDraft, CoreError> {
        let code = SubjectCode::new(required_text("codigo_asignatura", self.codigo_asignatura)?)?;
        let name = required_text("nombre_asignatura", self.nombre_asignatura)?;
        let credit_units = required("unidades_credito", self.unidades_credito)?;
        let carreras = match self.carreras {
            Some(list) if !list.is_empty() => list,
            _ => return Err(CoreError::MissingField { field: "carreras" }),
        };

        Ok(SubjectDraft {
            code,
            name,
            credit_units,
            placements: into_placements(carreras)?,
        })
    }
}

/// `PUT /api/asignaturas/{codigo_asignatura}` body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubjectRequest {
    pub nombre_asignatura: Option<String>,
    pub unidades_credito: Option<Number>,
    pub carreras: Option<Vec<PlacementRequest>>,
}

impl UpdateSubjectRequest {
    /// An empty `carreras` list is accepted here and unlinks every program.
    pub fn into_draft(self, code: SubjectCode) -> Result<SubjectDraft, CoreError> {
        Ok(SubjectDraft {
            code,
            name: required_text("nombre_asignatura", self.nombre_asignatura)?,
            credit_units: required("unidades_credito", self.unidades_credito)?,
            placements: into_placements(required("carreras", self.carreras)?)?,
        })
    }
}

/// Stored subject record together with its key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectEnvelope {
    pub key: String,
    pub value: Subject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteSubjectResponse {
    pub message: String,
    pub vinculos_eliminados: usize,
}

/// Subject expanded with its placements, as listed by `GET /api/asignaturas`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub codigo_asignatura: SubjectCode,
    pub nombre_asignatura: String,
    pub unidades_credito: Number,
    pub carreras: Vec<PlacementView>,
}

/// A placement drawn from a link record.
///
/// `semestre` is `null` and `requisitos` empty when the subject lists a
/// program whose link record is missing. The key is always present; the
/// earlier JS service dropped it from the output instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementView {
    pub codigo_carrera: ProgramCode,
    pub semestre: Option<Number>,
    pub requisitos: Vec<String>,
}
