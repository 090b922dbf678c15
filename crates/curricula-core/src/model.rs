//! Stored record shapes and write drafts.
//!
//! Records serialize with the Spanish field names used on the wire and in the
//! store, so a [`Subject`] read from `asig:<code>` can be returned to a client
//! unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::keys::{ProgramCode, SubjectCode};

/// Subject record stored at `asig:<subject_code>`.
///
/// `program_codes` mirrors the set of existing link records for this subject.
/// Every write path goes through [`crate::plan`] to keep the two in step.
///
/// Numeric fields hold any JSON number as sent; only presence is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "nombre_asignatura")]
    pub name: String,
    #[serde(rename = "unidades_credito")]
    pub credit_units: Number,
    #[serde(rename = "carreras", default)]
    pub program_codes: Vec<ProgramCode>,
}

/// Link record stored at `vinculo:<program_code>:<subject_code>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "semestre")]
    pub semester: Number,
    #[serde(rename = "requisitos", default)]
    pub prerequisites: Vec<String>,
}

/// One requested program association of a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub program_code: ProgramCode,
    pub semester: Number,
    pub prerequisites: Vec<String>,
}

impl Placement {
    pub fn link(&self) -> Link {
        Link {
            semester: self.semester.clone(),
            prerequisites: self.prerequisites.clone(),
        }
    }
}

/// Validated input for creating or replacing a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDraft {
    pub code: SubjectCode,
    pub name: String,
    pub credit_units: Number,
    pub placements: Vec<Placement>,
}

/// User record stored at `user:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: Option<String>,
    pub email: Option<String>,
}
