//! Code newtypes and key-space conventions.
//!
//! All records share one flat namespace:
//!
//! | family  | key                                   |
//! |---------|---------------------------------------|
//! | subject | `asig:<subject_code>`                 |
//! | link    | `vinculo:<program_code>:<subject_code>` |
//! | user    | `user:<user_id>`                      |
//!
//! `:` separates key segments, so subject and program codes may not contain
//! it. Otherwise the scan prefix `vinculo:INF:` would also match the links of
//! a program named `INF:X`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const SUBJECT_PREFIX: &str = "asig:";
pub const LINK_PREFIX: &str = "vinculo:";
pub const USER_PREFIX: &str = "user:";

const SEPARATOR: char = ':';

/// Subject (asignatura) code, e.g. `CS101`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectCode(String);

/// Program (carrera) code, e.g. `INF`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramCode(String);

/// User identifier. Never scanned, so any non-blank string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

fn validate_code(field: &'static str, code: String) -> Result<String, CoreError> {
    if code.trim().is_empty() {
        return Err(CoreError::MissingField { field });
    }
    if code.contains(SEPARATOR) {
        return Err(CoreError::InvalidCode {
            code,
            reason: format!("{} may not contain '{}'", field, SEPARATOR),
        });
    }
    Ok(code)
}

impl SubjectCode {
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        validate_code("codigo_asignatura", code.into()).map(SubjectCode)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ProgramCode {
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        validate_code("codigo_carrera", code.into()).map(ProgramCode)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl UserId {
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::MissingField { field: "id" });
        }
        Ok(UserId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ProgramCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn subject_key(subject: &SubjectCode) -> String {
    format!("{}{}", SUBJECT_PREFIX, subject)
}

pub fn link_key(program: &ProgramCode, subject: &SubjectCode) -> String {
    format!("{}{}{}{}", LINK_PREFIX, program, SEPARATOR, subject)
}

/// Scan prefix matching every link of one program.
pub fn program_link_prefix(program: &ProgramCode) -> String {
    format!("{}{}{}", LINK_PREFIX, program, SEPARATOR)
}

pub fn user_key(user: &UserId) -> String {
    format!("{}{}", USER_PREFIX, user)
}

/// Recovers the subject code from an `asig:` key.
pub fn subject_code_from_key(key: &str) -> Result<SubjectCode, CoreError> {
    key.strip_prefix(SUBJECT_PREFIX)
        .and_then(|code| SubjectCode::new(code).ok())
        .ok_or_else(|| CoreError::MalformedKey {
            key: key.to_string(),
        })
}

/// Splits a `vinculo:` key into its program and subject codes.
pub fn parse_link_key(key: &str) -> Result<(ProgramCode, SubjectCode), CoreError> {
    let malformed = || CoreError::MalformedKey {
        key: key.to_string(),
    };
    let rest = key.strip_prefix(LINK_PREFIX).ok_or_else(malformed)?;
    let (program, subject) = rest.split_once(SEPARATOR).ok_or_else(malformed)?;
    let program = ProgramCode::new(program).map_err(|_| malformed())?;
    let subject = SubjectCode::new(subject).map_err(|_| malformed())?;
    Ok((program, subject))
}
