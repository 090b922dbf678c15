//! User request/response types.

use serde::{Deserialize, Serialize};

/// A user id as clients send it: JSON string or number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserIdInput {
    Text(String),
    Number(serde_json::Number),
}

impl UserIdInput {
    pub fn into_string(self) -> String {
        match self {
            UserIdInput::Text(text) => text,
            UserIdInput::Number(n) => n.to_string(),
        }
    }
}

/// `POST /api/users` body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub id: Option<UserIdInput>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Plain `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
