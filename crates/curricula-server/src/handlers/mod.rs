//! HTTP handler modules for the curricula API.
//!
//! Each sub-module implements thin handlers that parse requests, delegate to
//! [`CatalogService`](crate::service::CatalogService), and return JSON
//! responses. No business logic lives in handlers.

pub mod admin;
pub mod programs;
pub mod subjects;
pub mod users;

/// `GET /api`
pub async fn welcome() -> &'static str {
    "¡Bienvenido a la API de asignaturas y carreras!"
}
