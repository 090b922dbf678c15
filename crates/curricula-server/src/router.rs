//! Router assembly for the curricula HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes under `/api`.
///
/// Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(handlers::welcome))
        // Users
        .route("/api/users", post(handlers::users::create_user))
        .route("/api/users/{id}", get(handlers::users::get_user))
        // Subjects
        .route(
            "/api/asignaturas",
            get(handlers::subjects::list_subjects).post(handlers::subjects::create_subject),
        )
        .route(
            "/api/asignaturas/{codigo_asignatura}",
            get(handlers::subjects::get_subject)
                .put(handlers::subjects::update_subject)
                .delete(handlers::subjects::delete_subject),
        )
        // Programs
        .route(
            "/api/carreras/{codigo_carrera}/asignaturas",
            get(handlers::programs::program_curriculum),
        )
        // Diagnostics
        .route("/api/admin/consistency", get(handlers::admin::consistency))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
