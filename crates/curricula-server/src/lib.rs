//! HTTP/JSON API server for the curricula catalog.
//!
//! Exposes subjects (asignaturas), their program placements and the example
//! user routes under `/api`. This crate contains the server configuration,
//! API schema types, error handling, the [`service::CatalogService`] that runs
//! every read/compute/write cycle against the store, and route definitions.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
