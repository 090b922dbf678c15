//! Every route must answer 500 with the store's message when the backend is
//! down.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use curricula_core::Batch;
use curricula_server::router::build_router;
use curricula_server::state::AppState;
use curricula_storage::{KvStore, StorageError};

struct FailingStore;

fn down() -> StorageError {
    StorageError::Unavailable("connection refused".to_string())
}

impl KvStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<Value>, StorageError> {
        Err(down())
    }

    fn set(&self, _key: &str, _value: Value) -> Result<(), StorageError> {
        Err(down())
    }

    fn delete(&self, _key: &str) -> Result<bool, StorageError> {
        Err(down())
    }

    fn mget(&self, _keys: &[String]) -> Result<Vec<Option<Value>>, StorageError> {
        Err(down())
    }

    fn exec(&self, _batch: Batch) -> Result<(), StorageError> {
        Err(down())
    }

    fn scan_prefix(&self, _prefix: &str) -> Result<Vec<String>, StorageError> {
        Err(down())
    }
}

async fn call(method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let app = build_router(AppState::new(Arc::new(FailingStore)));

    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn subject_body() -> Value {
    json!({
        "codigo_asignatura": "CS101",
        "nombre_asignatura": "Intro",
        "unidades_credito": 4,
        "carreras": [{ "codigo_carrera": "INF", "semestre": 1 }]
    })
}

#[tokio::test]
async fn every_route_reports_store_failures() {
    let mut update = subject_body();
    update.as_object_mut().unwrap().remove("codigo_asignatura");

    let cases = vec![
        (Method::GET, "/api/users/1", None),
        (Method::POST, "/api/users", Some(json!({ "id": "1", "name": "Ana" }))),
        (Method::GET, "/api/asignaturas", None),
        (Method::POST, "/api/asignaturas", Some(subject_body())),
        (Method::GET, "/api/asignaturas/CS101", None),
        (Method::PUT, "/api/asignaturas/CS101", Some(update)),
        (Method::DELETE, "/api/asignaturas/CS101", None),
        (Method::GET, "/api/carreras/INF/asignaturas", None),
        (Method::GET, "/api/admin/consistency", None),
    ];

    for (method, path, body) in cases {
        let label = format!("{method} {path}");
        let (status, body) = call(method, path, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{label}");
        assert_eq!(body["success"], json!(false), "{label}");
        assert_eq!(body["error"]["code"], json!("INTERNAL_ERROR"), "{label}");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("connection refused"),
            "{label}: {body:?}"
        );
    }
}

#[tokio::test]
async fn validation_runs_before_the_store_is_touched() {
    let (status, body) = call(
        Method::POST,
        "/api/asignaturas",
        Some(json!({ "codigo_asignatura": "CS101" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("BAD_REQUEST"));
}
