//! In-process mock of the visualization backend.
//!
//! Binds an axum router to an ephemeral port and serves the five REST
//! endpoints the client consumes. Responses are scriptable per endpoint
//! and every request is captured (method, path, multipart fields) for
//! assertions.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures;

/// One captured request, with multipart content decoded to text.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Multipart text fields as (name, value).
    pub fields: Vec<(String, String)>,
    /// Multipart file parts as (field name, original filename).
    pub files: Vec<(String, String)>,
}

/// Scriptable server state shared with the router.
#[derive(Debug)]
struct MockState {
    upload_response: Mutex<(StatusCode, Value)>,
    batch_response: Mutex<(StatusCode, Value)>,
    wind_response: Mutex<(StatusCode, Value)>,
    delete_response: Mutex<(StatusCode, Value)>,
    requests: Mutex<Vec<CapturedRequest>>,
    delete_count: AtomicUsize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            upload_response: Mutex::new((
                StatusCode::OK,
                fixtures::upload_success_json("20240115120000"),
            )),
            batch_response: Mutex::new((
                StatusCode::OK,
                fixtures::batch_success_json(&["20240115120000"]),
            )),
            wind_response: Mutex::new((StatusCode::OK, fixtures::wind_data_json(5, 5))),
            delete_response: Mutex::new((StatusCode::OK, json!({"success": true}))),
            requests: Mutex::new(Vec::new()),
            delete_count: AtomicUsize::new(0),
        }
    }
}

/// A running mock backend bound to 127.0.0.1 on an ephemeral port.
///
/// The server task is aborted when the handle is dropped.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Start the mock with happy-path defaults for every endpoint.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());

        let router = Router::new()
            .route("/api/upload-netcdf", post(handle_upload))
            .route("/api/upload-netcdf-batch", post(handle_upload_batch))
            .route("/api/wind-data/:session_id", get(handle_wind_data))
            .route("/api/session/:session_id", delete(handle_delete_session))
            .route("/health", get(handle_health))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");

        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("mock backend serve");
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Base URL for pointing a client at this mock.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Script the single-upload response.
    pub fn set_upload_response(&self, status: u16, body: Value) {
        *self.state.upload_response.lock().unwrap() =
            (StatusCode::from_u16(status).unwrap(), body);
    }

    /// Script the batch-upload response.
    pub fn set_batch_response(&self, status: u16, body: Value) {
        *self.state.batch_response.lock().unwrap() =
            (StatusCode::from_u16(status).unwrap(), body);
    }

    /// Script the wind-data response.
    pub fn set_wind_response(&self, status: u16, body: Value) {
        *self.state.wind_response.lock().unwrap() = (StatusCode::from_u16(status).unwrap(), body);
    }

    /// Script the session-delete response.
    pub fn set_delete_response(&self, status: u16, body: Value) {
        *self.state.delete_response.lock().unwrap() =
            (StatusCode::from_u16(status).unwrap(), body);
    }

    /// All captured requests, in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Captured requests whose path matches `path`.
    pub fn requests_to(&self, path: &str) -> Vec<CapturedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// How many session deletes were received.
    pub fn delete_count(&self) -> usize {
        self.state.delete_count.load(Ordering::SeqCst)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn capture_multipart(
    state: &MockState,
    method: &str,
    path: &str,
    mut multipart: Multipart,
) {
    let mut captured = CapturedRequest {
        method: method.to_string(),
        path: path.to_string(),
        fields: Vec::new(),
        files: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let name = field.name().unwrap_or("").to_string();
        match field.file_name() {
            Some(filename) => {
                let filename = filename.to_string();
                // Drain the body so the stream stays well-formed
                let _ = field.bytes().await;
                captured.files.push((name, filename));
            }
            None => {
                let value = field.text().await.unwrap_or_default();
                captured.fields.push((name, value));
            }
        }
    }

    state.requests.lock().unwrap().push(captured);
}

async fn handle_upload(
    State(state): State<Arc<MockState>>,
    multipart: Multipart,
) -> impl IntoResponse {
    capture_multipart(&state, "POST", "/api/upload-netcdf", multipart).await;
    let (status, body) = state.upload_response.lock().unwrap().clone();
    (status, Json(body))
}

async fn handle_upload_batch(
    State(state): State<Arc<MockState>>,
    multipart: Multipart,
) -> impl IntoResponse {
    capture_multipart(&state, "POST", "/api/upload-netcdf-batch", multipart).await;
    let (status, body) = state.batch_response.lock().unwrap().clone();
    (status, Json(body))
}

async fn handle_wind_data(
    State(state): State<Arc<MockState>>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(CapturedRequest {
        method: "GET".to_string(),
        path: format!("/api/wind-data/{}", session_id),
        fields: Vec::new(),
        files: Vec::new(),
    });
    let (status, body) = state.wind_response.lock().unwrap().clone();
    (status, Json(body))
}

async fn handle_delete_session(
    State(state): State<Arc<MockState>>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    state.delete_count.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().unwrap().push(CapturedRequest {
        method: "DELETE".to_string(),
        path: format!("/api/session/{}", session_id),
        fields: Vec::new(),
        files: Vec::new(),
    });
    let (status, body) = state.delete_response.lock().unwrap().clone();
    (status, Json(body))
}

async fn handle_health(State(_state): State<Arc<MockState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "active_sessions": 0,
        "version": "2.0.0"
    }))
}
