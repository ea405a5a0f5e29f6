#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use serde_json::Value;

pub const RECEIPT_BODY: &str = r#"{"runId":"run_1","stepRunId":"sr_1","agentId":"ag_1"}"#;

/// A request received by the collector.
#[derive(Debug, Clone)]
pub struct Captured {
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
    pub body: Bytes,
}

impl Captured {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&self.body)))
    }
}

#[derive(Clone)]
struct CollectorState {
    status: StatusCode,
    response: &'static str,
    requests: Arc<Mutex<Vec<Captured>>>,
}

/// Local stand-in for the collection service's `/api/capture/step` route.
pub struct Collector {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl Collector {
    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }
}

async fn capture_step(
    State(state): State<CollectorState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let content_type = header_value(header::CONTENT_TYPE);
    let user_agent = header_value(header::USER_AGENT);
    state.requests.lock().unwrap().push(Captured { content_type, user_agent, body });
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.response,
    )
}

pub async fn spawn_collector_with(status: StatusCode, response: &'static str) -> Collector {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = CollectorState {
        status,
        response,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/api/capture/step", post(capture_step))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Collector {
        base_url: format!("http://{}", addr),
        requests,
    }
}

pub async fn spawn_collector() -> Collector {
    spawn_collector_with(StatusCode::CREATED, RECEIPT_BODY).await
}

/// A base URL with nothing listening on it.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A base URL that accepts connections but never answers.
pub async fn silent_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    format!("http://{}", addr)
}
