// Common test utilities: an in-process stand-in for the PII Firewall API.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use pii_firewall::PiiFirewallClient;

pub const TEST_API_KEY: &str = "test-rapidapi-key";

/// How the mock server answers every request.
#[derive(Clone)]
pub enum Reply {
    Json { status: StatusCode, body: String },
    /// Sleep before answering, to trip the client's read timeout.
    Stall(Duration),
    /// Answer with a 3xx pointing at `location`.
    Redirect { status: StatusCode, location: String },
}

impl Reply {
    pub fn redirect(status: u16, location: String) -> Self {
        Self::Redirect {
            status: StatusCode::from_u16(status).expect("valid status"),
            location,
        }
    }

    pub fn ok(body: &str) -> Self {
        Self::Json {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::Json {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

struct MockState {
    reply: Reply,
    hits: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockFirewall {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockFirewall {
    /// Start a server on an ephemeral port that answers every request with `reply`.
    pub async fn start(reply: Reply) -> Self {
        let state = Arc::new(MockState {
            reply,
            hits: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> PiiFirewallClient {
        PiiFirewallClient::new(TEST_API_KEY)
            .expect("valid key")
            .with_base_url(self.base_url())
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("at least one request")
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            path: uri.path().to_string(),
            headers,
            body,
        });

    match &state.reply {
        Reply::Json { status, body } => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        Reply::Stall(delay) => {
            tokio::time::sleep(*delay).await;
            (StatusCode::OK, "{}").into_response()
        }
        Reply::Redirect { status, location } => {
            (*status, [(header::LOCATION, location.clone())]).into_response()
        }
    }
}

/// An address nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}
