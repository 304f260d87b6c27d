#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use reqwest::Url;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use summary_client::{Status, SummaryClient, SummaryView};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: String,
}

struct Reply {
    status: StatusCode,
    body: String,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Clone, Default)]
struct BackendState {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process stand-in for the summarization backend. Replies are planned
/// per submitted `url` and can be held until the test releases them.
pub struct MockBackend {
    endpoint: Url,
    state: BackendState,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let state = BackendState::default();
        let app = Router::new()
            .route("/summarize", post(handle_summarize))
            .with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self {
            endpoint: Url::parse(&format!("http://{addr}")).expect("endpoint"),
            state,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn client(&self) -> SummaryClient {
        test_client(&self.endpoint)
    }

    pub fn reply(&self, url: &str, status: u16, body: &str) {
        self.plan(url, status, body, None);
    }

    pub fn summary(&self, url: &str, summary: &str) {
        let body = serde_json::json!({ "summary": summary }).to_string();
        self.reply(url, 200, &body);
    }

    /// Plans a successful reply that is only sent once the returned sender
    /// fires.
    pub fn held_summary(&self, url: &str, summary: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        let body = serde_json::json!({ "summary": summary }).to_string();
        self.plan(url, 200, &body, Some(rx));
        tx
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub async fn wait_for_requests(&self, count: usize) {
        wait_until(|| self.state.requests.lock().unwrap().len() >= count).await;
    }

    fn plan(&self, url: &str, status: u16, body: &str, gate: Option<oneshot::Receiver<()>>) {
        self.state.replies.lock().unwrap().insert(
            url.to_string(),
            Reply {
                status: StatusCode::from_u16(status).expect("status"),
                body: body.to_string(),
                gate,
            },
        );
    }
}

async fn handle_summarize(
    State(state): State<BackendState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push(RecordedRequest {
        content_type,
        body: body.clone(),
    });

    let url = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["url"].as_str().map(str::to_string))
        .unwrap_or_default();

    let reply = state.replies.lock().unwrap().remove(&url);
    match reply {
        Some(reply) => {
            if let Some(gate) = reply.gate {
                let _ = gate.await;
            }
            (reply.status, reply.body)
        }
        None => (StatusCode::NOT_FOUND, "no reply planned".to_string()),
    }
}

/// A client that never goes through a system proxy, so localhost stays local.
pub fn test_client(endpoint: &Url) -> SummaryClient {
    let client = reqwest::Client::builder().no_proxy().build().expect("client");
    SummaryClient::with_client(client, endpoint)
}

/// An endpoint nothing is listening on.
pub fn dead_endpoint() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("endpoint")
}

pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotWrite {
    Status(Status),
    Result(String),
}

/// Records every slot write in order.
#[derive(Debug, Default)]
pub struct RecordingView {
    input: Mutex<String>,
    writes: Mutex<Vec<SlotWrite>>,
}

impl RecordingView {
    pub fn with_input(input: &str) -> Self {
        Self {
            input: Mutex::new(input.to_string()),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<SlotWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn status(&self) -> Status {
        self.writes()
            .iter()
            .rev()
            .find_map(|w| match w {
                SlotWrite::Status(s) => Some(*s),
                SlotWrite::Result(_) => None,
            })
            .unwrap_or_default()
    }

    pub fn result(&self) -> String {
        self.writes()
            .iter()
            .rev()
            .find_map(|w| match w {
                SlotWrite::Result(r) => Some(r.clone()),
                SlotWrite::Status(_) => None,
            })
            .unwrap_or_default()
    }
}

impl SummaryView for RecordingView {
    fn input_value(&self) -> String {
        self.input.lock().unwrap().clone()
    }

    fn set_status(&self, status: Status) {
        self.writes.lock().unwrap().push(SlotWrite::Status(status));
    }

    fn set_result(&self, text: &str) {
        self.writes.lock().unwrap().push(SlotWrite::Result(text.to_string()));
    }
}
