//! Test helpers: a one-shot HTTP responder and a gated in-process backend.

use crate::backend::RagBackend;
use crate::types::{QueryRequest, QueryResponse};
use std::collections::VecDeque;
use std::sync::Mutex;
use textbook_core::AppResult;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Notify};
use tokio::task::JoinHandle;

/// Accept one connection, answer it with `status` and `body`, and hand back
/// the raw request text through the join handle.
pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]);
            let content_length = headers
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// In-process backend whose replies are released one at a time by the test.
///
/// Each `query` call records its request, signals `called`, then waits for
/// the next reply pushed with [`GatedBackend::reply`].
#[derive(Debug, Default)]
pub struct GatedBackend {
    requests: Mutex<Vec<QueryRequest>>,
    pending: Mutex<VecDeque<oneshot::Sender<AppResult<QueryResponse>>>>,
    called: Notify,
}

impl GatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Wait until a query is parked on the gate.
    pub async fn wait_for_call(&self) {
        loop {
            let notified = self.called.notified();
            if !self.pending.lock().unwrap().is_empty() {
                return;
            }
            notified.await;
        }
    }

    /// Release the oldest parked query with `result`.
    pub fn reply(&self, result: AppResult<QueryResponse>) {
        let sender = self.pending.lock().unwrap().pop_front().unwrap();
        sender.send(result).ok();
    }

    /// Release the most recently parked query with `result`.
    pub fn reply_latest(&self, result: AppResult<QueryResponse>) {
        let sender = self.pending.lock().unwrap().pop_back().unwrap();
        sender.send(result).ok();
    }
}

#[async_trait::async_trait]
impl RagBackend for GatedBackend {
    fn endpoint(&self) -> &str {
        "gated://test"
    }

    async fn query(&self, request: &QueryRequest) -> AppResult<QueryResponse> {
        let (tx, rx) = oneshot::channel();
        self.requests.lock().unwrap().push(request.clone());
        self.pending.lock().unwrap().push_back(tx);
        self.called.notify_waiters();

        rx.await.unwrap()
    }
}

/// A successful response with the given answer and no sources.
pub fn answer(text: &str) -> QueryResponse {
    QueryResponse {
        answer: text.to_string(),
        sources: Vec::new(),
        chapter_id: None,
        query_time_ms: Some(5.0),
        educational_metadata: None,
    }
}
