//! Integration tests for BharatCart Admin.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bharatcart-integration-tests
//! ```
//!
//! No external services are needed: the registry lives in a temp directory and
//! the insight API is replaced by [`StubServer`], a one-route HTTP responder on
//! a local port.
//!
//! # Test Categories
//!
//! - `registry_file` - File-backed credential registry across handles
//! - `session_flow` - Register, login, mutate, logout through `AdminApp`
//! - `insights_client` - Gemini client against the stub, success and failure

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use url::Url;

use bharatcart_admin::config::InsightsConfig;

/// Key sent by test clients; the stub does not check it.
pub const TEST_API_KEY: &str = "AIzaTest9kQ2xV7mN4pR8sL1wZ6";

/// A request as seen by the stub.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// e.g. `POST /v1beta/models/m:generateContent HTTP/1.1`
    pub request_line: String,
    /// Header names lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP server answering every request with one canned response.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Bind to an ephemeral local port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the port cannot be bound.
    pub async fn start(status: u16, body: impl Into<String>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let body = Arc::new(body.into());

        let captured = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let captured = Arc::clone(&captured);
                let body = Arc::clone(&body);
                tokio::spawn(async move {
                    if let Ok(request) = serve_one(stream, status, &body).await {
                        captured.lock().await.push(request);
                    }
                });
            }
        });

        Ok(Self {
            addr,
            requests,
            handle,
        })
    }

    /// API root to put in `InsightsConfig::base_url`.
    ///
    /// # Panics
    ///
    /// Never in practice; the URL is built from a bound socket address.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/v1beta", self.addr)).unwrap()
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().await.clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_one(
    mut stream: TcpStream,
    status: u16,
    body: &str,
) -> std::io::Result<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(chunk.get(..n).unwrap_or_default());
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(buf.get(..header_end).unwrap_or_default()).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(chunk.get(..n).unwrap_or_default());
    }
    let body_in = String::from_utf8_lossy(buf.get(header_end..).unwrap_or_default()).into_owned();

    let response = format!(
        "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {len}\r\nconnection: close\r\n\r\n{body}",
        reason = if status < 400 { "OK" } else { "Error" },
        len = body.len(),
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;

    Ok(CapturedRequest {
        request_line,
        headers,
        body: body_in,
    })
}

/// Insight configuration pointing at `base_url` with a test key.
#[must_use]
pub fn insights_config(base_url: Url) -> InsightsConfig {
    InsightsConfig {
        api_key: Some(SecretString::from(TEST_API_KEY)),
        model: "gemini-3-flash-preview".to_string(),
        base_url,
        timeout: Duration::from_secs(5),
    }
}

/// A local URL nothing is listening on.
///
/// # Errors
///
/// Returns an I/O error if a probe port cannot be bound.
///
/// # Panics
///
/// Never in practice; the URL is built from a bound socket address.
#[allow(clippy::unwrap_used)]
pub async fn unreachable_base_url() -> std::io::Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(Url::parse(&format!("http://{addr}/v1beta")).unwrap())
}

/// Wrap a report as a Gemini `generateContent` response body.
#[must_use]
pub fn gemini_reply(report_json: &serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": report_json.to_string() }]
            },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}
