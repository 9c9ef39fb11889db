//! Test helpers for integration tests
//!
//! Provides a gateway server on an ephemeral port and a WebSocket client
//! that speaks the event protocol.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::time::Duration;

use account_common::AppConfig;
use account_gateway::{create_app, create_gateway_state, serve};
use anyhow::{anyhow, bail, Context, Result};
use futures_util::{SinkExt, StreamExt};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// How long a client waits for any single frame
const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    gateway_path: String,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let gateway_path = config.gateway.path.clone();

        let state = create_gateway_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            gateway_path,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// WebSocket URL of the gateway endpoint
    pub fn ws_url(&self) -> String {
        format!("ws://{}{}", self.addr, self.gateway_path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Open a new gateway connection
    pub async fn connect(&self) -> Result<TestClient> {
        TestClient::connect(&self.ws_url()).await
    }
}

/// Test-mode configuration: no rate limits, no database, quiet logs
pub fn test_config() -> Result<AppConfig> {
    config_with(&[])
}

/// Test-mode configuration with extra variables layered on top
pub fn config_with(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();

    AppConfig::from_lookup(|name| {
        if let Some((_, value)) = vars.iter().find(|(k, _)| k == name) {
            return Some(value.clone());
        }
        match name {
            "TEST_MODE" | "SILENT_LOGGING" => Some("true".to_string()),
            _ => None,
        }
    })
    .map_err(|e| anyhow!("Config error: {e}"))
}

/// WebSocket client for one gateway connection
pub struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    next_ack: u64,
    pushes: VecDeque<Value>,
}

impl TestClient {
    pub async fn connect(url: &str) -> Result<Self> {
        let (ws, _) = connect_async(url)
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;

        Ok(Self {
            ws,
            next_ack: 1,
            pushes: VecDeque::new(),
        })
    }

    /// Send an event with an ack and wait for its reply
    pub async fn request(&mut self, event: &str, data: Value) -> Result<Value> {
        let ack = self.next_ack;
        self.next_ack += 1;

        self.send_text(json!({ "event": event, "data": data, "ack": ack }).to_string())
            .await?;

        loop {
            let frame = self.next_frame().await?;
            if frame.get("ack").and_then(Value::as_u64) == Some(ack) {
                return Ok(frame);
            }
            if frame.get("event").is_some() {
                self.pushes.push_back(frame);
            }
        }
    }

    /// Send an event without asking for a reply
    pub async fn emit(&mut self, event: &str, data: Value) -> Result<()> {
        self.send_text(json!({ "event": event, "data": data }).to_string())
            .await
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, text: String) -> Result<()> {
        self.ws.send(Message::Text(text)).await?;
        Ok(())
    }

    /// Wait for the next server-initiated event
    pub async fn next_push(&mut self) -> Result<Value> {
        if let Some(push) = self.pushes.pop_front() {
            return Ok(push);
        }

        loop {
            let frame = self.next_frame().await?;
            if frame.get("event").is_some() {
                return Ok(frame);
            }
        }
    }

    /// Whether a push arrives within `wait`
    pub async fn has_push_within(&mut self, wait: Duration) -> bool {
        if !self.pushes.is_empty() {
            return true;
        }
        tokio::time::timeout(wait, self.next_push()).await.is_ok_and(|r| r.is_ok())
    }

    /// Wait until the server closes the connection
    pub async fn closed_within(&mut self, wait: Duration) -> bool {
        let drain = async {
            while let Some(message) = self.ws.next().await {
                match message {
                    Ok(Message::Close(_)) | Err(_) => return,
                    Ok(_) => {}
                }
            }
        };
        tokio::time::timeout(wait, drain).await.is_ok()
    }

    pub async fn close(mut self) -> Result<()> {
        self.ws.close(None).await?;
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<Value> {
        loop {
            let message = tokio::time::timeout(FRAME_TIMEOUT, self.ws.next())
                .await
                .context("Timed out waiting for a frame")?
                .ok_or_else(|| anyhow!("Connection closed"))??;

            match message {
                Message::Text(text) => return Ok(serde_json::from_str(&text)?),
                Message::Close(frame) => bail!("Connection closed: {frame:?}"),
                _ => {}
            }
        }
    }
}

/// Data of a successful reply
pub fn reply_data(reply: &Value) -> Result<&Value> {
    match (reply.get("data"), reply.get("err")) {
        (Some(data), None) => Ok(data),
        (_, Some(err)) => bail!("Expected data, got error: {err}"),
        (None, None) => bail!("Reply has neither data nor err: {reply}"),
    }
}

/// Error kind of a failed reply
pub fn reply_error_kind(reply: &Value) -> Option<&str> {
    reply.get("err")?.get("kind")?.as_str()
}
