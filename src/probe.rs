//! Client-side checks against the prompt endpoint.
//!
//! These mirror what the chat UI does before and while talking to the API,
//! either directly or through the relay: a liveness probe (OPTIONS, then GET)
//! and a single prompt submission.

use reqwest::{header, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PROMPT_PATH: &str = "/api/prompt";

/// Origin presented by the liveness probe's preflight.
pub const PROBE_ORIGIN: &str = "http://localhost";

/// Availability of the prompt endpoint as seen by a browser client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    /// Both probe requests were answered.
    Online,
    /// Answered, but GET was refused with 405: the endpoint exists and is
    /// likely POST-only or misconfigured for cross-origin use.
    Partial,
    /// A probe request failed at the transport level.
    Offline,
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiStatus::Online => write!(f, "online"),
            ApiStatus::Partial => write!(f, "partial (CORS/405)"),
            ApiStatus::Offline => write!(f, "offline"),
        }
    }
}

/// Classify an answered probe by the GET status.
pub fn classify(get_status: StatusCode) -> ApiStatus {
    if get_status == StatusCode::METHOD_NOT_ALLOWED {
        ApiStatus::Partial
    } else {
        ApiStatus::Online
    }
}

/// Issue a preflight then a GET against `endpoint`.
pub async fn probe_status(client: &reqwest::Client, endpoint: &str) -> ApiStatus {
    let preflight = client
        .request(Method::OPTIONS, endpoint)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "Content-Type")
        .header(header::ORIGIN, PROBE_ORIGIN)
        .send()
        .await;

    if let Err(e) = preflight {
        tracing::warn!(endpoint, error = %e, "Preflight probe failed");
        return ApiStatus::Offline;
    }

    match client.get(endpoint).send().await {
        Ok(res) => classify(res.status()),
        Err(e) => {
            tracing::warn!(endpoint, error = %e, "GET probe failed");
            ApiStatus::Offline
        }
    }
}

#[derive(Debug, Serialize)]
struct PromptRequest<'a> {
    prompt: &'a str,
}

/// What came back from a prompt submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptReply {
    pub status: StatusCode,
    pub body: PromptBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromptBody {
    Json(Value),
    Text(String),
}

impl PromptReply {
    /// The `resposta` field of a JSON reply.
    pub fn answer(&self) -> Option<&str> {
        match &self.body {
            PromptBody::Json(value) => value.get("resposta").and_then(Value::as_str),
            PromptBody::Text(_) => None,
        }
    }
}

/// POST `{"prompt": ...}` to `endpoint`. Non-JSON replies are kept as text.
pub async fn send_prompt(
    client: &reqwest::Client,
    endpoint: &str,
    prompt: &str,
) -> Result<PromptReply, reqwest::Error> {
    let res = client
        .post(endpoint)
        .json(&PromptRequest { prompt })
        .send()
        .await?;

    let status = res.status();
    let text = res.text().await?;
    let body = match serde_json::from_str(&text) {
        Ok(value) => PromptBody::Json(value),
        Err(_) => PromptBody::Text(text),
    };

    Ok(PromptReply { status, body })
}
