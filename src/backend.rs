use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config;

// Structures matching the backend's /chat endpoint
#[derive(Serialize)]
struct BackendRequest<'a> {
    query: &'a str,
    top_k: u32,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct BackendReply {
    response: Option<String>,
    // Other fields like model_used are ignored
}

/// Forwards one message to the inference backend and returns its reply text.
///
/// One outbound call, no retries. A non-success backend status is an error;
/// a payload without a `response` field yields the fixed fallback string.
pub async fn fetch_reply(client: &Client, base_url: &str, message: &str) -> Result<String> {
    let chat_url = format!("{}/chat", base_url);

    let payload = BackendRequest {
        query: message,
        top_k: config::BACKEND_TOP_K,
        max_tokens: config::BACKEND_MAX_TOKENS,
    };

    debug!(%chat_url, "Forwarding message to inference backend");

    let response = client
        .post(&chat_url)
        .json(&payload)
        .send()
        .await
        .context(format!("Failed to send request to backend at {}", chat_url))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        error!(%status, %error_body, "Backend request failed");
        return Err(anyhow::anyhow!(
            "Backend responded with status {}",
            status
        ));
    }

    let reply = response
        .json::<BackendReply>()
        .await
        .context("Failed to parse JSON response from backend")?;

    debug!(response = ?reply.response, "Received backend reply");

    Ok(reply
        .response
        .unwrap_or_else(|| config::MISSING_RESPONSE_FALLBACK.to_string()))
}
