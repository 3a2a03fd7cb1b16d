use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// Error envelope shared by the Google REST APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Structured { message: String },
    // the realtime database reports `{"error": "Permission denied"}`
    Plain(String),
}

/// Build the HTTP client shared by all upstream services.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Extract a human-readable message from a failed upstream response.
pub async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(ErrorEnvelope {
            error: ErrorDetail::Structured { message },
        })
        | Ok(ErrorEnvelope {
            error: ErrorDetail::Plain(message),
        }) if !message.is_empty() => message,
        _ if !body.trim().is_empty() => format!("{} - {}", status, body.trim()),
        _ => status.to_string(),
    }
}
