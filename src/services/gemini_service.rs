use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::GeminiConfig;
use crate::error::AppError;
use crate::services::upstream::error_message;

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate with all parts joined.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Single-turn text generation against the hosted Gemini model.
pub struct GeminiService {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiService {
    pub fn new(client: Client, config: &GeminiConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
        }
    }

    /// Send `prompt` and return the trimmed reply.
    pub async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::UpstreamGeneration(e.to_string()))?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            error!("Gemini request failed: {}", message);
            return Err(AppError::UpstreamGeneration(message));
        }

        let reply = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AppError::UpstreamGeneration(format!("unexpected Gemini response: {}", e)))?
            .into_text()
            .ok_or_else(|| AppError::UpstreamGeneration("Gemini returned no text".to_string()))?;

        debug!(chars = reply.len(), "Gemini reply received");
        Ok(reply)
    }
}
