use anyhow::{Context, Result};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::upstream::http_client;
use crate::services::{GeminiService, HeartModelService, IdentityService, RecordStore};

/// Process-wide services shared by every handler. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub model: Arc<HeartModelService>,
    pub identity: Arc<IdentityService>,
    pub records: Arc<RecordStore>,
    pub gemini: Arc<GeminiService>,
    cookie_key: Key,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let model = HeartModelService::load(&config.model_path)
            .with_context(|| format!("Failed to load model from {}", config.model_path.display()))?;
        let client = http_client(config.upstream_timeout)?;

        let cookie_key = match &config.session_secret {
            Some(secret) => Key::try_from(secret.as_bytes())
                .context("SESSION_SECRET must be at least 64 bytes")?,
            None => {
                tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
                Key::generate()
            }
        };

        Ok(Self {
            identity: Arc::new(IdentityService::new(client.clone(), &config.firebase)),
            records: Arc::new(RecordStore::new(client.clone(), &config.firebase)),
            gemini: Arc::new(GeminiService::new(client, &config.gemini)),
            model: Arc::new(model),
            config: Arc::new(config),
            cookie_key,
        })
    }

    /// Whether cookies must carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.config.is_production()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
