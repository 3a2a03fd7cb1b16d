use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::upstream::{FirebaseConfig, GeminiConfig};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub session_secret: Option<String>,
    pub model_path: PathBuf,
    pub upstream_timeout: Duration,
    pub firebase: FirebaseConfig,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let session_secret = env::var("SESSION_SECRET").ok();
        let model_path = env::var("MODEL_PATH")
            .unwrap_or_else(|_| "models/heart_model.json".to_string())
            .into();
        let timeout_secs = env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
            session_secret,
            model_path,
            upstream_timeout: Duration::from_secs(timeout_secs),
            firebase: FirebaseConfig::from_env().context("Invalid Firebase configuration")?,
            gemini: GeminiConfig::from_env().context("Invalid Gemini configuration")?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
