use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Identity toolkit and realtime database settings for the Firebase project.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub identity_url: String,
    pub database_url: String,
    /// Sent as the `auth` query parameter on database requests when present.
    pub database_secret: Option<String>,
}

impl FirebaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: env::var("FIREBASE_API_KEY").context("FIREBASE_API_KEY must be set")?,
            identity_url: env::var("FIREBASE_IDENTITY_URL")
                .unwrap_or_else(|_| DEFAULT_IDENTITY_URL.to_string()),
            database_url: env::var("FIREBASE_DATABASE_URL")
                .context("FIREBASE_DATABASE_URL must be set")?,
            database_secret: env::var("FIREBASE_DATABASE_SECRET").ok(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string()),
        })
    }
}
