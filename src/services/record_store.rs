use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{error, info};

use crate::config::FirebaseConfig;
use crate::error::AppError;
use crate::models::{PredictionRecord, StoredPrediction, UserProfile};
use crate::services::upstream::error_message;

#[derive(Deserialize)]
struct PushResponse {
    name: String,
}

/// User-scoped documents in the Firebase realtime database.
///
/// Layout: `users/{uid}` holds the profile, `predictions/{uid}/{autoId}` holds
/// one entry per prediction.
pub struct RecordStore {
    client: Client,
    database_url: String,
    auth_secret: Option<String>,
}

impl RecordStore {
    pub fn new(client: Client, config: &FirebaseConfig) -> Self {
        Self {
            client,
            database_url: config.database_url.trim_end_matches('/').to_string(),
            auth_secret: config.database_secret.clone(),
        }
    }

    pub async fn get_user(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        let response = self.send(self.client.get(self.url("users", uid))).await?;
        response
            .json::<Option<UserProfile>>()
            .await
            .map_err(|e| AppError::UpstreamStorage(format!("unexpected profile data: {}", e)))
    }

    pub async fn put_user(&self, uid: &str, profile: &UserProfile) -> Result<(), AppError> {
        self.send(self.client.put(self.url("users", uid)).json(profile))
            .await?;
        Ok(())
    }

    /// Append a record and return the key the database assigned to it.
    pub async fn push_prediction(&self, uid: &str, record: &PredictionRecord) -> Result<String, AppError> {
        let response = self
            .send(self.client.post(self.url("predictions", uid)).json(record))
            .await?;
        let pushed = response
            .json::<PushResponse>()
            .await
            .map_err(|e| AppError::UpstreamStorage(format!("unexpected push response: {}", e)))?;

        info!(uid = %uid, key = %pushed.name, prediction = %record.prediction, "Stored prediction");
        Ok(pushed.name)
    }

    /// All records for a user, oldest first.
    pub async fn list_predictions(&self, uid: &str) -> Result<Vec<StoredPrediction>, AppError> {
        let response = self.send(self.client.get(self.url("predictions", uid))).await?;
        // push keys sort chronologically
        let records = response
            .json::<Option<BTreeMap<String, PredictionRecord>>>()
            .await
            .map_err(|e| AppError::UpstreamStorage(format!("unexpected prediction data: {}", e)))?
            .unwrap_or_default();

        Ok(records
            .into_iter()
            .map(|(id, record)| StoredPrediction { id, record })
            .collect())
    }

    fn url(&self, collection: &str, uid: &str) -> String {
        format!(
            "{}/{}/{}.json",
            self.database_url,
            collection,
            urlencoding::encode(uid)
        )
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let request = match &self.auth_secret {
            Some(secret) => request.query(&[("auth", secret)]),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|e| AppError::UpstreamStorage(e.to_string()))?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            error!("Database request failed: {}", message);
            return Err(AppError::UpstreamStorage(message));
        }

        Ok(response)
    }
}
