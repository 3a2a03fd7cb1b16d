use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use crate::config::FirebaseConfig;
use crate::error::AppError;
use crate::models::AuthenticatedUser;
use crate::services::upstream::error_message;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'static str,
    email: &'a str,
}

/// Email/password accounts on the Firebase identity toolkit.
pub struct IdentityService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl IdentityService {
    pub fn new(client: Client, config: &FirebaseConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.identity_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        let user = self.password_call("signInWithPassword", email, password).await?;
        info!(uid = %user.local_id, "Signed in");
        Ok(user)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        let user = self.password_call("signUp", email, password).await?;
        info!(uid = %user.local_id, "Created account");
        Ok(user)
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        let body = OobCodeRequest {
            request_type: "PASSWORD_RESET",
            email,
        };
        let response = self
            .client
            .post(self.endpoint("sendOobCode"))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            error!("Password reset request failed: {}", message);
            return Err(AppError::UpstreamAuth(message));
        }

        Ok(())
    }

    async fn password_call(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AppError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let response = self
            .client
            .post(self.endpoint(action))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            error!("Identity {} failed: {}", action, message);
            return Err(AppError::UpstreamAuth(message));
        }

        response
            .json::<AuthenticatedUser>()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("unexpected identity response: {}", e)))
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v1/accounts:{}", self.base_url, action)
    }
}
