use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_USERNAME: &str = "User";

/// Profile stored under `users/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Account returned by the identity backend after sign-in or sign-up.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub local_id: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub username: String,
}

impl RegisterForm {
    /// Username to store, falling back to the email's local part.
    pub fn display_name(&self) -> String {
        let name = self.username.trim();
        if !name.is_empty() {
            return name.to_string();
        }
        self.email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or(DEFAULT_USERNAME)
            .to_string()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordForm {
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}
