use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct PrecautionsRequest {
    #[serde(default)]
    pub prediction: String,
    /// Free-form health data echoed back from the result page.
    #[serde(default)]
    pub user_data: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PrecautionsResponse {
    pub precautions: String,
}

#[derive(Debug, Deserialize)]
pub struct DietRequest {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub health_issue: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DietResponse {
    pub diet_plan: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}
