use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::{error, warn};

use super::pages::RenderParts;
use super::views;
use crate::error::AppError;
use crate::models::{
    ChatRequest, ChatResponse, DietRequest, DietResponse, PrecautionsRequest, PrecautionsResponse,
};
use crate::services::prompts;
use crate::state::AppState;

pub const EMPTY_CHAT_REPLY: &str = "Please type something so I can help you.";

/// Generated precautions, diet plans and chat replies
pub fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route("/get_precautions", post(get_precautions))
        .route("/generate_diet", post(generate_diet))
        .route("/chatbot", get(chatbot_page).post(chat))
}

fn rejected(rejection: JsonRejection) -> (StatusCode, String) {
    warn!("Rejected request body: {}", rejection.body_text());
    (StatusCode::BAD_REQUEST, format!("Error: {}", rejection.body_text()))
}

/// Generated text, or the error line shown in its place.
fn generated_text(call_site: &str, result: Result<String, AppError>) -> String {
    result.unwrap_or_else(|e| {
        error!("Generation for {} failed: {}", call_site, e);
        format!("Error: {}", e)
    })
}

/// Precautions for a predicted condition
#[tracing::instrument(skip(state, payload))]
async fn get_precautions(
    State(state): State<AppState>,
    payload: Result<Json<PrecautionsRequest>, JsonRejection>,
) -> (StatusCode, Json<PrecautionsResponse>) {
    let (status, precautions) = match payload {
        Ok(Json(request)) => {
            let health_data = prompts::format_json_health_data(&request.user_data);
            let prompt = prompts::precautions_prompt(&request.prediction, &health_data);
            let text = generated_text("precautions", state.gemini.generate(&prompt).await);
            (StatusCode::OK, text)
        }
        Err(rejection) => rejected(rejection),
    };
    (status, Json(PrecautionsResponse { precautions }))
}

/// Diet plan for the reason behind a prediction and any other health issue
#[tracing::instrument(skip(state, payload))]
async fn generate_diet(
    State(state): State<AppState>,
    payload: Result<Json<DietRequest>, JsonRejection>,
) -> (StatusCode, Json<DietResponse>) {
    let (status, diet_plan) = match payload {
        Ok(Json(request)) => {
            let prompt = prompts::diet_prompt(&request.reason, &request.health_issue);
            let text = generated_text("diet plan", state.gemini.generate(&prompt).await);
            (StatusCode::OK, text)
        }
        Err(rejection) => rejected(rejection),
    };
    (status, Json(DietResponse { diet_plan }))
}

async fn chatbot_page(jar: PrivateCookieJar) -> (PrivateCookieJar, Html<String>) {
    let (jar, parts) = RenderParts::take(jar);
    (jar, views::chatbot(&parts.context()))
}

/// One stateless chat turn
#[tracing::instrument(skip(state, payload))]
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatResponse>) {
    let (status, reply) = match payload {
        Ok(Json(request)) => {
            let message = request.message.trim();
            let reply = if message.is_empty() {
                EMPTY_CHAT_REPLY.to_string()
            } else {
                let prompt = prompts::chat_prompt(message);
                generated_text("chat", state.gemini.generate(&prompt).await)
            };
            (StatusCode::OK, reply)
        }
        Err(rejection) => rejected(rejection),
    };
    (status, Json(ChatResponse { reply }))
}
