use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use std::collections::HashMap;
use tracing::{error, info, warn};

use super::pages::RenderParts;
use super::views;
use crate::auth::Flash;
use crate::models::{HeartCondition, HeartFeatures, PredictionRecord};
use crate::services::prompts;
use crate::state::AppState;

/// Prediction form and result page
pub fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/index", get(prediction_page).post(predict))
        .route("/result", get(result))
}

async fn prediction_page(jar: PrivateCookieJar) -> (PrivateCookieJar, Html<String>) {
    let (jar, parts) = RenderParts::take(jar);
    (jar, views::prediction_form(&parts.context(), None))
}

/// Classify the submitted measurements and redirect to the result page
#[tracing::instrument(skip(state, jar, input))]
async fn predict(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    input: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let (mut jar, parts) = RenderParts::take(jar);

    let parsed = match input {
        Ok(Form(input)) => HeartFeatures::from_form(&input).map_err(|e| {
            warn!("Rejected prediction input: {}", e);
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }),
        Err(rejection) => {
            warn!("Rejected prediction request: {}", rejection.body_text());
            Err((rejection.status(), rejection.body_text()))
        }
    };
    let features = match parsed {
        Ok(features) => features,
        Err((status, message)) => {
            let message = format!("Error: {}", message);
            return (
                status,
                jar,
                views::prediction_form(&parts.context(), Some(&message)),
            )
                .into_response();
        }
    };

    let prediction = state.model.predict(&features);
    info!(prediction = %prediction, "Prediction complete");

    if let Some(session) = &parts.user {
        let record = PredictionRecord {
            data: features,
            prediction,
        };
        if let Err(e) = state.records.push_prediction(&session.uid, &record).await {
            error!(uid = %session.uid, "Failed to store prediction: {}", e);
            jar = Flash::danger(format!("Error: {}", e)).store(jar, state.secure_cookies());
        }
    }

    (jar, Redirect::to(&result_url(prediction, &features))).into_response()
}

/// `/result` location carrying the label and every feature.
pub fn result_url(prediction: HeartCondition, features: &HeartFeatures) -> String {
    let mut url = format!("/result?prediction={}", urlencoding::encode(prediction.label()));
    for (name, value) in features.named_values() {
        url.push('&');
        url.push_str(name);
        url.push('=');
        url.push_str(&urlencoding::encode(&value));
    }
    url
}

/// Explain a prediction in plain language
#[tracing::instrument(skip(state, jar, params))]
async fn result(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let (jar, parts) = RenderParts::take(jar);

    let mut prediction = None;
    let mut health_data = Vec::new();
    for (name, value) in params {
        if name == "prediction" {
            prediction = Some(value);
        } else {
            health_data.push((name, value));
        }
    }
    let Some(prediction) = prediction.as_deref().and_then(HeartCondition::from_label) else {
        return (jar, Redirect::to("/index")).into_response();
    };
    let prediction = prediction.label();

    let data_text =
        prompts::format_health_data(health_data.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let prompt = prompts::explanation_prompt(prediction, &data_text);
    let reason = match state.gemini.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            error!("Explanation generation failed: {}", e);
            format!("Gemini API Error: {}", e)
        }
    };

    (
        jar,
        views::result(&parts.context(), prediction, &reason, &health_data),
    )
        .into_response()
}
