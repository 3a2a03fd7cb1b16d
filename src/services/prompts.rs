//! Prompt templates for the generative-text call sites.

use serde_json::Value;

/// Render health data as one `name: value` line per entry.
pub fn format_health_data<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let lines: Vec<String> = pairs
        .into_iter()
        .map(|(name, value)| format!("- {}: {}", name, value))
        .collect();
    if lines.is_empty() {
        "(no data provided)".to_string()
    } else {
        lines.join("\n")
    }
}

/// Same as [`format_health_data`] for an arbitrary JSON payload.
pub fn format_json_health_data(data: &Value) -> String {
    match data {
        Value::Object(map) => {
            let rendered: Vec<(String, String)> = map
                .iter()
                .map(|(k, v)| (k.clone(), scalar_text(v)))
                .collect();
            format_health_data(rendered.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        }
        Value::Null => format_health_data(std::iter::empty()),
        other => other.to_string(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn explanation_prompt(prediction: &str, health_data: &str) -> String {
    format!(
        "The user has the following health data:\n{}\n\
         The predicted heart disease type is: {}.\n\
         Explain ONLY the possible medical reason for this prediction based on the data \
         with some emojis for better understanding.",
        health_data, prediction
    )
}

pub fn precautions_prompt(prediction: &str, health_data: &str) -> String {
    format!(
        "The user has the following health data:\n{}\n\
         The diagnosed heart disease type is: {}.\n\
         Provide the TOP 8 most important medical precautions step by step \
         with some emojis for better understanding.",
        health_data, prediction
    )
}

pub fn diet_prompt(reason: &str, health_issue: &str) -> String {
    format!(
        "Based on this reason for heart disease:\n{}\n\
         And considering this additional health issue: {},\n\
         create a detailed, healthy diet plan with some emojis to keep the user engaged \
         and make it easy to understand.",
        reason, health_issue
    )
}

pub fn chat_prompt(message: &str) -> String {
    format!(
        "You are CardioPredict's virtual heart health assistant.\n\
         The user says: {}.\n\
         Answer clearly and helpfully about heart health, precautions, or diet.",
        message
    )
}
