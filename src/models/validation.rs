use std::collections::HashMap;
use thiserror::Error;

/// Malformed user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("could not convert '{field}' to {expected}: {value:?}")]
    NotNumeric {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{0}")]
    Invalid(String),
}

fn required<'a>(
    input: &'a HashMap<String, String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    input
        .get(field)
        .map(|v| v.trim())
        .ok_or(ValidationError::MissingField(field))
}

/// Parse a categorical code field.
pub fn parse_int(input: &HashMap<String, String>, field: &'static str) -> Result<i64, ValidationError> {
    let raw = required(input, field)?;
    raw.parse().map_err(|_| ValidationError::NotNumeric {
        field,
        expected: "an integer",
        value: raw.to_string(),
    })
}

/// Parse a measured quantity. Non-finite values are rejected.
pub fn parse_float(input: &HashMap<String, String>, field: &'static str) -> Result<f64, ValidationError> {
    let raw = required(input, field)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::NotNumeric {
            field,
            expected: "a number",
            value: raw.to_string(),
        })
}

/// Flatten `validator` output into a single line for inline display.
pub fn describe_errors(errors: &validator::ValidationErrors) -> String {
    errors.to_string().replace('\n', "; ")
}
