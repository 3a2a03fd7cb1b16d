use thiserror::Error;

use crate::models::ValidationError;

/// Failures caught at the route boundary and shown to the user as text.
///
/// Upstream variants carry the message reported by the remote service so it
/// can be shown verbatim.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    UpstreamAuth(String),
    #[error("{0}")]
    UpstreamStorage(String),
    #[error("{0}")]
    UpstreamGeneration(String),
    #[error("Model error: {0}")]
    Model(String),
}
