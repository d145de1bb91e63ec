use serde::Deserialize;
use thiserror::Error;

// Helper struct to parse the JSON error body the maps API attaches to
// non-OK responses.
#[derive(Deserialize, Debug)]
pub struct ApiErrorPayload {
    pub status: String,
    pub error_message: Option<String>,
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("No results for query: {0}")]
    NoResults(String),

    // This variant holds the structured error from the API
    #[error("API error ({status}): {message}")]
    ApiError { status: String, message: String },

    // A fallback for when we get an error that isn't in the expected JSON format
    #[error("Unstructured API error: {0}")]
    RawApiError(String),

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}
