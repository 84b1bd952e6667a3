use axum::{
    http::StatusCode,
    response::{
        IntoResponse,
        Response,
    },
};

/// Failures of a single scrape. None of these are fatal to the exporter.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScrapeError {
    /// Transport failure, timeout or a non-200 answer from Logstash.
    #[error("failed to GET {url}: {reason}")]
    Fetch { url: String, reason: String },
    /// Logstash answered 200 but the body was not the expected JSON document.
    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
    /// A label-value sequence did not match its descriptor.
    #[error("metric {metric} expects {expected} label values, got {got}")]
    Cardinality {
        metric: String,
        expected: usize,
        got: usize,
    },
}

impl ScrapeError {
    pub fn is_decode(&self) -> bool {
        matches!(self, ScrapeError::Decode { .. })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Encoding the metrics exposition failed: {0}")]
    Exposition(#[from] prometheus::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
