//! Wire codec for the `POST /predict` contract.
//!
//! The request side is a transport-agnostic description of a one-part
//! multipart form; the response side classifies a raw status/body pair
//! into a [`PredictionResult`] or a [`ResponseError`].

use crate::config::ClassifierConfig;
use crate::types::{PredictionResult, SelectedFile};

/// Multipart field name carrying the image.
pub const FILE_FIELD: &str = "file";

/// A multipart upload, ready for a transport to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Absolute endpoint URL.
    pub url: String,
    /// Multipart field name (always [`FILE_FIELD`]).
    pub field: &'static str,
    /// Filename attached to the part.
    pub file_name: String,
    /// MIME type attached to the part.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    /// Describe a classification upload of `file` to the configured backend.
    #[must_use]
    pub fn predict(config: &ClassifierConfig, file: &SelectedFile) -> Self {
        Self {
            url: config.predict_url(),
            field: FILE_FIELD,
            file_name: file.name().to_owned(),
            content_type: file.content_type().to_owned(),
            bytes: file.bytes().to_vec(),
        }
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, uninspected unless the status is a success.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Reasons a completed exchange did not yield a prediction.
///
/// These are diagnostics for logs; the user only ever sees the generic
/// classification failure.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// The service answered with a non-2xx status.
    #[error("server responded with {0}")]
    Status(u16),

    /// The body of a 2xx response was not a prediction.
    #[error("malformed prediction body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Classify a raw response into a prediction.
///
/// # Errors
///
/// Returns [`ResponseError::Status`] for any non-2xx status, without
/// looking at the body.
/// Returns [`ResponseError::Decode`] if a 2xx body is not a JSON object
/// with a string `prediction` and a numeric `confidence`.
pub fn decode_prediction(response: &RawResponse) -> Result<PredictionResult, ResponseError> {
    if !response.is_success() {
        return Err(ResponseError::Status(response.status));
    }
    Ok(serde_json::from_slice(&response.body)?)
}
