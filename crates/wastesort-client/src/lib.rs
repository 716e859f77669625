//! wastesort-client: HTTP transport for the classifier contract.
//!
//! Sends the [`UploadRequest`]s produced by the controller as multipart
//! POSTs and hands back the raw status/body pair for the controller to
//! classify. Built on `reqwest`, so the same code runs in the browser
//! (`wasm32-unknown-unknown`, backed by `fetch`) and natively.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;
use wastesort_core::{ClassifierConfig, RawResponse, UploadRequest};

/// Errors raised before a response status is available.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The multipart part could not be built (invalid MIME type).
    #[error("invalid upload part: {0}")]
    InvalidPart(String),

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The health check answered with a non-2xx status.
    #[error("service responded with {0}")]
    Status(u16),
}

/// Body of the service's root endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceStatus {
    /// Human-readable service status line.
    pub status: String,
}

/// Thin wrapper over a shared `reqwest::Client`.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    http: reqwest::Client,
    config: ClassifierConfig,
}

impl ClassifierClient {
    /// Create a client for the given backend.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_http(http: reqwest::Client, config: ClassifierConfig) -> Self {
        Self { http, config }
    }

    /// The backend this client talks to.
    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Send an upload and collect the raw response.
    ///
    /// Any HTTP status is returned as `Ok`; classifying it is the
    /// controller's job. The request is consumed so its bytes move into
    /// the multipart body without another copy.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidPart`] if the request's MIME type
    /// is not a valid media type.
    /// Returns [`TransportError::Http`] on connection failure or if the
    /// body cannot be read.
    #[allow(clippy::future_not_send)] // reqwest futures are !Send on wasm32
    pub async fn send(&self, request: UploadRequest) -> Result<RawResponse, TransportError> {
        let UploadRequest {
            url,
            field,
            file_name,
            content_type,
            bytes,
        } = request;

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(|e| TransportError::InvalidPart(e.to_string()))?;
        let form = Form::new().part(field, part);

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = Vec::from(response.bytes().await?);

        debug!(status, bytes = body.len(), url = %url, "upload response");
        Ok(RawResponse { status, body })
    }

    /// Ask the service root for its status line.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the request fails or the body is
    /// not a status object.
    /// Returns [`TransportError::Status`] for a non-2xx status.
    #[allow(clippy::future_not_send)] // reqwest futures are !Send on wasm32
    pub async fn health(&self) -> Result<ServiceStatus, TransportError> {
        let response = self.http.get(self.config.health_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}
