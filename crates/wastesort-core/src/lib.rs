//! wastesort-core: Classifier controller and wire codec (sans-IO).
//!
//! Models the select -> preview -> upload -> result lifecycle of the
//! waste classifier front-end as a plain state machine:
//!
//! 1. A file is chosen and becomes the selection (previous result cleared)
//! 2. The preview resource for the selection is (re)created
//! 3. An upload is begun, producing a multipart request description
//! 4. The transport outcome is applied, storing the prediction or failing
//!
//! This crate has **no I/O dependencies** -- the network round-trip and the
//! preview resource are supplied by callers. All browser interaction lives
//! in `wastesort-io`, the HTTP transport in `wastesort-client`.

pub mod config;
pub mod controller;
pub mod preview;
pub mod request;
pub mod types;
pub mod view;

pub use config::{ClassifierConfig, ConfigError};
pub use controller::{Completion, Controller, PendingUpload, Phase, UploadError, UploadTicket};
pub use preview::{InertPreview, PreviewFactory, PreviewHandle};
pub use request::{RawResponse, ResponseError, UploadRequest};
pub use types::{KNOWN_CLASSES, PredictionResult, SelectedFile};
