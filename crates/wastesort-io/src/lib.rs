//! wastesort-io: Browser I/O and Dioxus component library.
//!
//! Provides blob-URL image previews, blocking user warnings, and the
//! reusable UI pieces (preview picker, result panel, classify button)
//! for the wastesort web application.

pub mod components;
pub mod notify;
pub mod preview;

pub use components::{ClassifyButton, PreviewPicker, ResultPanel};
pub use preview::{BlobPreviews, BlobUrl, PreviewError};

/// The controller as used in the browser: previews are blob URLs.
pub type BrowserController = wastesort_core::Controller<BlobPreviews>;
