//! Shared types for the classifier front-end.

use serde::{Deserialize, Serialize};

/// Class names produced by the reference waste classification model.
///
/// Informational only: labels outside this list are accepted and
/// displayed like any other.
pub const KNOWN_CLASSES: [&str; 5] = [
    "Aluminum_Cans",
    "Cardboard",
    "Glass_Bottles",
    "HDPE_Containers",
    "PET_Bottles",
];

/// Fallback MIME type when the file extension is not a known image type.
const OCTET_STREAM: &str = "application/octet-stream";

/// An image chosen by the user, held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    /// Create a selection, deriving the MIME type from the file extension.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = content_type_for(&name).to_owned();
        Self {
            name,
            content_type,
            bytes,
        }
    }

    /// Override the MIME type reported by the file picker.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Use the MIME type the picker reported, if it reported one.
    ///
    /// Browsers leave the type empty for files they cannot identify; the
    /// extension-derived type is kept in that case.
    #[must_use]
    pub fn with_reported_type(self, reported: Option<impl AsRef<str>>) -> Self {
        match reported {
            Some(ty) if !ty.as_ref().trim().is_empty() => {
                let ty = ty.as_ref().trim().to_owned();
                self.with_content_type(ty)
            }
            _ => self,
        }
    }

    /// Original filename, as reported by the picker.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type sent with the upload and used for the preview blob.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Raw file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the file in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the file has no contents.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Map a filename to an image MIME type by its extension.
///
/// Unknown or missing extensions map to `application/octet-stream`.
#[must_use]
pub fn content_type_for(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return OCTET_STREAM;
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => OCTET_STREAM,
    }
}

/// Classification returned by the remote service.
///
/// Deserialized atomically: a body missing either field is rejected as a
/// whole, so a result is never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Raw class label, e.g. `"PET_Bottles"`.
    pub prediction: String,
    /// Confidence as reported by the service (not rescaled).
    pub confidence: f64,
}

impl PredictionResult {
    /// Label for display, with underscores replaced by spaces.
    #[must_use]
    pub fn display_label(&self) -> String {
        crate::view::display_label(&self.prediction)
    }

    /// Confidence for display, verbatim.
    #[must_use]
    pub fn display_confidence(&self) -> String {
        crate::view::display_confidence(self.confidence)
    }

    /// Whether the label is one of [`KNOWN_CLASSES`].
    #[must_use]
    pub fn is_known_class(&self) -> bool {
        KNOWN_CLASSES.contains(&self.prediction.as_str())
    }
}
