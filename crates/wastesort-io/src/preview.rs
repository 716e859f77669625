//! Blob URL previews for selected images.
//!
//! Wraps the selected file's bytes in a `Blob` and exposes it through
//! `URL.createObjectURL` so an `<img>` can show it without a round-trip.
//! [`BlobUrl`] revokes its URL when dropped, which is how the controller
//! releases a superseded preview.
//!
//! Creating a preview requires a browser environment
//! (`wasm32-unknown-unknown` target).

use wasm_bindgen::JsValue;
use wastesort_core::{PreviewFactory, PreviewHandle, SelectedFile};
use web_sys::BlobPropertyBag;

/// Errors that can occur when creating a preview.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for PreviewError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// An object URL that is revoked on drop.
#[derive(Debug, PartialEq, Eq)]
pub struct BlobUrl(String);

impl BlobUrl {
    /// Wrap `bytes` in a `Blob` of the given MIME type and create an
    /// object URL for it.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::JsError`] if Blob or URL creation fails.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, PreviewError> {
        let uint8_array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&uint8_array);

        let opts = BlobPropertyBag::new();
        opts.set_type(mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)?;
        Ok(Self(url))
    }

    /// The `blob:` URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PreviewHandle for BlobUrl {
    fn src(&self) -> &str {
        &self.0
    }
}

impl Drop for BlobUrl {
    fn drop(&mut self) {
        // Best-effort: the URL may already be gone with its document.
        let _ = web_sys::Url::revoke_object_url(&self.0);
        tracing::trace!(url = %self.0, "revoked preview URL");
    }
}

/// Preview factory producing [`BlobUrl`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobPreviews;

impl PreviewFactory for BlobPreviews {
    type Handle = BlobUrl;
    type Error = PreviewError;

    fn create(&mut self, file: &SelectedFile) -> Result<Self::Handle, Self::Error> {
        BlobUrl::from_bytes(file.bytes(), file.content_type())
    }
}
