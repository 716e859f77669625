//! Preview resources derived from the current selection.
//!
//! A preview is a scoped resource: the controller owns at most one
//! [`PreviewHandle`] at a time and frees it by dropping it. Implementations
//! release their backing store (e.g. revoke a blob URL) in `Drop`.

use crate::types::SelectedFile;

/// A live, locally-resolvable reference to the selected image.
pub trait PreviewHandle {
    /// Source string suitable for an `<img src>`.
    fn src(&self) -> &str;
}

/// Creates preview handles for new selections.
pub trait PreviewFactory {
    /// The handle type; dropping it releases the preview.
    type Handle: PreviewHandle;
    /// Error returned when a preview cannot be created.
    type Error: std::fmt::Display;

    /// Create a preview for `file`.
    ///
    /// # Errors
    ///
    /// Returns an implementation-defined error if the backing resource
    /// cannot be allocated.
    fn create(&mut self, file: &SelectedFile) -> Result<Self::Handle, Self::Error>;
}

/// Preview factory for headless use, where nothing is displayed.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertPreview;

/// Handle produced by [`InertPreview`]; its source is the filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InertHandle(String);

impl PreviewHandle for InertHandle {
    fn src(&self) -> &str {
        &self.0
    }
}

impl PreviewFactory for InertPreview {
    type Handle = InertHandle;
    type Error = std::convert::Infallible;

    fn create(&mut self, file: &SelectedFile) -> Result<Self::Handle, Self::Error> {
        Ok(InertHandle(file.name().to_owned()))
    }
}
