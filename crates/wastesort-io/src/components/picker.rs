//! Circular image preview that doubles as the file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use wastesort_core::SelectedFile;
use wastesort_core::view::PREVIEW_PLACEHOLDER;

/// Accept filter for the hidden file input. Best-effort only: browsers
/// may still offer other files.
const ACCEPT: &str = "image/*";

/// Props for the [`PreviewPicker`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PreviewPickerProps {
    /// Source of the current preview image, if any.
    preview_src: Option<String>,
    /// Called with the chosen files (possibly empty) on every change.
    on_files: EventHandler<Vec<SelectedFile>>,
}

/// A circular area showing the selected image (or a placeholder) that
/// opens the file picker when clicked.
///
/// The `<input type="file">` is hidden inside a `<label>`, so a click
/// anywhere in the circle opens the picker.
#[component]
pub fn PreviewPicker(props: PreviewPickerProps) -> Element {
    let mut error = use_signal(|| Option::<String>::None);
    let mut changes = use_signal(ChangeSequence::default);

    // Reads can finish out of order; only the most recent change may
    // reach the controller.
    let handle_files = move |evt: FormEvent| async move {
        let change = changes.write().next();
        let read = read_files(evt.files()).await;
        if !changes.peek().is_latest(change) {
            tracing::debug!(change, "discarding superseded file read");
            return;
        }
        let (files, err) = settle(read);
        error.set(err);
        props.on_files.call(files);
    };

    rsx! {
        label { class: "preview-circle",
            input {
                r#type: "file",
                accept: ACCEPT,
                class: "hidden",
                onchange: handle_files,
            }

            if let Some(ref src) = props.preview_src {
                img { src: "{src}", alt: "Preview", class: "preview-image" }
            } else {
                span { class: "preview-placeholder", "{PREVIEW_PLACEHOLDER}" }
            }
        }

        if let Some(ref err) = error() {
            p { class: "text-error", "{err}" }
        }
    }
}

/// Numbers input changes so a finished read can tell whether it is
/// still the most recent one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ChangeSequence {
    latest: u64,
}

impl ChangeSequence {
    /// Register a new change and return its number.
    const fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    const fn is_latest(self, change: u64) -> bool {
        change == self.latest
    }
}

/// Split a finished read into the selection to report and the error to
/// show. A failed read reports an empty selection so the previous
/// preview and result are cleared.
fn settle(read: Result<Vec<SelectedFile>, String>) -> (Vec<SelectedFile>, Option<String>) {
    match read {
        Ok(files) => (files, None),
        Err(e) => (Vec::new(), Some(e)),
    }
}

/// Read the first chosen file into memory.
///
/// Only the first file is ever selected, so the rest are not read.
async fn read_files(files: Vec<FileData>) -> Result<Vec<SelectedFile>, String> {
    let Some(file) = files.first() else {
        return Ok(Vec::new());
    };
    let name = file.name();
    match file.read_bytes().await {
        Ok(bytes) => Ok(vec![
            SelectedFile::new(name, bytes.to_vec()).with_reported_type(file.content_type()),
        ]),
        Err(e) => {
            tracing::warn!(file = %name, error = %e, "failed to read file");
            Err(format!("Failed to read file: {e}"))
        }
    }
}
