//! Dioxus UI components for wastesort.
//!
//! Provides the circular preview/picker, the prediction result panel and
//! the classify button.

mod classify_button;
mod picker;
mod result_panel;

pub use classify_button::ClassifyButton;
pub use picker::PreviewPicker;
pub use result_panel::ResultPanel;
