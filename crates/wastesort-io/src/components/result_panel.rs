//! Prediction result panel.

use dioxus::prelude::*;
use wastesort_core::PredictionResult;

/// Props for the [`ResultPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultPanelProps {
    /// The current prediction. `None` renders nothing.
    result: Option<PredictionResult>,
}

/// Shows the predicted label (underscores as spaces) and the confidence
/// exactly as the service reported it.
#[component]
pub fn ResultPanel(props: ResultPanelProps) -> Element {
    let Some(ref result) = props.result else {
        return rsx! {};
    };
    let label = result.display_label();
    let confidence = result.display_confidence();

    rsx! {
        div { class: "result-panel",
            p { class: "result-label", "{label}" }
            p { class: "result-confidence", "Confidence: {confidence}" }
        }
    }
}
