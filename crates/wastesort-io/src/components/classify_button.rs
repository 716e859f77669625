//! The classify action button.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdRecycle;
use wastesort_core::view::button_label;

/// Props for the [`ClassifyButton`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ClassifyButtonProps {
    /// Whether a request is in flight (changes the label).
    loading: bool,
    /// Whether the button is disabled.
    disabled: bool,
    /// Called when the enabled button is clicked.
    on_click: EventHandler<()>,
}

/// Recycling icon above a "Classify Image" / "Classifying..." button.
#[component]
pub fn ClassifyButton(props: ClassifyButtonProps) -> Element {
    let label = button_label(props.loading);

    rsx! {
        div { class: "recycle-icon",
            Icon { width: 50, height: 50, icon: LdRecycle }
        }
        button {
            class: "classify-button",
            disabled: props.disabled,
            onclick: move |_| props.on_click.call(()),
            "{label}"
        }
    }
}
