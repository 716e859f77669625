use dioxus::prelude::*;
use wastesort_client::ClassifierClient;
use wastesort_core::{ClassifierConfig, Completion, SelectedFile};
use wastesort_io::notify::warn_user;
use wastesort_io::{BlobPreviews, BrowserController, ClassifyButton, PreviewPicker, ResultPanel};

/// Classifier backend, fixed at build time by `build.rs`.
const BACKEND_URL: &str = env!("WASTESORT_BACKEND_URL");

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Parses the build-time backend configuration once and mounts the
/// classifier, or an error panel if the configuration is unusable.
fn app() -> Element {
    let config = use_hook(|| {
        ClassifierConfig::new(BACKEND_URL).map_err(|e| {
            tracing::error!(backend_url = BACKEND_URL, error = %e, "invalid backend configuration");
            e.to_string()
        })
    });

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/style.css") }

        div { class: "page",
            header { class: "page-header",
                h1 { "AI Waste Classifier" }
                p { class: "muted", "Sort Smarter. Sustain Our Future." }
            }

            match config {
                Ok(config) => rsx! { Classifier { config } },
                Err(err) => rsx! {
                    div { class: "config-error",
                        p { "The classifier backend is misconfigured: {err}" }
                    }
                },
            }
        }
    }
}

/// Owns the controller and wires the picker, result panel and classify
/// button to it.
///
/// All selection changes go through the controller, which keeps the blob
/// URL preview in step with the selection and revokes it on unmount.
#[component]
fn Classifier(config: ClassifierConfig) -> Element {
    let client = use_hook(|| {
        tracing::info!(backend_url = config.backend_base_url(), "classifier ready");
        ClassifierClient::new(config.clone())
    });
    let mut controller = use_signal(|| BrowserController::new(config.clone(), BlobPreviews));

    use_drop(move || {
        if let Ok(mut c) = controller.try_write() {
            c.teardown();
        }
    });

    // --- File picker handler ---
    let on_files = move |files: Vec<SelectedFile>| {
        controller.write().file_chosen(files);
    };

    // --- Classify handler ---
    // The request runs in a spawned task; the controller discards its
    // outcome if the user has moved on in the meantime.
    let on_classify = move |()| {
        let begun = controller.write().begin_upload();
        let pending = match begun {
            Ok(pending) => pending,
            Err(err) => {
                warn_user(err);
                return;
            }
        };

        let client = client.clone();
        spawn(async move {
            let outcome = client.send(pending.request).await;
            let completion = controller.write().complete_upload(pending.ticket, outcome);
            if let Completion::Failed(err) = completion {
                warn_user(err);
            }
        });
    };

    let (preview_src, result, loading, disabled) = {
        let c = controller.read();
        (
            c.preview_src().map(str::to_owned),
            c.result().cloned(),
            c.is_loading(),
            c.upload_disabled(),
        )
    };

    rsx! {
        PreviewPicker { preview_src, on_files }
        ResultPanel { result }
        ClassifyButton { loading, disabled, on_click: on_classify }
    }
}
