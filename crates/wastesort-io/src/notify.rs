//! Blocking user warnings.
//!
//! Warnings are shown with `window.alert()`, which blocks until the user
//! dismisses it. Outside a browser window the message goes to the console
//! instead.

use wastesort_core::UploadError;

/// Show `message` in a blocking browser dialog.
pub fn alert(message: &str) {
    let shown = web_sys::window().is_some_and(|window| window.alert_with_message(message).is_ok());
    if !shown {
        web_sys::console::warn_1(&message.into());
    }
}

/// Show the user-facing text of an upload warning.
pub fn warn_user(err: UploadError) {
    tracing::warn!(%err, "showing warning");
    alert(&err.to_string());
}
