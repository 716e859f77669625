//! Text shown by the front-end.

/// Button text while no request is in flight.
pub const CLASSIFY_LABEL: &str = "Classify Image";

/// Button text while a request is in flight.
pub const CLASSIFYING_LABEL: &str = "Classifying...";

/// Placeholder shown in the preview area before a file is chosen.
pub const PREVIEW_PLACEHOLDER: &str = "Click to select image";

/// Label for display: underscores become spaces.
///
/// `"Glass_Bottles"` -> `"Glass Bottles"`.
#[must_use]
pub fn display_label(prediction: &str) -> String {
    prediction.replace('_', " ")
}

/// Confidence for display, verbatim.
///
/// No rounding, unit, or scaling is applied; the value is printed as the
/// shortest decimal that round-trips (`0.93` -> `"0.93"`, `100.0` -> `"100"`).
#[must_use]
pub fn display_confidence(confidence: f64) -> String {
    format!("{confidence}")
}

/// Text of the classify button.
#[must_use]
pub const fn button_label(loading: bool) -> &'static str {
    if loading {
        CLASSIFYING_LABEL
    } else {
        CLASSIFY_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_replaces_underscores() {
        assert_eq!(display_label("plastic_bottle"), "plastic bottle");
        assert_eq!(display_label("HDPE_Containers"), "HDPE Containers");
        assert_eq!(display_label("Cardboard"), "Cardboard");
    }

    #[test]
    fn label_replaces_every_underscore() {
        assert_eq!(display_label("a_b_c"), "a b c");
    }

    #[test]
    fn confidence_is_verbatim() {
        assert_eq!(display_confidence(0.93), "0.93");
        assert_eq!(display_confidence(90.95), "90.95");
        assert_eq!(display_confidence(100.0), "100");
        assert_eq!(display_confidence(0.123_456_789), "0.123456789");
    }

    #[test]
    fn button_label_tracks_loading() {
        assert_eq!(button_label(false), "Classify Image");
        assert_eq!(button_label(true), "Classifying...");
    }
}
