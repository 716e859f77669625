//! The classifier controller state machine.
//!
//! ```text
//! Idle --begin_upload--> Loading --complete_upload--> Idle
//!                                  (result stored, or failure warning)
//! ```
//!
//! The upload is split in two halves so the controller stays sans-IO:
//! [`Controller::begin_upload`] hands out a [`PendingUpload`] describing the
//! request, the caller performs the round-trip, then reports the outcome to
//! [`Controller::complete_upload`] together with the ticket it was given.
//!
//! Every upload and every selection change bumps a generation counter. An
//! outcome whose ticket belongs to an older generation is discarded, so only
//! the most recent user intent affects visible state.

use std::fmt::Display;

use tracing::{debug, info, warn};

use crate::config::ClassifierConfig;
use crate::preview::{PreviewFactory, PreviewHandle};
use crate::request::{RawResponse, UploadRequest, decode_prediction};
use crate::types::{PredictionResult, SelectedFile};

/// User-visible warnings raised by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// An upload was requested with nothing selected. No request was sent.
    #[error("Please select a file first")]
    NoFileSelected,

    /// The request failed for any reason (network, status, body).
    #[error("An error occurred while classifying the image")]
    ClassificationFailed,
}

/// Coarse controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No request in flight.
    Idle,
    /// A request is in flight.
    Loading,
}

/// Identifies the request an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    generation: u64,
}

/// An upload that has been started and awaits its outcome.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    /// Hand back to [`Controller::complete_upload`].
    pub ticket: UploadTicket,
    /// The request to send.
    pub request: UploadRequest,
}

/// What [`Controller::complete_upload`] did with an outcome.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The prediction was stored.
    Classified(PredictionResult),
    /// The attempt failed; the warning should be shown to the user.
    Failed(UploadError),
    /// A newer upload or selection superseded this one; nothing changed.
    Stale,
}

impl Completion {
    /// Collapse into a result, or `None` for a stale outcome.
    #[must_use]
    pub fn into_result(self) -> Option<Result<PredictionResult, UploadError>> {
        match self {
            Self::Classified(result) => Some(Ok(result)),
            Self::Failed(err) => Some(Err(err)),
            Self::Stale => None,
        }
    }
}

/// Owns the selection, its preview, the last prediction and the loading flag.
///
/// Dropping the controller releases any live preview.
pub struct Controller<F: PreviewFactory> {
    config: ClassifierConfig,
    previews: F,
    selected: Option<SelectedFile>,
    preview: Option<F::Handle>,
    result: Option<PredictionResult>,
    loading: bool,
    generation: u64,
}

impl<F: PreviewFactory> Controller<F> {
    /// Create an idle controller with no selection and no result.
    #[must_use]
    pub const fn new(config: ClassifierConfig, previews: F) -> Self {
        Self {
            config,
            previews,
            selected: None,
            preview: None,
            result: None,
            loading: false,
            generation: 0,
        }
    }

    /// The backend configuration this controller uploads to.
    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// The current selection, if any.
    #[must_use]
    pub const fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// The live preview for the current selection, if any.
    #[must_use]
    pub const fn preview(&self) -> Option<&F::Handle> {
        self.preview.as_ref()
    }

    /// Preview source for an `<img src>`, if a preview is live.
    #[must_use]
    pub fn preview_src(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewHandle::src)
    }

    /// The last successful prediction, if it is still current.
    #[must_use]
    pub const fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Coarse state for display.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    /// Whether the classify control should be disabled.
    #[must_use]
    pub const fn upload_disabled(&self) -> bool {
        self.selected.is_none() || self.loading
    }

    /// Handle a file-picker change event.
    ///
    /// Clears any result, then selects the first file (or nothing, for an
    /// empty list). Remaining files are ignored.
    pub fn file_chosen(&mut self, files: impl IntoIterator<Item = SelectedFile>) {
        self.result = None;
        self.set_selection(files.into_iter().next());
    }

    /// Start an upload of the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::NoFileSelected`] if nothing is selected; no
    /// state changes in that case.
    pub fn begin_upload(&mut self) -> Result<PendingUpload, UploadError> {
        let Some(file) = self.selected.as_ref() else {
            return Err(UploadError::NoFileSelected);
        };
        let request = UploadRequest::predict(&self.config, file);

        self.generation += 1;
        self.loading = true;
        self.result = None;

        debug!(
            generation = self.generation,
            file = %request.file_name,
            bytes = request.bytes.len(),
            url = %request.url,
            "upload started"
        );

        Ok(PendingUpload {
            ticket: UploadTicket {
                generation: self.generation,
            },
            request,
        })
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// A transport error, a non-2xx status, and a 2xx body that is not a
    /// prediction all fail with [`UploadError::ClassificationFailed`] and
    /// leave the result empty. The loading flag is cleared on every path
    /// except [`Completion::Stale`], where a newer intent owns the state.
    pub fn complete_upload<E: Display>(
        &mut self,
        ticket: UploadTicket,
        outcome: Result<RawResponse, E>,
    ) -> Completion {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding superseded upload outcome"
            );
            return Completion::Stale;
        }

        self.loading = false;

        let decoded = match outcome {
            Ok(response) => {
                info!(status = response.status, bytes = response.body.len(), "response received");
                decode_prediction(&response).map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        match decoded {
            Ok(result) => {
                info!(
                    prediction = %result.prediction,
                    confidence = result.confidence,
                    "image classified"
                );
                self.result = Some(result.clone());
                Completion::Classified(result)
            }
            Err(reason) => {
                warn!(%reason, "failed to fetch prediction");
                self.result = None;
                Completion::Failed(UploadError::ClassificationFailed)
            }
        }
    }

    /// Release the live preview and forget the selection.
    ///
    /// Called when the owning view is torn down. Any in-flight outcome
    /// becomes stale.
    pub fn teardown(&mut self) {
        self.result = None;
        self.set_selection(None);
    }

    /// The only place the selection changes.
    ///
    /// Releases the previous preview before creating one for the new
    /// selection, and supersedes any in-flight request.
    fn set_selection(&mut self, file: Option<SelectedFile>) {
        if self.loading {
            debug!(generation = self.generation, "selection changed during upload");
            self.loading = false;
        }
        self.generation += 1;

        // Release first so at most one preview is ever live.
        drop(self.preview.take());

        self.preview = file
            .as_ref()
            .and_then(|f| match self.previews.create(f) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    warn!(file = f.name(), error = %e, "failed to create preview");
                    None
                }
            });
        self.selected = file;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Preview factory that tracks how many handles are alive.
    #[derive(Default, Clone)]
    struct Counting {
        live: Rc<Cell<usize>>,
        created: Rc<Cell<usize>>,
        fail: bool,
    }

    struct CountingHandle {
        src: String,
        live: Rc<Cell<usize>>,
    }

    impl PreviewHandle for CountingHandle {
        fn src(&self) -> &str {
            &self.src
        }
    }

    impl Drop for CountingHandle {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    impl PreviewFactory for Counting {
        type Handle = CountingHandle;
        type Error = &'static str;

        fn create(&mut self, file: &SelectedFile) -> Result<Self::Handle, Self::Error> {
            if self.fail {
                return Err("out of memory");
            }
            assert_eq!(self.live.get(), 0, "previous preview still live");
            self.live.set(self.live.get() + 1);
            self.created.set(self.created.get() + 1);
            Ok(CountingHandle {
                src: format!("blob:{}", file.name()),
                live: Rc::clone(&self.live),
            })
        }
    }

    fn controller() -> (Controller<Counting>, Counting) {
        let previews = Counting::default();
        (
            Controller::new(ClassifierConfig::default(), previews.clone()),
            previews,
        )
    }

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(name, vec![0x89, b'P', b'N', b'G'])
    }

    fn ok_body(body: &str) -> Result<RawResponse, String> {
        Ok(RawResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        })
    }

    #[test]
    fn starts_idle_and_empty() {
        let (c, previews) = controller();
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.selected_file().is_none());
        assert!(c.preview().is_none());
        assert!(c.result().is_none());
        assert!(c.upload_disabled());
        assert_eq!(previews.live.get(), 0);
    }

    #[test]
    fn choosing_a_file_creates_preview() {
        let (mut c, previews) = controller();
        c.file_chosen([png("a.png")]);
        assert_eq!(c.selected_file().unwrap().name(), "a.png");
        assert_eq!(c.preview_src(), Some("blob:a.png"));
        assert_eq!(previews.live.get(), 1);
        assert!(!c.upload_disabled());
    }

    #[test]
    fn only_first_file_is_selected() {
        let (mut c, previews) = controller();
        c.file_chosen([png("first.png"), png("second.png")]);
        assert_eq!(c.selected_file().unwrap().name(), "first.png");
        assert_eq!(previews.created.get(), 1);
    }

    #[test]
    fn replacing_selection_releases_previous_preview() {
        let (mut c, previews) = controller();
        c.file_chosen([png("a.png")]);
        c.file_chosen([png("b.png")]);
        assert_eq!(previews.live.get(), 1);
        assert_eq!(previews.created.get(), 2);
        assert_eq!(c.preview_src(), Some("blob:b.png"));
    }

    #[test]
    fn preview_failure_keeps_selection() {
        let previews = Counting {
            fail: true,
            ..Counting::default()
        };
        let mut c = Controller::new(ClassifierConfig::default(), previews);
        c.file_chosen([png("a.png")]);
        assert!(c.preview().is_none());
        assert!(c.selected_file().is_some());
        assert!(c.begin_upload().is_ok());
    }

    #[test]
    fn upload_without_selection_is_refused() {
        let (mut c, _) = controller();
        let err = c.begin_upload().unwrap_err();
        assert_eq!(err, UploadError::NoFileSelected);
        assert_eq!(err.to_string(), "Please select a file first");
        assert!(!c.is_loading());
    }

    #[test]
    fn begin_upload_sets_loading_and_clears_result() {
        let (mut c, _) = controller();
        c.file_chosen([png("a.png")]);
        let pending = c.begin_upload().unwrap();
        let _ = c.complete_upload(
            pending.ticket,
            ok_body(r#"{"prediction":"Cardboard","confidence":99.1}"#),
        );
        assert!(c.result().is_some());

        let pending = c.begin_upload().unwrap();
        assert!(c.is_loading());
        assert!(c.result().is_none());
        assert!(c.upload_disabled());
        assert_eq!(pending.request.field, "file");
        assert_eq!(pending.request.url, "http://localhost:8000/predict");
    }

    #[test]
    fn success_stores_result() {
        let (mut c, _) = controller();
        c.file_chosen([png("bottle.png")]);
        let pending = c.begin_upload().unwrap();
        let completion = c.complete_upload(
            pending.ticket,
            ok_body(r#"{"prediction":"plastic_bottle","confidence":0.93}"#),
        );
        let expected = PredictionResult {
            prediction: "plastic_bottle".into(),
            confidence: 0.93,
        };
        assert_eq!(completion, Completion::Classified(expected.clone()));
        assert_eq!(c.result(), Some(&expected));
        assert!(!c.is_loading());
    }

    #[test]
    fn transport_error_fails_generically() {
        let (mut c, _) = controller();
        c.file_chosen([png("a.png")]);
        let pending = c.begin_upload().unwrap();
        let completion =
            c.complete_upload::<&str>(pending.ticket, Err("connection refused"));
        assert_eq!(
            completion,
            Completion::Failed(UploadError::ClassificationFailed)
        );
        assert_eq!(
            UploadError::ClassificationFailed.to_string(),
            "An error occurred while classifying the image"
        );
        assert!(c.result().is_none());
        assert!(!c.is_loading());
    }

    #[test]
    fn new_selection_during_upload_makes_outcome_stale() {
        let (mut c, _) = controller();
        c.file_chosen([png("a.png")]);
        let pending = c.begin_upload().unwrap();
        c.file_chosen([png("b.png")]);
        assert!(!c.is_loading());

        let completion = c.complete_upload(
            pending.ticket,
            ok_body(r#"{"prediction":"Cardboard","confidence":50}"#),
        );
        assert_eq!(completion, Completion::Stale);
        assert!(c.result().is_none());
    }

    #[test]
    fn newer_upload_supersedes_older_one() {
        let (mut c, _) = controller();
        c.file_chosen([png("a.png")]);
        let first = c.begin_upload().unwrap();
        let second = c.begin_upload().unwrap();

        // The older response arrives late and must not end the newer request.
        let late = c.complete_upload(
            first.ticket,
            ok_body(r#"{"prediction":"Cardboard","confidence":50}"#),
        );
        assert_eq!(late, Completion::Stale);
        assert!(c.is_loading());

        let current = c.complete_upload(
            second.ticket,
            ok_body(r#"{"prediction":"Glass_Bottles","confidence":88}"#),
        );
        assert!(matches!(current, Completion::Classified(_)));
        assert_eq!(c.result().unwrap().prediction, "Glass_Bottles");
        assert!(!c.is_loading());
    }

    #[test]
    fn teardown_releases_preview() {
        let (mut c, previews) = controller();
        c.file_chosen([png("a.png")]);
        c.teardown();
        assert_eq!(previews.live.get(), 0);
        assert!(c.selected_file().is_none());
    }

    #[test]
    fn dropping_controller_releases_preview() {
        let (mut c, previews) = controller();
        c.file_chosen([png("a.png")]);
        drop(c);
        assert_eq!(previews.live.get(), 0);
    }

    #[test]
    fn completion_into_result() {
        assert_eq!(Completion::Stale.into_result(), None);
        assert_eq!(
            Completion::Failed(UploadError::ClassificationFailed).into_result(),
            Some(Err(UploadError::ClassificationFailed))
        );
    }
}
