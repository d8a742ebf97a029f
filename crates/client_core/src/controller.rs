//! Request-lifecycle controller shared by every screen.
//!
//! A controller owns the user's input, the state of its single in-flight
//! request and the text shown for the last outcome. Each screen picks a
//! [`ControllerKind`] that describes the endpoint, how input becomes a request,
//! how a response becomes text, and which literal replaces a failure.

use std::marker::PhantomData;

use async_trait::async_trait;
use shared::domain::{RequestSeq, RequestState};

use crate::{error::RequestFailure, AnalysisBackend};

/// Where a controller lands once its request has resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlePolicy {
    /// `Succeeded` or `Failed`, depending on the outcome.
    Terminal,
    /// Straight back to `Idle`, ready for the next action.
    ReturnToIdle,
}

#[async_trait]
pub trait ControllerKind: Send + Sync + 'static {
    type Input: Clone + Default + Send;
    type Request: Clone + Send + 'static;
    type Response: Send + 'static;

    /// Short name used in logs.
    const NAME: &'static str;
    const ENDPOINT: &'static str;
    /// Shown when a successful response lacks the expected field.
    const EMPTY_RESPONSE_TEXT: &'static str;
    /// Shown for every failure class.
    const FAILURE_TEXT: &'static str;
    /// Shown as soon as a request is issued, before it resolves.
    const OPTIMISTIC_TEXT: Option<&'static str> = None;
    const SETTLE: SettlePolicy = SettlePolicy::Terminal;
    const CLEAR_INPUT_ON_COMPLETE: bool = false;

    /// `None` rejects the input and no request is issued.
    fn build_request(input: &Self::Input) -> Option<Self::Request>;

    fn response_text(response: &Self::Response) -> Option<&str>;

    async fn dispatch(
        backend: &dyn AnalysisBackend,
        request: Self::Request,
    ) -> Result<Self::Response, RequestFailure>;
}

/// A request the controller has committed to; the caller must dispatch it and
/// hand the outcome back through [`RequestController::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<R> {
    pub sequence: RequestSeq,
    pub request: R,
}

pub struct RequestController<K: ControllerKind> {
    input: K::Input,
    state: RequestState,
    result_text: String,
    last_failure: Option<RequestFailure>,
    latest: RequestSeq,
    _kind: PhantomData<K>,
}

impl<K: ControllerKind> Default for RequestController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ControllerKind> RequestController<K> {
    pub fn new() -> Self {
        Self {
            input: K::Input::default(),
            state: RequestState::Idle,
            result_text: String::new(),
            last_failure: None,
            latest: RequestSeq::default(),
            _kind: PhantomData,
        }
    }

    pub fn input(&self) -> &K::Input {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut K::Input {
        &mut self.input
    }

    pub fn set_input(&mut self, input: K::Input) {
        self.input = input;
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    /// The cause of the most recent failure, kept until the next submit or
    /// reset. Uploads settle back to `Idle`, so this is the only trace of it.
    pub fn last_failure(&self) -> Option<&RequestFailure> {
        self.last_failure.as_ref()
    }

    pub fn latest_sequence(&self) -> RequestSeq {
        self.latest
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_pending() && K::build_request(&self.input).is_some()
    }

    pub fn begin_submit(&mut self) -> Option<Submission<K::Request>> {
        if self.is_pending() {
            tracing::debug!(controller = K::NAME, "submit ignored while a request is pending");
            return None;
        }
        let Some(request) = K::build_request(&self.input) else {
            tracing::debug!(controller = K::NAME, "submit ignored: input rejected");
            return None;
        };

        self.latest = self.latest.next();
        self.state = RequestState::Pending;
        self.last_failure = None;
        if let Some(text) = K::OPTIMISTIC_TEXT {
            self.result_text = text.to_string();
        }
        tracing::info!(
            controller = K::NAME,
            endpoint = K::ENDPOINT,
            sequence = self.latest.0,
            "request issued"
        );

        Some(Submission {
            sequence: self.latest,
            request,
        })
    }

    /// Applies a resolved request. Returns `false` when the outcome is stale:
    /// it belongs to an older submission or arrived after a reset.
    pub fn complete(
        &mut self,
        sequence: RequestSeq,
        outcome: Result<K::Response, RequestFailure>,
    ) -> bool {
        if sequence != self.latest || !self.is_pending() {
            tracing::debug!(
                controller = K::NAME,
                sequence = sequence.0,
                latest = self.latest.0,
                "discarding stale response"
            );
            return false;
        }

        let succeeded = match outcome {
            Ok(response) => {
                self.result_text = shared::protocol::non_empty(K::response_text(&response))
                    .unwrap_or(K::EMPTY_RESPONSE_TEXT)
                    .to_string();
                tracing::info!(controller = K::NAME, sequence = sequence.0, "request succeeded");
                true
            }
            Err(err) => {
                tracing::warn!(controller = K::NAME, sequence = sequence.0, "request failed: {err}");
                self.result_text = K::FAILURE_TEXT.to_string();
                self.last_failure = Some(err);
                false
            }
        };

        self.state = match (K::SETTLE, succeeded) {
            (SettlePolicy::ReturnToIdle, _) => RequestState::Idle,
            (SettlePolicy::Terminal, true) => RequestState::Succeeded,
            (SettlePolicy::Terminal, false) => RequestState::Failed,
        };
        if K::CLEAR_INPUT_ON_COMPLETE {
            self.input = K::Input::default();
        }
        true
    }

    /// Returns to the freshly-mounted state. Any request still in flight is
    /// orphaned: its sequence no longer matches and its outcome is discarded.
    pub fn reset(&mut self) {
        self.input = K::Input::default();
        self.state = RequestState::Idle;
        self.result_text.clear();
        self.last_failure = None;
        self.latest = self.latest.next();
    }
}

/// Runs one full submit/dispatch/complete cycle against `backend`.
///
/// Returns `None` when the controller refused the submission.
pub async fn drive_submission<K: ControllerKind>(
    controller: &mut RequestController<K>,
    backend: &dyn AnalysisBackend,
) -> Option<RequestState> {
    let submission = controller.begin_submit()?;
    let outcome = K::dispatch(backend, submission.request).await;
    controller.complete(submission.sequence, outcome);
    Some(controller.state())
}
