//! Submit → wait → display lifecycle for one assessment form.
//!
//! Every submission gets a sequence number. Its two background activities (the status
//! message rotation and the outbound request) carry that number and may only touch the
//! published state while it is still the latest one.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use shared::{
    domain::{AssessmentResult, FormInputs},
    error::ValidationError,
    protocol::{AssessmentRequest, AssessmentResponse},
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{error::AssessmentError, AssessmentService};

pub const ROTATION_MESSAGES: [&str; 4] = [
    "Analyzing Architecture...",
    "Calculating Latency Risks...",
    "Evaluating Tech Stack...",
    "Checking for Over-Engineering...",
];
pub const ROTATION_INTERVAL: Duration = Duration::from_millis(800);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(pub u64);

/// The single view-state a renderer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading {
        current_message_index: usize,
    },
    Succeeded {
        result: AssessmentResult,
    },
    Failed {
        reason: String,
    },
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    pub fn loading_message(&self) -> Option<&'static str> {
        match self {
            Self::Loading {
                current_message_index,
            } => ROTATION_MESSAGES.get(*current_message_index).copied(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreColor {
    Success,
    Warning,
    Danger,
}

pub fn score_color(score: u8) -> ScoreColor {
    if score >= 7 {
        ScoreColor::Success
    } else if score >= 5 {
        ScoreColor::Warning
    } else {
        ScoreColor::Danger
    }
}

pub struct AssessmentController {
    shared: Arc<ControllerShared>,
}

struct ControllerShared {
    service: Arc<dyn AssessmentService>,
    request_timeout: Duration,
    state: watch::Sender<SubmissionState>,
    inflight: Mutex<Inflight>,
}

#[derive(Default)]
struct Inflight {
    latest: u64,
    rotation: Option<JoinHandle<()>>,
    request: Option<JoinHandle<()>>,
    superseded_requests: Vec<JoinHandle<()>>,
}

impl AssessmentController {
    pub fn new(service: Arc<dyn AssessmentService>) -> Self {
        Self::with_request_timeout(service, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_request_timeout(
        service: Arc<dyn AssessmentService>,
        request_timeout: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            shared: Arc::new(ControllerShared {
                service,
                request_timeout,
                state,
                inflight: Mutex::new(Inflight::default()),
            }),
        }
    }

    /// Starts a new submission, superseding any that is still loading.
    ///
    /// Incomplete inputs leave the published state untouched and start nothing; the
    /// returned error only tells the caller why. Must be called from within a Tokio runtime.
    pub fn submit(&self, inputs: &FormInputs) -> Result<SubmissionId, ValidationError> {
        if let Err(err) = inputs.validate() {
            debug!(%err, "ignoring submit with incomplete inputs");
            return Err(err);
        }
        let request = AssessmentRequest::from(inputs);

        let mut inflight = self.shared.lock_inflight();
        inflight.latest += 1;
        let id = SubmissionId(inflight.latest);

        if let Some(rotation) = inflight.rotation.take() {
            rotation.abort();
        }
        if let Some(previous) = inflight.request.take() {
            if !previous.is_finished() {
                debug!(
                    submission = id.0,
                    superseded = id.0 - 1,
                    "superseding in-flight submission"
                );
                inflight.superseded_requests.push(previous);
            }
        }
        inflight.superseded_requests.retain(|handle| !handle.is_finished());

        info!(
            submission = id.0,
            role = %request.role,
            latency = %request.latency_req,
            "submitting assessment request"
        );
        self.shared.state.send_replace(SubmissionState::Loading {
            current_message_index: 0,
        });
        inflight.rotation = Some(tokio::spawn(Arc::clone(&self.shared).rotate(id)));
        inflight.request = Some(tokio::spawn(
            Arc::clone(&self.shared).run_request(id, request),
        ));

        Ok(id)
    }

    /// Cancels whatever is in flight. A loading view falls back to `Idle`; settled views
    /// are kept.
    pub fn cancel(&self) {
        self.shared.cancel();
    }

    pub fn state(&self) -> SubmissionState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.shared.state.subscribe()
    }

    pub fn rotation_active(&self) -> bool {
        self.shared
            .lock_inflight()
            .rotation
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn request_timeout(&self) -> Duration {
        self.shared.request_timeout
    }
}

impl Drop for AssessmentController {
    fn drop(&mut self) {
        self.shared.cancel();
    }
}

impl ControllerShared {
    fn lock_inflight(&self) -> MutexGuard<'_, Inflight> {
        self.inflight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel(&self) {
        let mut inflight = self.lock_inflight();
        inflight.latest += 1;
        let handles = inflight
            .rotation
            .take()
            .into_iter()
            .chain(inflight.request.take())
            .chain(inflight.superseded_requests.drain(..));
        for handle in handles {
            handle.abort();
        }
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                *state = SubmissionState::Idle;
                true
            } else {
                false
            }
        });
    }

    async fn rotate(self: Arc<Self>, id: SubmissionId) {
        let last = ROTATION_MESSAGES.len() - 1;
        loop {
            tokio::time::sleep(ROTATION_INTERVAL).await;

            let advanced_to = {
                let inflight = self.lock_inflight();
                if inflight.latest != id.0 {
                    return;
                }
                let mut advanced_to = None;
                self.state.send_if_modified(|state| match state {
                    SubmissionState::Loading {
                        current_message_index,
                    } if *current_message_index < last => {
                        *current_message_index += 1;
                        advanced_to = Some(*current_message_index);
                        true
                    }
                    _ => false,
                });
                advanced_to
            };

            match advanced_to {
                Some(index) => {
                    debug!(
                        submission = id.0,
                        message = ROTATION_MESSAGES[index],
                        "rotated loading message"
                    );
                    if index == last {
                        return;
                    }
                }
                None => return,
            }
        }
    }

    async fn run_request(self: Arc<Self>, id: SubmissionId, request: AssessmentRequest) {
        let outcome =
            match tokio::time::timeout(self.request_timeout, self.service.assess(request)).await {
                Ok(Ok(response)) => first_assessment(response),
                Ok(Err(err)) => Err(AssessmentError::from_service(err)),
                Err(_) => Err(AssessmentError::Timeout(self.request_timeout)),
            };

        let mut inflight = self.lock_inflight();
        if inflight.latest != id.0 {
            debug!(
                submission = id.0,
                latest = inflight.latest,
                succeeded = outcome.is_ok(),
                "discarding stale assessment response"
            );
            return;
        }
        if let Some(rotation) = inflight.rotation.take() {
            rotation.abort();
        }
        inflight.request = None;

        let next = match outcome {
            Ok(result) => {
                info!(
                    submission = id.0,
                    score = result.score(),
                    "assessment settled"
                );
                SubmissionState::Succeeded { result }
            }
            Err(err) => {
                warn!(
                    submission = id.0,
                    transport = err.is_transport(),
                    "assessment failed: {err}"
                );
                SubmissionState::Failed {
                    reason: err.to_string(),
                }
            }
        };
        self.state.send_replace(next);
    }
}

fn first_assessment(response: AssessmentResponse) -> Result<AssessmentResult, AssessmentError> {
    let entry = response
        .result
        .into_iter()
        .next()
        .ok_or(AssessmentError::EmptyResponse)?;
    Ok(AssessmentResult::try_from(entry)?)
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
