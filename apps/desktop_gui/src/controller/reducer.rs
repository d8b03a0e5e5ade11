//! Folds backend events into the state the UI paints each frame.

use client_core::SubmissionState;

use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    pub submission: SubmissionState,
    pub status: String,
    /// Failure of the latest submission, classified for display.
    pub failure: Option<UiError>,
    /// Problems outside the submit cycle, e.g. backend startup.
    pub banner: Option<UiError>,
}

pub fn apply(view: &mut ViewModel, event: UiEvent) {
    match event {
        UiEvent::Info(message) => view.status = message,
        UiEvent::Error(err) => {
            view.status = err.message().to_string();
            view.banner = Some(err);
        }
        UiEvent::StateChanged(state) => {
            view.failure = match &state {
                SubmissionState::Failed { reason } => {
                    Some(UiError::from_message(UiErrorContext::Assessment, reason.clone()))
                }
                _ => None,
            };
            view.status = match &state {
                SubmissionState::Idle => "Ready".to_string(),
                SubmissionState::Loading { .. } => "Waiting for assessment".to_string(),
                SubmissionState::Succeeded { result } => {
                    format!("Assessment complete: {}/10", result.score())
                }
                SubmissionState::Failed { .. } => "Assessment failed".to_string(),
            };
            view.submission = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::AssessmentResult;

    use super::*;
    use crate::controller::events::UiErrorCategory;

    #[test]
    fn failed_state_is_classified() {
        let mut view = ViewModel::default();
        apply(
            &mut view,
            UiEvent::StateChanged(SubmissionState::Failed {
                reason: "empty response".into(),
            }),
        );
        let failure = view.failure.as_ref().expect("failure");
        assert_eq!(failure.category(), UiErrorCategory::EmptyResult);
        assert_eq!(view.status, "Assessment failed");
    }

    #[test]
    fn new_submission_clears_previous_failure() {
        let mut view = ViewModel::default();
        apply(
            &mut view,
            UiEvent::StateChanged(SubmissionState::Failed {
                reason: "assessment request timed out after 60s".into(),
            }),
        );
        apply(
            &mut view,
            UiEvent::StateChanged(SubmissionState::Loading {
                current_message_index: 0,
            }),
        );
        assert!(view.failure.is_none());
        assert!(view.submission.is_loading());

        let result = AssessmentResult::new(8, "Sensible", Vec::new(), "").expect("valid");
        apply(
            &mut view,
            UiEvent::StateChanged(SubmissionState::Succeeded { result }),
        );
        assert_eq!(view.status, "Assessment complete: 8/10");
    }

    #[test]
    fn backend_errors_raise_banner() {
        let mut view = ViewModel::default();
        apply(
            &mut view,
            UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                "backend worker startup failure: failed to build runtime",
            )),
        );
        let banner = view.banner.as_ref().expect("banner");
        assert_eq!(banner.context(), UiErrorContext::BackendStartup);
        assert!(view.submission == SubmissionState::Idle);
    }

    #[test]
    fn failed_submission_never_raises_banner() {
        let mut view = ViewModel::default();
        apply(
            &mut view,
            UiEvent::StateChanged(SubmissionState::Failed {
                reason: "empty response".into(),
            }),
        );
        assert!(view.banner.is_none());
        assert!(view.failure.is_some());
    }
}
