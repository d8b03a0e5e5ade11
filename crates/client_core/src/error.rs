use std::time::Duration;

use shared::error::InvalidAssessment;
use thiserror::Error;

/// Every way a submission can end in `SubmissionState::Failed`. The `Display` text is the
/// user-visible failure reason.
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("empty response")]
    EmptyResponse,
    #[error(transparent)]
    InvalidAssessment(#[from] InvalidAssessment),
    #[error("assessment request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("rate limit exceeded: no request slot within {}s", .0.as_secs())]
    RateLimited(Duration),
    #[error("{0}")]
    Transport(String),
}

impl AssessmentError {
    /// Keeps typed errors raised below the service seam and flattens everything else,
    /// context chain included, into a transport failure.
    pub fn from_service(err: anyhow::Error) -> Self {
        match err.downcast::<AssessmentError>() {
            Ok(typed) => typed,
            Err(err) => Self::Transport(format!("{err:#}")),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_) | Self::RateLimited(_))
    }
}
