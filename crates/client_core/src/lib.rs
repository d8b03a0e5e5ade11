use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::protocol::{AssessmentRequest, AssessmentResponse};

pub mod config;
mod controller;
pub mod error;
mod form_state;
pub mod rate_limiter;
pub mod transport;

pub use controller::{
    score_color, AssessmentController, ScoreColor, SubmissionId, SubmissionState,
    DEFAULT_REQUEST_TIMEOUT, ROTATION_INTERVAL, ROTATION_MESSAGES,
};
pub use error::AssessmentError;
pub use form_state::{FieldName, FormField, FormState};
pub use rate_limiter::{RateLimitedService, RateLimiter, RateLimiterStats};
pub use transport::HttpAssessmentService;

/// The remote assessment boundary: send one request, await one response.
#[async_trait]
pub trait AssessmentService: Send + Sync {
    async fn assess(&self, request: AssessmentRequest) -> Result<AssessmentResponse>;
}

/// Stand-in used when no reachable service could be configured.
pub struct MissingAssessmentService;

#[async_trait]
impl AssessmentService for MissingAssessmentService {
    async fn assess(&self, _request: AssessmentRequest) -> Result<AssessmentResponse> {
        Err(anyhow!("assessment service is unavailable"))
    }
}
