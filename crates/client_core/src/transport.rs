//! JSON-over-HTTP client for the assessment service.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{AssessmentRequest, AssessmentResponse};
use url::Url;

use crate::AssessmentService;

pub struct HttpAssessmentService {
    http: Client,
    endpoint: Url,
}

impl HttpAssessmentService {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint.trim())
            .with_context(|| format!("invalid assessment service url '{endpoint}'"))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!(
                "assessment service url must use http or https, got '{}'",
                endpoint.scheme()
            );
        }
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AssessmentService for HttpAssessmentService {
    async fn assess(&self, request: AssessmentRequest) -> Result<AssessmentResponse> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .with_context(|| format!("failed to reach assessment service at {}", self.endpoint))?
            .error_for_status()?;
        let body = response
            .json::<AssessmentResponse>()
            .await
            .context("malformed assessment response")?;
        tracing::debug!(entries = body.result.len(), "assessment service responded");
        Ok(body)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
