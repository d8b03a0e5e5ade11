use serde::{Deserialize, Serialize};

use crate::{
    domain::{AssessmentResult, FormInputs, LatencyRequirement, Role},
    error::InvalidAssessment,
};

/// Body posted to the assessment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub role: Role,
    pub stack: String,
    pub tech_idea: String,
    pub latency_req: LatencyRequirement,
}

impl From<&FormInputs> for AssessmentRequest {
    fn from(inputs: &FormInputs) -> Self {
        Self {
            role: inputs.role,
            stack: inputs.stack.trim().to_string(),
            tech_idea: inputs.idea_description.trim().to_string(),
            latency_req: inputs.latency_requirement,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    #[serde(default)]
    pub result: Vec<AssessmentPayload>,
}

/// One unvalidated assessment entry as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentPayload {
    pub score: i64,
    #[serde(default)]
    pub verdict: String,
    #[serde(default, alias = "redFlags")]
    pub red_flags: Vec<String>,
    #[serde(default, alias = "alternativePlan")]
    pub alternative_plan: String,
}

impl TryFrom<AssessmentPayload> for AssessmentResult {
    type Error = InvalidAssessment;

    fn try_from(value: AssessmentPayload) -> Result<Self, Self::Error> {
        AssessmentResult::new(
            value.score,
            value.verdict,
            value.red_flags,
            value.alternative_plan,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_service_field_names_and_labels() {
        let inputs = FormInputs {
            role: Role::SoloFounder,
            stack: " Node, Postgres ".into(),
            idea_description: "Add a Kubernetes cluster for a single cron job".into(),
            latency_requirement: LatencyRequirement::RealTime,
        };
        let value = serde_json::to_value(AssessmentRequest::from(&inputs)).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "role": "Solo Founder",
                "stack": "Node, Postgres",
                "tech_idea": "Add a Kubernetes cluster for a single cron job",
                "latency_req": "Real-time (<200ms)",
            })
        );
    }

    #[test]
    fn response_accepts_camel_case_entries() {
        let response: AssessmentResponse = serde_json::from_str(
            r#"{"result":[{"score":2,"verdict":"Overkill","redFlags":["Unjustified orchestration complexity"],"alternativePlan":"Use a scheduled function"}]}"#,
        )
        .expect("parse");
        let entry = response.result.into_iter().next().expect("entry");
        let result = AssessmentResult::try_from(entry).expect("valid");
        assert_eq!(result.score(), 2);
        assert_eq!(result.red_flags(), ["Unjustified orchestration complexity"]);
        assert_eq!(result.alternative_plan(), "Use a scheduled function");
    }

    #[test]
    fn missing_result_list_is_empty() {
        let response: AssessmentResponse = serde_json::from_str("{}").expect("parse");
        assert!(response.result.is_empty());
    }
}
