use thiserror::Error;

/// Why a set of form inputs cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("tech stack must not be blank")]
    BlankStack,
    #[error("idea description must not be blank")]
    BlankIdeaDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidAssessment {
    #[error("invalid assessment: score {0} outside 0..=10")]
    ScoreOutOfRange(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownLabel {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
