use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{InvalidAssessment, UnknownLabel, ValidationError};

pub const MAX_SCORE: u8 = 10;

/// Declares a closed choice list whose wire form is the human-readable label.
/// The first listed variant is the default.
macro_rules! labelled_enum {
    ($name:ident, $kind:literal, { $first:ident => ($first_key:literal, $first_label:literal) $(, $variant:ident => ($key:literal, $label:literal))* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            #[default]
            $first,
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$name::$first $(, $name::$variant)*];

            pub fn label(self) -> &'static str {
                match self {
                    $name::$first => $first_label,
                    $($name::$variant => $label,)*
                }
            }

            pub fn key(self) -> &'static str {
                match self {
                    $name::$first => $first_key,
                    $($name::$variant => $key,)*
                }
            }

            /// Lenient parse used by free-form inputs: anything unrecognised maps to the default.
            pub fn parse_or_default(raw: &str) -> Self {
                raw.parse().unwrap_or_default()
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let raw = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(raw) || v.key().eq_ignore_ascii_case(raw))
                    .ok_or_else(|| UnknownLabel::new($kind, raw))
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownLabel;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.label()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum!(Role, "role", {
    SoloFounder => ("solo-founder", "Solo Founder"),
    JuniorDeveloper => ("junior-developer", "Junior Developer"),
    SeniorEngineer => ("senior-engineer", "Senior Engineer"),
    EnterpriseTeam => ("enterprise-team", "Enterprise Team"),
});

labelled_enum!(LatencyRequirement, "latency requirement", {
    RealTime => ("real-time", "Real-time (<200ms)"),
    Fast => ("fast", "Fast (<1s)"),
    Moderate => ("moderate", "Moderate (<5s)"),
    Async => ("async", "Async (minutes+)"),
});

/// The four user-editable inputs of one assessment request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub role: Role,
    pub stack: String,
    pub idea_description: String,
    pub latency_requirement: LatencyRequirement,
}

impl FormInputs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stack.trim().is_empty() {
            return Err(ValidationError::BlankStack);
        }
        if self.idea_description.trim().is_empty() {
            return Err(ValidationError::BlankIdeaDescription);
        }
        Ok(())
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }
}

/// A validated verdict from the assessment service. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentResult {
    score: u8,
    verdict: String,
    red_flags: Vec<String>,
    alternative_plan: String,
}

impl AssessmentResult {
    pub fn new(
        score: i64,
        verdict: impl Into<String>,
        red_flags: Vec<String>,
        alternative_plan: impl Into<String>,
    ) -> Result<Self, InvalidAssessment> {
        let score = u8::try_from(score)
            .ok()
            .filter(|s| *s <= MAX_SCORE)
            .ok_or(InvalidAssessment::ScoreOutOfRange(score))?;
        Ok(Self {
            score,
            verdict: verdict.into(),
            red_flags,
            alternative_plan: alternative_plan.into(),
        })
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn verdict(&self) -> &str {
        &self.verdict
    }

    pub fn red_flags(&self) -> &[String] {
        &self.red_flags
    }

    pub fn alternative_plan(&self) -> &str {
        &self.alternative_plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_keys_case_insensitively() {
        assert_eq!("Solo Founder".parse::<Role>(), Ok(Role::SoloFounder));
        assert_eq!("enterprise-team".parse::<Role>(), Ok(Role::EnterpriseTeam));
        assert_eq!(
            "real-time (<200MS)".parse::<LatencyRequirement>(),
            Ok(LatencyRequirement::RealTime)
        );
        assert!("principal".parse::<Role>().is_err());
    }

    #[test]
    fn unknown_labels_fall_back_to_first_variant() {
        assert_eq!(Role::parse_or_default("astronaut"), Role::SoloFounder);
        assert_eq!(
            LatencyRequirement::parse_or_default(""),
            LatencyRequirement::RealTime
        );
    }

    #[test]
    fn roles_serialize_as_labels() {
        let json = serde_json::to_string(&Role::JuniorDeveloper).expect("serialize");
        assert_eq!(json, "\"Junior Developer\"");
        let back: LatencyRequirement = serde_json::from_str("\"Async (minutes+)\"").expect("parse");
        assert_eq!(back, LatencyRequirement::Async);
    }

    #[test]
    fn blank_free_text_is_not_submittable() {
        let mut inputs = FormInputs {
            stack: "  ".into(),
            idea_description: "cron job".into(),
            ..FormInputs::default()
        };
        assert_eq!(inputs.validate(), Err(ValidationError::BlankStack));

        inputs.stack = "Rust".into();
        inputs.idea_description = "\n\t".into();
        assert_eq!(inputs.validate(), Err(ValidationError::BlankIdeaDescription));

        inputs.idea_description = "cron job".into();
        assert!(inputs.is_submittable());
    }

    #[test]
    fn assessment_score_must_be_within_range() {
        assert!(AssessmentResult::new(0, "ok", Vec::new(), "").is_ok());
        assert!(AssessmentResult::new(10, "ok", Vec::new(), "").is_ok());
        assert_eq!(
            AssessmentResult::new(11, "ok", Vec::new(), ""),
            Err(InvalidAssessment::ScoreOutOfRange(11))
        );
        assert_eq!(
            AssessmentResult::new(-1, "ok", Vec::new(), ""),
            Err(InvalidAssessment::ScoreOutOfRange(-1))
        );
    }
}
