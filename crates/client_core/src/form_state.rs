//! Editable form model backing the assessment page.

use std::str::FromStr;

use shared::domain::{FormInputs, LatencyRequirement, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Role,
    Stack,
    IdeaDescription,
    LatencyRequirement,
}

impl FromStr for FieldName {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "role" => Ok(Self::Role),
            "stack" | "tech_stack" => Ok(Self::Stack),
            "idea" | "idea_description" | "ideadescription" | "tech_idea" => {
                Ok(Self::IdeaDescription)
            }
            "latency" | "latency_requirement" | "latencyrequirement" | "latency_req" => {
                Ok(Self::LatencyRequirement)
            }
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Role(Role),
    Stack(String),
    IdeaDescription(String),
    LatencyRequirement(LatencyRequirement),
}

impl FormField {
    /// Builds a field update from untyped input. Unrecognised choice labels resolve to the
    /// first choice so the form never holds an out-of-range value.
    pub fn from_raw(name: FieldName, value: &str) -> Self {
        match name {
            FieldName::Role => Self::Role(Role::parse_or_default(value)),
            FieldName::Stack => Self::Stack(value.to_string()),
            FieldName::IdeaDescription => Self::IdeaDescription(value.to_string()),
            FieldName::LatencyRequirement => {
                Self::LatencyRequirement(LatencyRequirement::parse_or_default(value))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    inputs: FormInputs,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: FormField) {
        match field {
            FormField::Role(role) => self.inputs.role = role,
            FormField::Stack(stack) => self.inputs.stack = stack,
            FormField::IdeaDescription(idea) => self.inputs.idea_description = idea,
            FormField::LatencyRequirement(latency) => self.inputs.latency_requirement = latency,
        }
    }

    pub fn set_field_raw(&mut self, name: &str, value: &str) {
        match name.parse::<FieldName>() {
            Ok(name) => self.set_field(FormField::from_raw(name, value)),
            Err(()) => tracing::debug!(field = name, "ignoring update for unknown form field"),
        }
    }

    pub fn is_submittable(&self) -> bool {
        self.inputs.is_submittable()
    }

    /// Snapshot handed to the controller on submit; free text is trimmed.
    pub fn inputs(&self) -> FormInputs {
        FormInputs {
            role: self.inputs.role,
            stack: self.inputs.stack.trim().to_string(),
            idea_description: self.inputs.idea_description.trim().to_string(),
            latency_requirement: self.inputs.latency_requirement,
        }
    }

    pub fn role(&self) -> Role {
        self.inputs.role
    }

    /// Untrimmed text as the user typed it.
    pub fn stack(&self) -> &str {
        &self.inputs.stack
    }

    pub fn idea_description(&self) -> &str {
        &self.inputs.idea_description
    }

    pub fn latency_requirement(&self) -> LatencyRequirement {
        self.inputs.latency_requirement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_first_choices_and_is_not_submittable() {
        let form = FormState::new();
        assert_eq!(form.role(), Role::SoloFounder);
        assert_eq!(form.latency_requirement(), LatencyRequirement::RealTime);
        assert!(!form.is_submittable());
    }

    #[test]
    fn submittable_once_both_free_text_fields_have_content() {
        let mut form = FormState::new();
        form.set_field(FormField::Stack("Node, Postgres".into()));
        assert!(!form.is_submittable());

        form.set_field(FormField::IdeaDescription("   ".into()));
        assert!(!form.is_submittable());

        form.set_field(FormField::IdeaDescription("single cron job".into()));
        assert!(form.is_submittable());

        form.set_field(FormField::Stack("".into()));
        assert!(!form.is_submittable());
    }

    #[test]
    fn inputs_snapshot_trims_free_text() {
        let mut form = FormState::new();
        form.set_field(FormField::Stack("  Rust, SQLite \n".into()));
        form.set_field(FormField::IdeaDescription("\tlocal-first notes app ".into()));
        form.set_field(FormField::Role(Role::SeniorEngineer));

        let inputs = form.inputs();
        assert_eq!(inputs.stack, "Rust, SQLite");
        assert_eq!(inputs.idea_description, "local-first notes app");
        assert_eq!(inputs.role, Role::SeniorEngineer);
        assert_eq!(form.stack(), "  Rust, SQLite \n");
    }

    #[test]
    fn raw_updates_are_total() {
        let mut form = FormState::new();
        form.set_field_raw("role", "Enterprise Team");
        form.set_field_raw("latencyRequirement", "moderate");
        form.set_field_raw("ideaDescription", "event sourcing for a todo list");
        form.set_field_raw("favourite_colour", "green");
        assert_eq!(form.role(), Role::EnterpriseTeam);
        assert_eq!(form.latency_requirement(), LatencyRequirement::Moderate);
        assert_eq!(form.idea_description(), "event sourcing for a todo list");

        form.set_field_raw("role", "Wizard");
        assert_eq!(form.role(), Role::SoloFounder);
    }
}
