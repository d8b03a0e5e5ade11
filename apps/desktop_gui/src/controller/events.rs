//! UI/backend events and error modeling for desktop GUI controller.

use client_core::SubmissionState;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    StateChanged(SubmissionState),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    EmptyResult,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Assessment,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower == "empty response" {
            UiErrorCategory::EmptyResult
        } else if message_lower.starts_with("failed to reach")
            || message_lower.starts_with("assessment request timed out")
            || message_lower.starts_with("rate limit")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("must use http")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timed out")
            || message_lower.contains("timeout")
            || message_lower.contains("rate limit")
            || message_lower.contains("connection")
            || message_lower.contains("failed to reach")
            || message_lower.contains("unavailable")
            || message_lower.contains("status")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Failures the user can fix by simply pressing submit again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category,
            UiErrorCategory::Transport | UiErrorCategory::EmptyResult
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn category_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Service unreachable",
        UiErrorCategory::EmptyResult => "No assessment returned",
        UiErrorCategory::Validation => "Invalid response",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
