//! Worker thread that owns the assessment controller and its Tokio runtime.

pub mod commands;
pub mod runtime;
