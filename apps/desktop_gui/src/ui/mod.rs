//! UI layer for desktop GUI: app shell, form widgets, verdict card, and palette.

pub mod app;
pub mod theme;

pub use app::{AssessorApp, StartupConfig};
