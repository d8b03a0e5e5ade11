use std::{fs, sync::Arc, time::Duration};

use anyhow::Result;
use serde::Deserialize;

use crate::{
    controller::{AssessmentController, DEFAULT_REQUEST_TIMEOUT},
    rate_limiter::{
        RateLimitedService, RateLimiter, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_BURST_SIZE,
        DEFAULT_CALLS_PER_MINUTE,
    },
    transport::HttpAssessmentService,
    AssessmentService,
};

pub const SETTINGS_FILE: &str = "assessor.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub request_timeout_secs: u64,
    pub rate_limit_per_minute: usize,
    pub rate_limit_burst: usize,
    pub rate_limit_wait_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:8000/assess".into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            rate_limit_per_minute: DEFAULT_CALLS_PER_MINUTE,
            rate_limit_burst: DEFAULT_BURST_SIZE,
            rate_limit_wait_secs: DEFAULT_ACQUIRE_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    service_url: Option<String>,
    request_timeout_secs: Option<u64>,
    rate_limit_per_minute: Option<usize>,
    rate_limit_burst: Option<usize>,
    rate_limit_wait_secs: Option<u64>,
}

/// Defaults, then `assessor.toml` in the working directory, then the process environment.
pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_from(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.service_url {
                    settings.service_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
                if let Some(v) = file_cfg.rate_limit_per_minute {
                    settings.rate_limit_per_minute = v;
                }
                if let Some(v) = file_cfg.rate_limit_burst {
                    settings.rate_limit_burst = v;
                }
                if let Some(v) = file_cfg.rate_limit_wait_secs {
                    settings.rate_limit_wait_secs = v;
                }
            }
            Err(err) => tracing::warn!("ignoring unreadable {SETTINGS_FILE}: {err}"),
        }
    }

    if let Some(v) = env("ASSESSOR_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env("APP__SERVICE_URL") {
        settings.service_url = v;
    }
    override_parsed(&env, "APP__REQUEST_TIMEOUT_SECS", &mut settings.request_timeout_secs);
    override_parsed(&env, "APP__RATE_LIMIT_PER_MINUTE", &mut settings.rate_limit_per_minute);
    override_parsed(&env, "APP__RATE_LIMIT_BURST", &mut settings.rate_limit_burst);
    override_parsed(&env, "APP__RATE_LIMIT_WAIT_SECS", &mut settings.rate_limit_wait_secs);

    settings
}

fn override_parsed<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) {
    let Some(raw) = env(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(parsed) => *target = parsed,
        Err(_) => tracing::warn!(key, value = %raw, "ignoring non-numeric setting"),
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.rate_limit_per_minute, self.rate_limit_burst)
    }

    /// HTTP transport wrapped in the outbound rate limiter.
    pub fn build_service(&self) -> Result<Arc<dyn AssessmentService>> {
        let http = HttpAssessmentService::new(&self.service_url)?;
        Ok(Arc::new(RateLimitedService::new(
            Arc::new(http),
            Arc::new(self.rate_limiter()),
            Duration::from_secs(self.rate_limit_wait_secs),
        )))
    }

    pub fn build_controller(&self) -> Result<AssessmentController> {
        Ok(AssessmentController::with_request_timeout(
            self.build_service()?,
            self.request_timeout(),
        ))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
