use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.request_timeout(), Duration::from_secs(60));
}

#[test]
fn file_values_override_defaults() {
    let settings = load_settings_from(
        Some(
            r#"
service_url = "https://assess.example.test/v1/assess"
request_timeout_secs = 20
rate_limit_burst = 2
"#,
        ),
        env_from(&[]),
    );
    assert_eq!(settings.service_url, "https://assess.example.test/v1/assess");
    assert_eq!(settings.request_timeout_secs, 20);
    assert_eq!(settings.rate_limit_burst, 2);
    assert_eq!(settings.rate_limit_per_minute, 15);
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let settings = load_settings_from(
        Some(r#"service_url = "http://file.test/assess""#),
        env_from(&[
            ("ASSESSOR_SERVICE_URL", "http://legacy.test/assess"),
            ("APP__SERVICE_URL", "http://env.test/assess"),
            ("APP__REQUEST_TIMEOUT_SECS", "5"),
        ]),
    );
    assert_eq!(settings.service_url, "http://env.test/assess");
    assert_eq!(settings.request_timeout_secs, 5);
}

#[test]
fn malformed_inputs_are_ignored() {
    let settings = load_settings_from(
        Some("service_url = [not toml"),
        env_from(&[("APP__RATE_LIMIT_PER_MINUTE", "lots")]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn zero_timeout_is_clamped() {
    let settings = Settings {
        request_timeout_secs: 0,
        ..Settings::default()
    };
    assert_eq!(settings.request_timeout(), Duration::from_secs(1));
}

#[test]
fn build_service_rejects_non_http_urls() {
    let settings = Settings {
        service_url: "ftp://assess.example.test".into(),
        ..Settings::default()
    };
    let err = settings.build_service().err().expect("must reject");
    assert!(err.to_string().contains("http or https"), "unexpected: {err}");
}
