use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    config::load_settings, score_color, FieldName, FormField, FormState, ScoreColor,
    SubmissionState,
};
use shared::domain::AssessmentResult;
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "assess", about = "Reality-check a proposed technical approach")]
struct Args {
    /// Solo Founder, Junior Developer, Senior Engineer or Enterprise Team.
    #[arg(long, default_value = "solo-founder")]
    role: String,
    #[arg(long)]
    stack: String,
    #[arg(long)]
    idea: String,
    /// Real-time, Fast, Moderate or Async.
    #[arg(long, default_value = "real-time")]
    latency: String,
    /// Overrides the configured assessment endpoint.
    #[arg(long)]
    service_url: Option<String>,
    /// Print the verdict as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.service_url {
        settings.service_url = url;
    }

    let mut form = FormState::new();
    form.set_field(FormField::from_raw(FieldName::Role, &args.role));
    form.set_field(FormField::Stack(args.stack));
    form.set_field(FormField::IdeaDescription(args.idea));
    form.set_field(FormField::from_raw(FieldName::LatencyRequirement, &args.latency));
    if let Err(err) = form.inputs().validate() {
        bail!("cannot submit: {err}");
    }

    tracing::info!(
        service_url = %settings.service_url,
        timeout_secs = settings.request_timeout().as_secs(),
        "using assessment service"
    );
    let controller = settings.build_controller()?;
    let mut states = WatchStream::new(controller.subscribe());
    controller.submit(&form.inputs())?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let settled = loop {
        tokio::select! {
            next = states.next() => match next {
                Some(state) => {
                    if let Some(message) = state.loading_message() {
                        eprintln!("{message}");
                    }
                    if state.is_settled() {
                        break state;
                    }
                }
                None => bail!("assessment controller stopped unexpectedly"),
            },
            _ = &mut ctrl_c => {
                tracing::info!("interrupted; cancelling in-flight assessment");
                controller.cancel();
                bail!("assessment cancelled");
            }
        }
    };

    match settled {
        SubmissionState::Succeeded { result } if args.json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        SubmissionState::Succeeded { result } => print_verdict(&result),
        SubmissionState::Failed { reason } => bail!("assessment failed: {reason}"),
        SubmissionState::Idle | SubmissionState::Loading { .. } => {
            bail!("assessment ended without a verdict")
        }
    }

    Ok(())
}

fn print_verdict(result: &AssessmentResult) {
    let band = match score_color(result.score()) {
        ScoreColor::Success => "solid",
        ScoreColor::Warning => "shaky",
        ScoreColor::Danger => "risky",
    };
    println!("Score: {}/10 ({band})", result.score());
    println!("Verdict: {}", result.verdict());
    if !result.red_flags().is_empty() {
        println!("Red flags:");
        for flag in result.red_flags() {
            println!("  - {flag}");
        }
    }
    if !result.alternative_plan().is_empty() {
        println!("Alternative plan: {}", result.alternative_plan());
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_fill_role_and_latency() {
        let args = Args::try_parse_from(["assess", "--stack", "Rust", "--idea", "cron job"])
            .expect("parse");
        assert_eq!(args.role, "solo-founder");
        assert_eq!(args.latency, "real-time");
        assert!(!args.json);
        assert!(args.service_url.is_none());
    }

    #[test]
    fn default_log_filter_is_info() {
        assert_eq!(DEFAULT_LOG_FILTER, "info");
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
