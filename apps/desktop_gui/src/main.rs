mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::config::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{AssessorApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "desktop_gui", about = "Tech Idea Reality Check desktop client")]
struct Args {
    /// Overrides the configured assessment endpoint.
    #[arg(long)]
    service_url: Option<String>,
}

impl From<Args> for StartupConfig {
    fn from(args: Args) -> Self {
        Self {
            service_url: args.service_url,
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let startup = StartupConfig::from(Args::parse());

    let mut settings = load_settings();
    if let Some(url) = startup.service_url {
        settings.service_url = url;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tech Idea Reality Check")
            .with_inner_size([720.0, 760.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Tech Idea Reality Check",
        options,
        Box::new(move |cc| {
            backend_bridge::runtime::launch(settings, cmd_rx, ui_tx, cc.egui_ctx.clone());
            Ok(Box::new(AssessorApp::new(cmd_tx, ui_rx)))
        }),
    )
}
