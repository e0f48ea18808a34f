mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use hdp_client::{load_settings, FormState};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::QuickStartApp;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the registry service base url.
    #[arg(long)]
    registry_url: Option<String>,
    /// Overrides the batch query service base url.
    #[arg(long)]
    batch_query_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.registry_url {
        settings.registry_url = url;
    }
    if let Some(url) = args.batch_query_url {
        settings.batch_query_url = url;
    }
    let form = FormState::new().with_input_limit(settings.max_input_entries);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HDP Quick Start")
            .with_inner_size([840.0, 640.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "HDP Quick Start",
        options,
        Box::new(|_cc| Ok(Box::new(QuickStartApp::new(cmd_tx, ui_rx, form)))),
    )
}
