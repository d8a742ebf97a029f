mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use backend_bridge::commands::BackendCommand;
use clap::Parser;
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "finqa-desktop", about = "Financial document Q&A desktop client")]
struct Args {
    /// Base URL of the analysis API. Overrides finqa.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let settings = client_core::load_settings()
        .context("failed to load client settings")?
        .with_api_url_override(args.api_url)
        .context("invalid --api-url")?;
    tracing::info!(api = %settings.api_base_url, "starting desktop client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Financial Report QA")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([560.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Financial Report QA",
        options,
        Box::new(|_cc| Ok(Box::new(ui::FinqaApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("desktop client exited with error: {err}"))
}
