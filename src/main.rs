mod app;
mod cli;
mod color;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::LaunchDashApp;
use cli::Cli;
use launch_dash::Config;
use state::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let config = Config::load_from(cli.config.as_deref()).context("loading configuration")?;
    let data_path = cli.data.clone().or_else(|| config.data.path.clone());

    if cli.summary {
        let path = data_path.context("--summary needs a dataset (--data or data.path)")?;
        println!("{}", cli::run_summary(&path, &cli)?);
        return Ok(());
    }

    let mut state = AppState::new(config.ui.payload_step);
    if let Some(path) = &data_path {
        state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
