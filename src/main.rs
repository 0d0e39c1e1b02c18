// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use std::path::PathBuf;
use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;
use segy_explorer::config::ViewerConfig;
use segy_explorer::gui::SegyExplorerApp;
#[derive(Parser, Debug)]
#[command(author, version, about = "Seismic trace viewer")]
struct Args {
    /// Trace document to open at startup
    input: Option<PathBuf>,
    /// Viewer settings (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Mirror color range edits around the data midpoint
    #[arg(long)]
    linked: bool,
    /// Page multiplier for the jump buttons
    #[arg(long)]
    jump_step: Option<u32>,
}
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_file(path)?,
        None => ViewerConfig::default(),
    };
    if args.linked {
        config.linked_color = true;
    }
    if let Some(step) = args.jump_step {
        config.jump_step = step;
    }
    let config = config.sanitized();
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 860.0])
        .with_min_inner_size([800.0, 600.0])
        .with_title("segy explorer");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "segy explorer",
        options,
        Box::new(move |_cc| {
            let mut app = SegyExplorerApp::new(config);
            if let Some(path) = &args.input {
                app.open(path);
            }
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow!("{e}"))
}
