// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video Snipper
//!
//! A desktop tool for scrubbing through a video and saving individual
//! frames tagged with a rotation angle, together with a JSON table of
//! which frame was saved for each angle.
//!
//! Opening videos needs a decoder backend. Build with
//! `cargo build --features video-opencv` (requires OpenCV and clang);
//! the default build starts but reports every video as unsupported.

mod app;
mod config;
mod controller;
mod error;
mod io;
mod models;
mod playback;
mod ui;
mod util;

use anyhow::Result;
use app::SnipperApp;
use clap::Parser;
use config::AppConfig;
use io::media::DefaultBackend;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "video-snipper", version, about = "Save angle-tagged frames from a video")]
struct Cli {
    /// Step in milliseconds for the previous/next buttons
    #[arg(value_name = "SEEK_STEP_MS")]
    seek_step_ms: Option<u64>,

    /// Root directory for saved frames (overrides the config file)
    #[arg(long, value_name = "DIR")]
    output_root: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Video to open at startup
    #[arg(long, value_name = "VIDEO")]
    open: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load(&config_path).with_overrides(cli.seek_step_ms, cli.output_root);
    log::info!(
        "Saving frames under {} (seek step {} ms)",
        config.output_root.display(),
        config.seek_step_ms
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("GUI Video Snipper Tool"),
        ..Default::default()
    };

    let initial = cli.open;
    eframe::run_native(
        "Video Snipper",
        options,
        Box::new(move |_cc| Ok(Box::new(SnipperApp::new(config, Box::new(DefaultBackend), initial)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
