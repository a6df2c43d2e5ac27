// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main entry point for the egui UI

use anyhow::Result;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use std::path::{Path, PathBuf};

use clap::Parser;
use crossbeam_channel::unbounded;
use senet_core::geometry::{CANVAS_HEIGHT, CANVAS_WIDTH};
use senet_ui_egui::app::SenetApp;
use senet_ui_egui::config::{self, ClientConfig};
use senet_ui_egui::msg::{NetToUi, UiToNet};
use senet_ui_egui::sound_manager::SoundManager;
use senet_ui_egui::surface::ImageCatalog;
use senet_ui_egui::worker::{self, Endpoint};

/// Rotating file log for the desktop client. `RUST_LOG` overrides `level`.
fn start_file_log(dir: &Path, level: &str) -> Result<LoggerHandle> {
    std::fs::create_dir_all(dir)?;
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_file(FileSpec::default().directory(dir).basename("senet").suffix("log"))
        .rotate(
            Criterion::Size(16 * 1024 * 1024),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(3),
        )
        .start()?;
    Ok(handle)
}

#[derive(Parser)]
#[command(name = "senet")]
#[command(about = "Play Senet against a game server")]
struct Args {
    #[arg(long, help = "Game server address (host:port)")]
    server: Option<String>,

    #[arg(long, help = "Play an offline demo game")]
    offline: bool,

    #[arg(long, help = "Disable sound effects")]
    mute: bool,

    #[arg(long, help = "Read settings from this file instead of the default location")]
    config: Option<PathBuf>,

    #[arg(long)]
    debug: bool,
}

fn load_settings(args: &Args) -> ClientConfig {
    let loaded = match &args.config {
        Some(path) => config::load_from(path),
        None => config::load_config(),
    };
    let mut settings = loaded.unwrap_or_else(|e| {
        tracing::warn!("Using default settings: {:#}", e);
        ClientConfig::default()
    });

    if let Some(server) = &args.server {
        settings.server_addr = server.clone();
    }
    if args.offline {
        settings.offline = true;
    }
    if args.mute {
        settings.sound.enabled = false;
    }
    settings
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "info" };
    let log_dir = config::log_dir();
    // Dropping the handle stops the file writer
    let _log = match start_file_log(&log_dir, level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("senet: logging to {} disabled: {:#}", log_dir.display(), e);
            None
        }
    };

    let settings = load_settings(&args);
    tracing::info!(server = %settings.server_addr, offline = settings.offline, "Starting Senet client");

    // Setup channels for communication between UI and worker
    let (ui_tx, net_rx) = unbounded::<UiToNet>();
    let (net_tx, ui_rx) = unbounded::<NetToUi>();

    let endpoint = if settings.offline {
        Endpoint::Loopback
    } else {
        Endpoint::Server(settings.server_addr.clone())
    };
    let worker_handle = worker::spawn_worker(endpoint, net_rx, net_tx)?;

    let mut sounds = SoundManager::new(settings.assets_dir.join("sounds"));
    sounds.set_enabled(settings.sound.enabled);
    sounds.set_volume(settings.sound.volume);

    let scale = settings.window.scale.max(0.25);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Senet")
            .with_inner_size([CANVAS_WIDTH * scale + 16.0, CANVAS_HEIGHT * scale + 48.0]),
        centered: true,
        ..Default::default()
    };

    let policy = settings.render.retry_policy();
    let images = ImageCatalog::new(settings.assets_dir.clone());

    eframe::run_native(
        "Senet",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            let mut app = SenetApp::new(ui_tx, ui_rx, policy, sounds, images, scale);
            app.set_worker_handle(worker_handle);
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {}", e))
}
