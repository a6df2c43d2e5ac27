// SPDX-License-Identifier: MIT OR Apache-2.0

//! Senet CLI - headless tools for the Senet client
//!
//! `render` draws a snapshot through the same pipeline the desktop client
//! uses and prints the recorded draw commands; `play` talks to a server from
//! the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use senet_core::render::{self, BoardData, RenderRequest};
use senet_core::{BoardSnapshot, ClientEvent, RecordingSurface, RenderMetrics, ServerEvent};
use senet_network::{connect, spawn_loopback, Connection};
use std::path::{Path, PathBuf};
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

use senet_cli::moves::parse_move_line;
use senet_cli::render::render_board;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(name = "senet-cli", about = "Senet client command-line tools", version)]
struct Args {
    /// Enable debug logging
    #[clap(long, global = true)]
    debug: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a board snapshot and print the draw commands
    Render {
        /// JSON file holding a `board-info` payload
        #[clap(long)]
        snapshot: Option<PathBuf>,

        /// JSON file holding a `board-render-info` payload
        #[clap(long)]
        metrics: Option<PathBuf>,

        /// Render mode name
        #[clap(long, default_value = "board")]
        mode: String,

        /// Text for `message` and `error` modes
        #[clap(long)]
        text: Option<String>,
    },
    /// Play against a server, one `FROM TO [y]` line per move
    Play {
        /// Server address (host:port)
        #[clap(long, conflicts_with = "offline")]
        server: Option<String>,

        /// Play the offline demo game
        #[clap(long)]
        offline: bool,
    },
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn run_render(
    snapshot: Option<PathBuf>,
    metrics: Option<PathBuf>,
    mode: &str,
    text: Option<String>,
) -> Result<()> {
    let snapshot: Option<BoardSnapshot> = snapshot.as_deref().map(read_json).transpose()?;
    let metrics: Option<RenderMetrics> = metrics.as_deref().map(read_json).transpose()?;
    if let Some(snapshot) = &snapshot {
        snapshot.validate()?;
    }

    let request = RenderRequest::from_mode(mode, text);
    let data = BoardData {
        snapshot: snapshot.as_ref(),
        metrics: metrics.as_ref(),
        status: "",
    };

    let mut surface = RecordingSurface::new();
    let rendered = render::render(&mut surface, &request, data)?;

    println!("Rendered {} panel:", rendered.mode);
    for command in surface.commands() {
        println!("  {}", command);
    }
    if rendered.board_active() {
        if let Some(snapshot) = &snapshot {
            println!();
            print!("{}", render_board(snapshot));
        }
    }
    Ok(())
}

fn show(event: ServerEvent) {
    match event {
        ServerEvent::BoardInfo(snapshot) => {
            println!();
            print!("{}", render_board(&snapshot));
        }
        ServerEvent::BoardRenderInfo(metrics) => {
            tracing::debug!(w = metrics.w, mode = ?metrics.mode, "Render metrics");
        }
        ServerEvent::Message(text) => println!("> {}", text),
        ServerEvent::Sound(cue) => println!("[sound: {}]", cue),
        ServerEvent::Render(command) => match command.text {
            Some(text) => println!("[{}] {}", command.mode, text),
            None => println!("[{}]", command.mode),
        },
    }
}

async fn run_play(mut conn: Connection) -> Result<()> {
    println!("Enter moves as FROM TO [y]; TO may be 'a' for Anubis. Ctrl-D quits.");
    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = conn.events.recv() => match event {
                Some(event) => show(event),
                None => {
                    println!("Server closed the connection");
                    break;
                }
            },
            line = stdin.next_line() => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => match parse_move_line(&line) {
                    Ok(intent) => {
                        if !conn.send(ClientEvent::PieceMove(intent)) {
                            println!("Connection lost");
                            break;
                        }
                    }
                    Err(e) => println!("{:#}", e),
                },
                None => break,
            },
        }
    }

    conn.close();
    Ok(())
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    match args.command {
        Command::Render {
            snapshot,
            metrics,
            mode,
            text,
        } => run_render(snapshot, metrics, &mode, text),
        Command::Play { server, offline } => {
            let conn = match server {
                Some(addr) if !offline => connect(&addr).await?,
                _ => {
                    tracing::info!("No server given, playing offline");
                    spawn_loopback()
                }
            };
            run_play(conn).await
        }
    }
}
