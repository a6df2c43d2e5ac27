// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process stand-in for the game server.
//!
//! The loopback applies no rules: every move request is answered with the
//! board it already holds, so the client's piece snaps back to its anchor.

use senet_core::protocol::{ClientEvent, Destination, ServerEvent};
use senet_core::{BoardSnapshot, DisplayMode, Point, RenderMetrics, Slot};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::transport::Connection;

/// Houses on the demo board, three rows of ten
pub const DEMO_HOUSES: usize = 30;

pub fn demo_metrics() -> RenderMetrics {
    RenderMetrics {
        w: 64.0,
        padding: 20.0,
        border: 10.0,
        mode: DisplayMode::DirectTurn,
    }
}

/// Anchor of `house` on the demo board; the middle row runs right to left
fn demo_anchor(house: usize) -> Point {
    let row = house / 10;
    let mut col = house % 10;
    if row == 1 {
        col = 9 - col;
    }
    Point::new(62.0 + 64.0 * col as f32, 59.0 + 59.0 * row as f32)
}

/// Opening position: the first ten houses alternate black and white
pub fn demo_snapshot() -> BoardSnapshot {
    let board = (0..DEMO_HOUSES)
        .map(|house| match house {
            0..=9 if house % 2 == 0 => Slot::Black,
            0..=9 => Slot::White,
            _ => Slot::Empty,
        })
        .collect();

    BoardSnapshot {
        board,
        pos: (0..DEMO_HOUSES).map(demo_anchor).collect(),
        white_go: true,
        mov: None,
        sticks: vec![true, false, true, false],
        score: Some(2),
        at_anubis: (0, 0),
    }
}

fn describe(to: Destination) -> String {
    match to {
        Destination::House(house) => format!("house {}", house),
        Destination::Anubis => "Anubis".to_string(),
    }
}

/// Start an offline game
pub fn spawn_loopback() -> Connection {
    spawn_loopback_with(demo_snapshot(), demo_metrics())
}

/// Start an offline game holding `snapshot`
pub fn spawn_loopback_with(snapshot: BoardSnapshot, metrics: RenderMetrics) -> Connection {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ClientEvent>();

    let task = tokio::spawn(async move {
        info!("Loopback game started");
        if event_tx.send(ServerEvent::BoardRenderInfo(metrics)).is_err()
            || event_tx.send(ServerEvent::BoardInfo(snapshot.clone())).is_err()
        {
            return;
        }

        while let Some(event) = out_rx.recv().await {
            let ClientEvent::PieceMove(intent) = event;
            debug!(from = intent.from, to = ?intent.to, flag = intent.flag, "Loopback received move");

            let note = format!(
                "Offline: move from house {} to {} not applied",
                intent.from,
                describe(intent.to)
            );
            if event_tx.send(ServerEvent::BoardInfo(snapshot.clone())).is_err()
                || event_tx.send(ServerEvent::Message(note)).is_err()
            {
                break;
            }
        }
        debug!("Loopback game stopped");
    });

    Connection::new(event_rx, out_tx, vec![task])
}
