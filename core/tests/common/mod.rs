// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures: a 30-house board in three rows of ten.

#![allow(dead_code)]

use senet_core::{
    BoardController, BoardSnapshot, DisplayMode, Point, RecordingSurface, RenderMetrics, RenderStep,
    RetryPolicy, Slot,
};

pub const HOUSES: usize = 30;

pub fn metrics() -> RenderMetrics {
    RenderMetrics {
        w: 64.0,
        padding: 20.0,
        border: 10.0,
        mode: DisplayMode::DirectTurn,
    }
}

/// Anchor of `house`; the middle row runs right to left
pub fn anchor(house: usize) -> Point {
    let row = house / 10;
    let mut col = house % 10;
    if row == 1 {
        col = 9 - col;
    }
    Point::new(62.0 + 64.0 * col as f32, 59.0 + 59.0 * row as f32)
}

pub fn snapshot_with(pieces: &[(usize, Slot)]) -> BoardSnapshot {
    let mut board = vec![Slot::Empty; HOUSES];
    for (house, slot) in pieces {
        board[*house] = *slot;
    }
    BoardSnapshot {
        board,
        pos: (0..HOUSES).map(anchor).collect(),
        white_go: true,
        mov: None,
        sticks: vec![true, false, true, true],
        score: Some(3),
        at_anubis: (0, 0),
    }
}

/// White on 1, 3, 5 and 26; black on 0, 2, 4 and 20
pub fn opening() -> BoardSnapshot {
    snapshot_with(&[
        (0, Slot::Black),
        (1, Slot::White),
        (2, Slot::Black),
        (3, Slot::White),
        (4, Slot::Black),
        (5, Slot::White),
        (20, Slot::Black),
        (26, Slot::White),
    ])
}

/// A controller holding `snapshot` with the board already drawn once
pub fn ready_controller(snapshot: BoardSnapshot) -> (BoardController, RecordingSurface) {
    let mut controller = BoardController::new(RetryPolicy::default());
    controller.apply_metrics(metrics());
    controller
        .apply_snapshot(snapshot)
        .expect("fixture snapshot is well formed");
    let mut surface = RecordingSurface::new();
    let step = controller.render(&mut surface);
    assert!(matches!(step, RenderStep::Done(_)), "fixture render failed: {:?}", step);
    assert!(controller.is_board_active());
    (controller, surface)
}
