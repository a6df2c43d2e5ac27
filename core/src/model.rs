// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board snapshot and render metrics as pushed by the game server.

use serde::{Deserialize, Deserializer, Serialize};
use serde_repr::Serialize_repr;
use thiserror::Error;

use crate::geometry::{Point, PIECE_SCALE};

/// Content of one house. On the wire: `null`, `true` (white) or `false` (black).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Slot {
    #[default]
    Empty,
    White,
    Black,
}

impl Slot {
    pub fn from_color(white: bool) -> Self {
        if white {
            Slot::White
        } else {
            Slot::Black
        }
    }

    /// `Some(true)` for white, `Some(false)` for black, `None` when empty
    pub fn color(self) -> Option<bool> {
        match self {
            Slot::Empty => None,
            Slot::White => Some(true),
            Slot::Black => Some(false),
        }
    }

    pub fn is_occupied(self) -> bool {
        self != Slot::Empty
    }
}

impl From<Option<bool>> for Slot {
    fn from(value: Option<bool>) -> Self {
        value.map(Slot::from_color).unwrap_or(Slot::Empty)
    }
}

impl From<Slot> for Option<bool> {
    fn from(slot: Slot) -> Self {
        slot.color()
    }
}

/// How the server wants the board presented to this client.
///
/// Only `1` selects direct-turn on the wire; any other number is observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize_repr)]
#[repr(u8)]
pub enum DisplayMode {
    /// Pieces only move when the server marks them movable
    #[default]
    Observe = 0,
    /// Any piece of the side to move may be picked up
    DirectTurn = 1,
}

impl From<i64> for DisplayMode {
    fn from(value: i64) -> Self {
        if value == DisplayMode::DirectTurn as i64 {
            DisplayMode::DirectTurn
        } else {
            DisplayMode::Observe
        }
    }
}

impl<'de> Deserialize<'de> for DisplayMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(DisplayMode::from)
    }
}

/// Layout constants sent once the board art has been sized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderMetrics {
    /// Width of one board cell
    pub w: f32,
    pub padding: f32,
    pub border: f32,
    #[serde(default)]
    pub mode: DisplayMode,
}

impl RenderMetrics {
    /// Half-size of a piece; also the hit-box radius and drag margin
    pub fn piece_width(&self) -> f32 {
        self.w / PIECE_SCALE
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot has {board} houses but {pos} positions")]
    LengthMismatch { board: usize, pos: usize },
    #[error("Anubis holds {white} white and {black} black pieces on a {houses}-house board")]
    AnubisOverflow { white: u32, black: u32, houses: usize },
}

/// Authoritative board state, replaced wholesale on every push
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub board: Vec<Slot>,
    /// Screen anchor of every house, parallel to `board`
    pub pos: Vec<Point>,
    pub white_go: bool,
    /// Colour a piece must have to be movable this turn
    #[serde(default)]
    pub mov: Option<bool>,
    #[serde(default)]
    pub sticks: Vec<bool>,
    #[serde(default)]
    pub score: Option<i32>,
    /// Pieces held by Anubis: (white, black)
    #[serde(default)]
    pub at_anubis: (u32, u32),
}

impl BoardSnapshot {
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.board.len() != self.pos.len() {
            return Err(SnapshotError::LengthMismatch {
                board: self.board.len(),
                pos: self.pos.len(),
            });
        }
        let (white, black) = self.at_anubis;
        if u64::from(white) + u64::from(black) > self.board.len() as u64 {
            return Err(SnapshotError::AnubisOverflow {
                white,
                black,
                houses: self.board.len(),
            });
        }
        Ok(())
    }

    /// Whether the piece in `house` may be picked up.
    ///
    /// Two independent rules, either one suffices: in direct-turn mode any
    /// piece of the side to move, otherwise a piece matching `mov`.
    pub fn is_draggable(&self, house: usize, mode: DisplayMode) -> bool {
        let Some(color) = self.board.get(house).and_then(|slot| slot.color()) else {
            return false;
        };
        let direct_turn = mode == DisplayMode::DirectTurn && color == self.white_go;
        let movable = self.mov == Some(color);
        direct_turn || movable
    }

    pub fn turn_label(&self) -> &'static str {
        if self.white_go {
            "White's Go"
        } else {
            "Black's Go"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(board: Vec<Slot>) -> BoardSnapshot {
        let pos = (0..board.len()).map(|i| Point::new(i as f32 * 10.0, 5.0)).collect();
        BoardSnapshot {
            board,
            pos,
            white_go: true,
            mov: None,
            sticks: vec![],
            score: None,
            at_anubis: (0, 0),
        }
    }

    #[test]
    fn test_slot_wire_values() {
        let slots: Vec<Slot> = serde_json::from_str("[null, true, false]").unwrap();
        assert_eq!(slots, vec![Slot::Empty, Slot::White, Slot::Black]);
        assert_eq!(serde_json::to_string(&slots).unwrap(), "[null,true,false]");
    }

    #[test]
    fn test_display_mode_is_numeric() {
        let m: RenderMetrics =
            serde_json::from_str(r#"{"w": 64, "padding": 20, "border": 10, "mode": 1}"#).unwrap();
        assert_eq!(m.mode, DisplayMode::DirectTurn);
        assert!((m.piece_width() - 64.0 / 3.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut snap = snapshot(vec![Slot::White, Slot::Empty]);
        snap.pos.pop();
        assert_eq!(
            snap.validate(),
            Err(SnapshotError::LengthMismatch { board: 2, pos: 1 })
        );
    }

    #[test]
    fn test_unknown_mode_number_means_observe() {
        let m: RenderMetrics =
            serde_json::from_str(r#"{"w": 64, "padding": 20, "border": 10, "mode": 2}"#).unwrap();
        assert_eq!(m.mode, DisplayMode::Observe);
        assert_eq!(serde_json::to_string(&DisplayMode::DirectTurn).unwrap(), "1");
    }

    #[test]
    fn test_anubis_counts_bounded_by_board() {
        let mut snap = snapshot(vec![Slot::Empty; 4]);
        snap.at_anubis = (3, 1);
        assert!(snap.validate().is_ok());
        snap.at_anubis = (u32::MAX, 1);
        assert_eq!(
            snap.validate(),
            Err(SnapshotError::AnubisOverflow {
                white: u32::MAX,
                black: 1,
                houses: 4,
            })
        );
    }

    #[test]
    fn test_direct_turn_rule() {
        let snap = snapshot(vec![Slot::White, Slot::Black, Slot::Empty]);
        assert!(snap.is_draggable(0, DisplayMode::DirectTurn));
        assert!(!snap.is_draggable(1, DisplayMode::DirectTurn));
        assert!(!snap.is_draggable(2, DisplayMode::DirectTurn));
        assert!(!snap.is_draggable(0, DisplayMode::Observe));
    }

    #[test]
    fn test_movable_rule_is_independent_of_turn() {
        let mut snap = snapshot(vec![Slot::White, Slot::Black]);
        snap.mov = Some(false);
        assert!(snap.is_draggable(1, DisplayMode::Observe));
        // Direct-turn still lets white move its own pieces.
        assert!(snap.is_draggable(0, DisplayMode::DirectTurn));
        assert!(!snap.is_draggable(0, DisplayMode::Observe));
        assert!(!snap.is_draggable(5, DisplayMode::DirectTurn));
    }
}
