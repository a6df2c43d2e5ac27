// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drag-and-drop state machine.
//!
//! `Idle` → press on a draggable piece → `Dragging` → release resolves the
//! drop. Dropping a piece that left the House of Waters parks the move in
//! `Confirming` until the player answers the re-cast prompt.

use crate::geometry::{self, Point, HOUSE_OF_WATERS};
use crate::model::{BoardSnapshot, RenderMetrics};
use crate::protocol::{Destination, MoveIntent};

/// A piece being dragged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub house: usize,
    /// Where the piece sat when the drag began
    pub start: Point,
}

/// A resolved drop waiting for the player's answer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingMove {
    pub drag: Drag,
    pub to: Destination,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(Drag),
    Confirming(PendingMove),
}

/// Result of releasing the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// No drag was in progress
    Ignored,
    /// Dropped outside every house and the capture zone; the piece went back
    Rejected,
    /// Dropped on its own house; the piece went back
    Unchanged,
    /// Moving out of the House of Waters; answer with [`Interaction::confirm`]
    NeedsConfirmation(PendingMove),
    Move(MoveIntent),
}

/// Prompt shown before a piece leaves the House of Waters
pub const WATERS_PROMPT: &str =
    "Hope for a four or succumb to House of Waters?\n\n(Sticks will be re-cast)";
pub const WATERS_TITLE: &str = "~~ House of Waters ~~";

#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: InteractionState,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    /// Pick up the first draggable piece under `at`. Returns the house taken.
    pub fn press(&mut self, snapshot: &BoardSnapshot, metrics: &RenderMetrics, at: Point) -> Option<usize> {
        if !self.is_idle() {
            return None;
        }

        let w = metrics.piece_width();
        let house = snapshot
            .pos
            .iter()
            .enumerate()
            .find(|(i, anchor)| snapshot.is_draggable(*i, metrics.mode) && geometry::is_over(**anchor, at, w))
            .map(|(i, _)| i)?;

        let start = snapshot.pos[house];
        tracing::debug!(house, x = start.x, y = start.y, "Drag started");
        self.state = InteractionState::Dragging(Drag { house, start });
        Some(house)
    }

    /// Move the dragged piece to `at`. Returns whether the board changed.
    ///
    /// Points outside the board interior are ignored so a piece can never
    /// leave the drawing area.
    pub fn drag(&mut self, snapshot: &mut BoardSnapshot, metrics: &RenderMetrics, at: Point) -> bool {
        let InteractionState::Dragging(drag) = self.state else {
            return false;
        };
        if !geometry::within_drag_bounds(at, metrics.piece_width()) {
            return false;
        }
        match snapshot.pos.get_mut(drag.house) {
            Some(pos) => {
                *pos = at.truncated();
                true
            }
            None => false,
        }
    }

    /// Resolve the drop of the dragged piece
    pub fn release(&mut self, snapshot: &mut BoardSnapshot, metrics: &RenderMetrics) -> ReleaseOutcome {
        let InteractionState::Dragging(drag) = self.state else {
            return ReleaseOutcome::Ignored;
        };
        self.state = InteractionState::Idle;

        let Some(dropped) = snapshot.pos.get(drag.house).copied() else {
            return ReleaseOutcome::Ignored;
        };

        // The dragged entry now tracks the pointer; hit-test against where
        // the piece started so it never matches itself.
        let anchors = snapshot
            .pos
            .iter()
            .enumerate()
            .map(|(i, p)| if i == drag.house { drag.start } else { *p });

        let to = match geometry::house_at(anchors, dropped, metrics.piece_width()) {
            Some(house) => Destination::House(house),
            None if geometry::is_over_capture_zone(dropped) => Destination::Anubis,
            None => {
                tracing::debug!(house = drag.house, x = dropped.x, y = dropped.y, "Invalid drop, reverting");
                snapshot.pos[drag.house] = drag.start;
                return ReleaseOutcome::Rejected;
            }
        };

        if to == Destination::House(drag.house) {
            snapshot.pos[drag.house] = drag.start;
            return ReleaseOutcome::Unchanged;
        }

        if drag.house == HOUSE_OF_WATERS {
            let pending = PendingMove { drag, to };
            self.state = InteractionState::Confirming(pending);
            return ReleaseOutcome::NeedsConfirmation(pending);
        }

        ReleaseOutcome::Move(MoveIntent {
            from: drag.house,
            to,
            flag: false,
        })
    }

    /// Answer the House of Waters prompt. Declining puts the piece back.
    pub fn confirm(&mut self, snapshot: &mut BoardSnapshot, accepted: bool) -> Option<MoveIntent> {
        let InteractionState::Confirming(pending) = self.state else {
            return None;
        };
        self.state = InteractionState::Idle;

        if accepted {
            Some(MoveIntent {
                from: pending.drag.house,
                to: pending.to,
                flag: true,
            })
        } else {
            if let Some(pos) = snapshot.pos.get_mut(pending.drag.house) {
                *pos = pending.drag.start;
            }
            None
        }
    }

    /// Abandon any drag, restoring the piece to its start position
    pub fn cancel(&mut self, snapshot: Option<&mut BoardSnapshot>) {
        let drag = match self.state {
            InteractionState::Idle => return,
            InteractionState::Dragging(drag) => drag,
            InteractionState::Confirming(pending) => pending.drag,
        };
        self.state = InteractionState::Idle;
        if let Some(pos) = snapshot.and_then(|s| s.pos.get_mut(drag.house)) {
            *pos = drag.start;
        }
    }

    /// Carry the local drag across a fresh server snapshot.
    ///
    /// The incoming position of the dragged house becomes the new revert
    /// point and the piece stays under the pointer. If the piece is no longer
    /// there to drag, the drag is dropped and the server's layout wins.
    pub fn rebase(
        &mut self,
        current: Option<&BoardSnapshot>,
        incoming: &mut BoardSnapshot,
        metrics: Option<&RenderMetrics>,
    ) {
        let drag = match &mut self.state {
            InteractionState::Idle => return,
            InteractionState::Dragging(drag) => drag,
            InteractionState::Confirming(pending) => &mut pending.drag,
        };
        let house = drag.house;

        let still_ours = metrics
            .map(|m| incoming.is_draggable(house, m.mode))
            .unwrap_or(false);
        let live = current.and_then(|s| s.pos.get(house)).copied();

        match (still_ours, live, incoming.pos.get_mut(house)) {
            (true, Some(live), Some(slot)) => {
                tracing::debug!(house, "Snapshot arrived mid-drag, keeping dragged piece");
                drag.start = *slot;
                *slot = live;
            }
            _ => {
                tracing::debug!(house, "Dragged piece gone from new snapshot, dropping drag");
                self.state = InteractionState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DisplayMode, Slot};

    fn setup() -> (BoardSnapshot, RenderMetrics) {
        let board = vec![Slot::White, Slot::Empty, Slot::Black];
        let pos = vec![Point::new(50.0, 50.0), Point::new(150.0, 50.0), Point::new(250.0, 50.0)];
        let snapshot = BoardSnapshot {
            board,
            pos,
            white_go: true,
            mov: None,
            sticks: vec![],
            score: None,
            at_anubis: (0, 0),
        };
        let metrics = RenderMetrics {
            w: 70.0,
            padding: 20.0,
            border: 10.0,
            mode: DisplayMode::DirectTurn,
        };
        (snapshot, metrics)
    }

    #[test]
    fn test_press_only_picks_draggable() {
        let (snapshot, metrics) = setup();
        let mut interaction = Interaction::new();
        assert_eq!(interaction.press(&snapshot, &metrics, Point::new(250.0, 50.0)), None);
        assert!(interaction.is_idle());
        assert_eq!(interaction.press(&snapshot, &metrics, Point::new(55.0, 45.0)), Some(0));
        // A second press while dragging is ignored.
        assert_eq!(interaction.press(&snapshot, &metrics, Point::new(55.0, 45.0)), None);
    }

    #[test]
    fn test_drag_truncates_coordinates() {
        let (mut snapshot, metrics) = setup();
        let mut interaction = Interaction::new();
        interaction.press(&snapshot, &metrics, Point::new(50.0, 50.0));
        assert!(interaction.drag(&mut snapshot, &metrics, Point::new(100.7, 60.2)));
        assert_eq!(snapshot.pos[0], Point::new(100.0, 60.0));
    }

    #[test]
    fn test_drag_without_press_does_nothing() {
        let (mut snapshot, metrics) = setup();
        let mut interaction = Interaction::new();
        assert!(!interaction.drag(&mut snapshot, &metrics, Point::new(100.0, 60.0)));
        assert_eq!(interaction.release(&mut snapshot, &metrics), ReleaseOutcome::Ignored);
    }

    #[test]
    fn test_cancel_restores_start() {
        let (mut snapshot, metrics) = setup();
        let mut interaction = Interaction::new();
        interaction.press(&snapshot, &metrics, Point::new(50.0, 50.0));
        interaction.drag(&mut snapshot, &metrics, Point::new(120.0, 60.0));
        interaction.cancel(Some(&mut snapshot));
        assert!(interaction.is_idle());
        assert_eq!(snapshot.pos[0], Point::new(50.0, 50.0));
    }
}
