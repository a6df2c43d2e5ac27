// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single owner of the client's board state.
//!
//! The controller holds the snapshot store, the drag state, the active render
//! request and whether the board is on screen. Front ends feed it server
//! events and pointer input and ask it to draw onto their surface.

use crate::geometry::Point;
use crate::interaction::{Interaction, InteractionState, ReleaseOutcome};
use crate::model::{BoardSnapshot, RenderMetrics, SnapshotError};
use crate::protocol::{MoveIntent, ServerEvent};
use crate::render::{self, BoardData, RenderRequest, RenderScheduler, RenderStep, RetryPolicy};
use crate::sound::SoundCue;
use crate::store::SnapshotStore;
use crate::surface::Surface;

/// What a server event asks of the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Redraw,
    Play(SoundCue),
    /// The event was dropped
    Ignored,
}

#[derive(Debug)]
pub struct BoardController {
    store: SnapshotStore,
    interaction: Interaction,
    request: RenderRequest,
    scheduler: RenderScheduler,
    board_active: bool,
    status: String,
}

impl BoardController {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            store: SnapshotStore::new(),
            interaction: Interaction::new(),
            request: RenderRequest::Instructions,
            scheduler: RenderScheduler::new(policy),
            board_active: false,
            status: String::new(),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn state(&self) -> &InteractionState {
        self.interaction.state()
    }

    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the last render attempt drew the board
    pub fn is_board_active(&self) -> bool {
        self.board_active
    }

    pub fn set_request(&mut self, request: RenderRequest) {
        if request != self.request {
            self.scheduler.reset();
        }
        self.request = request;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Replace the board with a fresh server snapshot and show it.
    ///
    /// A drag in progress survives: the dragged piece stays under the pointer.
    pub fn apply_snapshot(&mut self, mut snapshot: BoardSnapshot) -> Result<(), SnapshotError> {
        snapshot.validate()?;
        self.interaction
            .rebase(self.store.snapshot(), &mut snapshot, self.store.metrics());
        self.store.replace_snapshot(snapshot)?;
        self.set_request(RenderRequest::Board);
        Ok(())
    }

    pub fn apply_metrics(&mut self, metrics: RenderMetrics) {
        self.store.set_metrics(metrics);
    }

    /// Fold one server event into local state
    pub fn apply_event(&mut self, event: ServerEvent) -> Applied {
        match event {
            ServerEvent::BoardInfo(snapshot) => match self.apply_snapshot(snapshot) {
                Ok(()) => Applied::Redraw,
                Err(e) => {
                    tracing::warn!(error = %e, "Rejected board snapshot");
                    Applied::Ignored
                }
            },
            ServerEvent::BoardRenderInfo(metrics) => {
                self.apply_metrics(metrics);
                Applied::Redraw
            }
            ServerEvent::Message(text) => {
                self.set_status(text);
                Applied::Redraw
            }
            ServerEvent::Sound(key) => match key.parse::<SoundCue>() {
                Ok(cue) => Applied::Play(cue),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring sound event");
                    Applied::Ignored
                }
            },
            ServerEvent::Render(command) => {
                self.set_request(RenderRequest::from_mode(&command.mode, command.text));
                Applied::Redraw
            }
        }
    }

    /// Pointer pressed. Returns whether a piece was picked up.
    pub fn press(&mut self, at: Point) -> bool {
        if !self.board_active {
            return false;
        }
        let (Some(snapshot), Some(metrics)) = (self.store.snapshot(), self.store.metrics()) else {
            return false;
        };
        self.interaction.press(snapshot, metrics, at).is_some()
    }

    /// Pointer moved with the button held. Returns whether to redraw.
    pub fn drag(&mut self, at: Point) -> bool {
        if !self.board_active {
            return false;
        }
        match self.store.parts_mut() {
            Some((snapshot, metrics)) => self.interaction.drag(snapshot, metrics, at),
            None => false,
        }
    }

    /// Pointer released
    pub fn release(&mut self) -> ReleaseOutcome {
        if !matches!(self.interaction.state(), InteractionState::Dragging(_)) {
            return ReleaseOutcome::Ignored;
        }
        if !self.board_active {
            tracing::debug!("Board left the screen mid-drag, cancelling");
            self.cancel_drag();
            return ReleaseOutcome::Ignored;
        }
        let Some((snapshot, metrics)) = self.store.parts_mut() else {
            self.interaction.cancel(None);
            return ReleaseOutcome::Ignored;
        };

        let outcome = self.interaction.release(snapshot, metrics);
        if let ReleaseOutcome::Move(intent) = outcome {
            tracing::info!(from = intent.from, to = ?intent.to, flag = intent.flag, "Move requested");
        }
        outcome
    }

    /// Answer the House of Waters prompt
    pub fn resolve_confirmation(&mut self, accepted: bool) -> Option<MoveIntent> {
        let snapshot = self.store.parts_mut().map(|(s, _)| s);
        let intent = match snapshot {
            Some(snapshot) => self.interaction.confirm(snapshot, accepted),
            None => {
                self.interaction.cancel(None);
                None
            }
        };
        if let Some(intent) = intent {
            tracing::info!(from = intent.from, to = ?intent.to, "Move out of the House of Waters confirmed");
        }
        intent
    }

    fn cancel_drag(&mut self) {
        let snapshot = self.store.parts_mut().map(|(s, _)| s);
        self.interaction.cancel(snapshot);
    }

    /// Draw the active request onto `surface`
    pub fn render<S>(&mut self, surface: &mut S) -> RenderStep
    where
        S: Surface + ?Sized,
    {
        let data = BoardData {
            snapshot: self.store.snapshot(),
            metrics: self.store.metrics(),
            status: &self.status,
        };
        let result = render::render(surface, &self.request, data);
        let step = self.scheduler.step(result);
        // Nothing on screen unless this frame drew the board
        self.board_active = matches!(&step, RenderStep::Done(rendered) if rendered.board_active());
        step
    }
}

impl Default for BoardController {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}
