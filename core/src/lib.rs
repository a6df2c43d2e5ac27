// SPDX-License-Identifier: MIT OR Apache-2.0

//! Senet Core - board interaction and rendering engine
//!
//! This crate holds everything the client does with a board it did not
//! compute itself:
//! - Geometry: house hit-testing and the captured-piece layout
//! - Rendering: mode-dispatched drawing onto an abstract [`Surface`]
//! - Interaction: the drag/drop state machine producing move intents
//! - Protocol: JSON events exchanged with the game server
//!
//! Game rules live on the server. Nothing here decides whether a move is legal.

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod controller;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod palette;
pub mod protocol;
pub mod render;
pub mod sound;
pub mod store;
pub mod surface;

pub use controller::{Applied, BoardController};
pub use geometry::{CapturedPiece, Point, Rect, Size, HOUSE_OF_WATERS};
pub use interaction::{Drag, Interaction, InteractionState, PendingMove, ReleaseOutcome};
pub use model::{BoardSnapshot, DisplayMode, RenderMetrics, Slot, SnapshotError};
pub use protocol::{ClientEvent, Destination, MoveIntent, ProtocolError, RenderCommand, ServerEvent};
pub use render::{
    BoardData, ErrorData, RenderError, RenderMode, RenderRequest, RenderScheduler, RenderStep, Rendered,
    RetryPolicy, TextData,
};
pub use sound::{SoundCue, SoundPlayer};
pub use store::SnapshotStore;
pub use surface::{DrawCommand, ImageKey, RecordingSurface, Surface, SurfaceNotReady};
