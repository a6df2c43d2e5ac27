// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message types for UI-Network communication.

use senet_core::{MoveIntent, ServerEvent};

/// Messages sent from UI to Network worker
#[derive(Debug, Clone)]
pub enum UiToNet {
    /// Ask the server to move a piece
    PieceMove(MoveIntent),
    /// Shutdown the network worker
    Shutdown,
}

/// Messages sent from Network worker to UI
#[derive(Debug, Clone)]
pub enum NetToUi {
    /// Link to the game established
    Connected { peer: String },
    /// Event pushed by the server
    Event(ServerEvent),
    /// Server closed the link
    Disconnected { reason: String },
    /// Could not reach the server
    Error { message: String },
    /// Acknowledgment of shutdown
    ShutdownAck,
}
