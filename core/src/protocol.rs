// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire events exchanged with the game server.
//!
//! Every frame is one line of JSON: `{"event": "<name>", "data": <payload>}`.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{BoardSnapshot, RenderMetrics};

/// Where a dragged piece was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    House(usize),
    /// The Anubis panel; `"a"` on the wire
    Anubis,
}

const ANUBIS_TAG: &str = "a";

impl Serialize for Destination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Destination::House(house) => serializer.serialize_u64(*house as u64),
            Destination::Anubis => serializer.serialize_str(ANUBIS_TAG),
        }
    }
}

impl<'de> Deserialize<'de> for Destination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            House(usize),
            Tag(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::House(house) => Ok(Destination::House(house)),
            Raw::Tag(tag) if tag == ANUBIS_TAG => Ok(Destination::Anubis),
            Raw::Tag(tag) => Err(de::Error::custom(format!("unknown destination '{}'", tag))),
        }
    }
}

/// A requested move. The server decides whether it is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    #[serde(rename = "hfrom")]
    pub from: usize,
    #[serde(rename = "hto")]
    pub to: Destination,
    pub flag: bool,
}

/// Server-requested render mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderCommand {
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Events pushed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    BoardInfo(BoardSnapshot),
    BoardRenderInfo(RenderMetrics),
    /// Status text shown beside the sticks
    Message(String),
    /// Sound cue key
    Sound(String),
    Render(RenderCommand),
}

/// Events sent to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    PieceMove(MoveIntent),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("empty frame")]
    Empty,
}

/// Encode one frame, without the trailing newline
pub fn encode<T: Serialize>(event: &T) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(event)?)
}

/// Decode one frame; surrounding whitespace is ignored
pub fn decode<T: for<'de> Deserialize<'de>>(line: &str) -> Result<T, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(line)?)
}
