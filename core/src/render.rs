// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mode-dispatched render pipeline.
//!
//! [`render`] draws one frame for a [`RenderRequest`]. Board mode never draws
//! on incomplete state: without both a snapshot and metrics it falls through
//! to the error panel. A surface that is not ready yet is reported as
//! [`RenderError::SurfaceNotReady`] and retried by [`RenderScheduler`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::geometry::{
    capture_layout, Point, Size, ANUBIS_HEIGHT, ANUBIS_PADDING, ANUBIS_WIDTH, BOARD_HEIGHT,
    BOARD_WIDTH, CAPTURE_ZONE,
};
use crate::model::{BoardSnapshot, RenderMetrics};
use crate::palette;
use crate::surface::{ImageKey, Stroke, Surface, TextStyle};

pub const INSTRUCTIONS_TEXT: &str = "Follow instructions below";
pub const DEFAULT_ERROR_TITLE: &str = "Error";
pub const DEFAULT_ERROR_MESSAGE: &str = "An unknown error occurred";
pub const MISSING_STATE_TITLE: &str = "Cannot Render Game";
pub const MISSING_STATE_MESSAGE: &str = "Missing information";

const TURN_TEXT_SIZE: f32 = 17.0;
const STICK_GAP: f32 = 37.0;
const STICK_ROW_OFFSET: f32 = 20.0;
const STATUS_TEXT_SIZE: f32 = 14.0;

/// Named render modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    Message,
    Instructions,
    Board,
    Error,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Message => "message",
            RenderMode::Instructions => "instructions",
            RenderMode::Board => "board",
            RenderMode::Error => "error",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown render mode '{0}'")]
pub struct UnknownRenderMode(pub String);

impl FromStr for RenderMode {
    type Err = UnknownRenderMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(RenderMode::Message),
            "instructions" => Ok(RenderMode::Instructions),
            "board" => Ok(RenderMode::Board),
            "error" => Ok(RenderMode::Error),
            other => Err(UnknownRenderMode(other.to_string())),
        }
    }
}

/// Payload for `message` mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextData {
    pub text: String,
}

impl TextData {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Payload for `error` mode; missing fields fall back to generic text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorData {
    pub title: Option<String>,
    pub message: Option<String>,
}

impl ErrorData {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: Some(message.into()),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: Some(message.into()),
        }
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_ERROR_TITLE)
    }

    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_ERROR_MESSAGE)
    }
}

/// Everything board mode reads
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardData<'a> {
    pub snapshot: Option<&'a BoardSnapshot>,
    pub metrics: Option<&'a RenderMetrics>,
    /// Status line drawn beside the sticks
    pub status: &'a str,
}

/// What to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRequest {
    Message(TextData),
    Instructions,
    Board,
    Error(ErrorData),
    /// A mode name nothing handles; drawn as an error panel
    Unknown(String),
}

impl RenderRequest {
    /// Build a request from a mode name. `text` feeds the message body of
    /// `message` and `error` modes.
    pub fn from_mode(mode: &str, text: Option<String>) -> Self {
        match mode.parse::<RenderMode>() {
            Ok(RenderMode::Message) => RenderRequest::Message(TextData::new(text.unwrap_or_default())),
            Ok(RenderMode::Instructions) => RenderRequest::Instructions,
            Ok(RenderMode::Board) => RenderRequest::Board,
            Ok(RenderMode::Error) => RenderRequest::Error(ErrorData {
                title: None,
                message: text,
            }),
            Err(UnknownRenderMode(name)) => RenderRequest::Unknown(name),
        }
    }
}

/// Outcome of a drawn frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered {
    /// Mode of the panel that ended up on screen
    pub mode: RenderMode,
}

impl Rendered {
    /// Pointer input only means something while the board is on screen
    pub fn board_active(&self) -> bool {
        self.mode == RenderMode::Board
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    #[error("drawing surface not ready")]
    SurfaceNotReady,
}

/// Draw one frame
pub fn render<S>(surface: &mut S, request: &RenderRequest, data: BoardData<'_>) -> Result<Rendered, RenderError>
where
    S: Surface + ?Sized,
{
    surface
        .begin_frame(palette::BACKGROUND)
        .map_err(|_| RenderError::SurfaceNotReady)?;
    Ok(dispatch(surface, request, data))
}

fn dispatch<S>(surface: &mut S, request: &RenderRequest, data: BoardData<'_>) -> Rendered
where
    S: Surface + ?Sized,
{
    surface.fill_background(palette::BACKGROUND);

    match request {
        RenderRequest::Message(text) => {
            surface.text(&text.text, Point::new(10.0, 50.0), TextStyle::new(30.0, palette::MESSAGE_TEXT));
            Rendered { mode: RenderMode::Message }
        }
        RenderRequest::Instructions => {
            dispatch(surface, &RenderRequest::Message(TextData::new(INSTRUCTIONS_TEXT)), data)
        }
        RenderRequest::Board => draw_board(surface, data),
        RenderRequest::Error(error) => {
            draw_error(surface, error);
            Rendered { mode: RenderMode::Error }
        }
        RenderRequest::Unknown(mode) => {
            tracing::warn!(mode = %mode, "Unknown render mode");
            let error = ErrorData::message(format!("Unknown render mode '{}'", mode));
            dispatch(surface, &RenderRequest::Error(error), data)
        }
    }
}

fn draw_board<S>(surface: &mut S, data: BoardData<'_>) -> Rendered
where
    S: Surface + ?Sized,
{
    surface.fill_background(palette::BOARD_BACKGROUND);
    surface.image(
        ImageKey::Board,
        Point::new(0.0, 0.0),
        Some(Size::new(BOARD_WIDTH, BOARD_HEIGHT)),
    );
    surface.image(
        ImageKey::Anubis,
        Point::new(BOARD_WIDTH, ANUBIS_PADDING),
        Some(Size::new(ANUBIS_WIDTH, ANUBIS_HEIGHT)),
    );
    surface.rect(
        CAPTURE_ZONE,
        Some(palette::ANUBIS_TINT),
        Some(Stroke::new(3.0, palette::ANUBIS_FRAME)),
    );

    let (Some(snapshot), Some(metrics)) = (data.snapshot, data.metrics) else {
        tracing::warn!(
            has_snapshot = data.snapshot.is_some(),
            has_metrics = data.metrics.is_some(),
            "Board render requested without complete state"
        );
        let error = ErrorData::new(MISSING_STATE_TITLE, MISSING_STATE_MESSAGE);
        return dispatch(surface, &RenderRequest::Error(error), data);
    };

    draw_turn(surface, snapshot, metrics);

    let w = metrics.piece_width();
    let outline = Some(Stroke::new(2.0, palette::PIECE_OUTLINE));
    for (slot, pos) in snapshot.board.iter().zip(&snapshot.pos) {
        if let Some(white) = slot.color() {
            surface.disc(*pos, w, palette::piece(white), outline);
        }
    }

    draw_sticks(surface, snapshot, data.status);

    let (white, black) = snapshot.at_anubis;
    for piece in capture_layout(white, black, w) {
        surface.disc(piece.center, w, palette::piece(piece.white), outline);
    }

    Rendered { mode: RenderMode::Board }
}

fn draw_turn<S>(surface: &mut S, snapshot: &BoardSnapshot, metrics: &RenderMetrics)
where
    S: Surface + ?Sized,
{
    let style = TextStyle::new(TURN_TEXT_SIZE, palette::piece(snapshot.white_go));
    let x = metrics.padding + metrics.border;
    let label = snapshot.turn_label();
    surface.text(label, Point::new(x, metrics.padding), style);
    surface.text(label, Point::new(x, BOARD_HEIGHT - metrics.padding / 3.0), style);
}

fn draw_sticks<S>(surface: &mut S, snapshot: &BoardSnapshot, status: &str)
where
    S: Surface + ?Sized,
{
    let y = BOARD_HEIGHT + STICK_ROW_OFFSET;
    for (i, white) in snapshot.sticks.iter().enumerate() {
        let x = (i as f32 + 1.0) * STICK_GAP;
        surface.image(ImageKey::stick(*white), Point::new(x, y), None);
    }

    if let Some(score) = snapshot.score {
        let stick_height = surface
            .image_size(ImageKey::WhiteStick)
            .map(|s| s.height)
            .unwrap_or(0.0);
        surface.text(
            &score.to_string(),
            Point::new(STICK_GAP / 3.0, y + stick_height / 2.0),
            TextStyle::new(TURN_TEXT_SIZE, palette::SCORE_TEXT),
        );
    }

    if !status.is_empty() {
        let x = (snapshot.sticks.len() as f32 + 3.0) * STICK_GAP;
        surface.text(status, Point::new(x, y), TextStyle::new(STATUS_TEXT_SIZE, palette::STATUS_TEXT));
    }
}

fn draw_error<S>(surface: &mut S, error: &ErrorData)
where
    S: Surface + ?Sized,
{
    surface.fill_background(palette::ERROR_OVERLAY);
    surface.text(
        error.title_or_default(),
        Point::new(10.0, 75.0),
        TextStyle::new(25.0, palette::ERROR_TEXT).bold(),
    );
    surface.text(
        error.message_or_default(),
        Point::new(10.0, 100.0),
        TextStyle::new(18.0, palette::ERROR_TEXT),
    );
}

/// Fixed-delay, bounded retry for a surface that is not ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(100),
            max_attempts: 50,
        }
    }
}

/// What the caller should do after a render attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    Done(Rendered),
    RetryAfter(Duration),
    /// Retries exhausted; nothing was drawn
    GaveUp,
}

/// Tracks consecutive not-ready attempts against a [`RetryPolicy`]
#[derive(Debug, Clone, Default)]
pub struct RenderScheduler {
    policy: RetryPolicy,
    attempts: u32,
}

impl RenderScheduler {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy, attempts: 0 }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn step(&mut self, result: Result<Rendered, RenderError>) -> RenderStep {
        match result {
            Ok(rendered) => {
                self.attempts = 0;
                RenderStep::Done(rendered)
            }
            Err(RenderError::SurfaceNotReady) => {
                self.attempts += 1;
                if self.attempts > self.policy.max_attempts {
                    if self.attempts == self.policy.max_attempts + 1 {
                        tracing::warn!(attempts = self.attempts, "Surface never became ready, giving up");
                    }
                    RenderStep::GaveUp
                } else {
                    tracing::debug!(attempt = self.attempts, "Surface not ready, retrying");
                    RenderStep::RetryAfter(self.policy.delay)
                }
            }
        }
    }

    /// Forget previous failures, e.g. when a new request arrives
    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}
