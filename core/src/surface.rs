// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drawing surface abstraction.
//!
//! The render pipeline only talks to a [`Surface`]; the desktop client
//! implements it over an egui painter, tests and the CLI use
//! [`RecordingSurface`].

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::geometry::{Point, Rect, Size};
use crate::palette::Rgba;

/// Static images the board needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKey {
    Board,
    Anubis,
    BlackStick,
    WhiteStick,
}

impl ImageKey {
    pub const ALL: [ImageKey; 4] = [
        ImageKey::Board,
        ImageKey::Anubis,
        ImageKey::BlackStick,
        ImageKey::WhiteStick,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ImageKey::Board => "senet-board.png",
            ImageKey::Anubis => "anubis.png",
            ImageKey::BlackStick => "black-stick.png",
            ImageKey::WhiteStick => "white-stick.png",
        }
    }

    /// Face image for a stick result
    pub fn stick(white: bool) -> Self {
        if white {
            ImageKey::WhiteStick
        } else {
            ImageKey::BlackStick
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Rgba,
}

impl Stroke {
    pub const fn new(width: f32, color: Rgba) -> Self {
        Self { width, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Rgba,
}

impl TextStyle {
    pub const fn new(size: f32, color: Rgba) -> Self {
        Self { size, bold: false, color }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// The backing surface cannot draw yet (assets still loading, context not
/// created). The caller retries after a delay.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("drawing surface is not ready")]
pub struct SurfaceNotReady;

/// Drawing primitives the render pipeline needs.
///
/// Text is anchored at its left baseline.
pub trait Surface {
    /// Start a frame, clearing to `background`.
    fn begin_frame(&mut self, background: Rgba) -> Result<(), SurfaceNotReady>;

    fn fill_background(&mut self, color: Rgba);

    /// Draw an image with its top-left corner at `at`; `size: None` keeps
    /// the natural size.
    fn image(&mut self, key: ImageKey, at: Point, size: Option<Size>);

    /// Natural size of an image, if known
    fn image_size(&self, key: ImageKey) -> Option<Size>;

    fn rect(&mut self, rect: Rect, fill: Option<Rgba>, stroke: Option<Stroke>);

    fn disc(&mut self, center: Point, radius: f32, fill: Rgba, stroke: Option<Stroke>);

    fn text(&mut self, text: &str, at: Point, style: TextStyle);
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(Rgba),
    Image { key: ImageKey, at: Point, size: Option<Size> },
    Rect { rect: Rect, fill: Option<Rgba>, stroke: Option<Stroke> },
    Disc { center: Point, radius: f32, fill: Rgba, stroke: Option<Stroke> },
    Text { text: String, at: Point, style: TextStyle },
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Background(c) => write!(f, "background rgba({},{},{},{})", c.r, c.g, c.b, c.a),
            DrawCommand::Image { key, at, size } => {
                write!(f, "image {} at ({}, {})", key.file_name(), at.x, at.y)?;
                if let Some(size) = size {
                    write!(f, " size {}x{}", size.width, size.height)?;
                }
                Ok(())
            }
            DrawCommand::Rect { rect, .. } => {
                write!(f, "rect ({}, {}) {}x{}", rect.x, rect.y, rect.width, rect.height)
            }
            DrawCommand::Disc { center, radius, fill, .. } => write!(
                f,
                "disc ({:.1}, {:.1}) r={:.1} rgb({},{},{})",
                center.x, center.y, radius, fill.r, fill.g, fill.b
            ),
            DrawCommand::Text { text, at, style } => write!(
                f,
                "text {:?} at ({:.1}, {:.1}) size {}{}",
                text,
                at.x,
                at.y,
                style.size,
                if style.bold { " bold" } else { "" }
            ),
        }
    }
}

/// In-memory surface that records every primitive
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    ready: bool,
    image_sizes: HashMap<ImageKey, Size>,
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingSurface {
    /// A ready surface with the stock asset sizes
    pub fn new() -> Self {
        let mut image_sizes = HashMap::new();
        image_sizes.insert(ImageKey::Board, Size::new(700.0, 237.0));
        image_sizes.insert(ImageKey::Anubis, Size::new(179.0, 215.0));
        image_sizes.insert(ImageKey::BlackStick, Size::new(30.0, 110.0));
        image_sizes.insert(ImageKey::WhiteStick, Size::new(30.0, 110.0));
        Self {
            ready: true,
            image_sizes,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// A surface whose `begin_frame` fails until [`set_ready`](Self::set_ready)
    pub fn not_ready() -> Self {
        let mut surface = Self::new();
        surface.ready = false;
        surface
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames successfully started
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// All text drawn in the last frame, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn discs(&self) -> Vec<(Point, Rgba)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Disc { center, fill, .. } => Some((*center, *fill)),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RecordingSurface {
    fn begin_frame(&mut self, background: Rgba) -> Result<(), SurfaceNotReady> {
        if !self.ready {
            return Err(SurfaceNotReady);
        }
        self.frames += 1;
        self.commands.clear();
        self.commands.push(DrawCommand::Background(background));
        Ok(())
    }

    fn fill_background(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Background(color));
    }

    fn image(&mut self, key: ImageKey, at: Point, size: Option<Size>) {
        self.commands.push(DrawCommand::Image { key, at, size });
    }

    fn image_size(&self, key: ImageKey) -> Option<Size> {
        self.image_sizes.get(&key).copied()
    }

    fn rect(&mut self, rect: Rect, fill: Option<Rgba>, stroke: Option<Stroke>) {
        self.commands.push(DrawCommand::Rect { rect, fill, stroke });
    }

    fn disc(&mut self, center: Point, radius: f32, fill: Rgba, stroke: Option<Stroke>) {
        self.commands.push(DrawCommand::Disc { center, radius, fill, stroke });
    }

    fn text(&mut self, text: &str, at: Point, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style,
        });
    }
}
