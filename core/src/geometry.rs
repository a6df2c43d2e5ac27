// SPDX-License-Identifier: MIT OR Apache-2.0

//! Geometry engine: maps canvas coordinates to houses and lays out the
//! pieces held by Anubis.
//!
//! All coordinates are logical canvas pixels with the origin at the top-left
//! corner of the board image. The canvas is the board (700 x 237) with the
//! Anubis panel attached to its right edge; the stick row sits below.

use serde::{Deserialize, Serialize};

/// Width of the board image
pub const BOARD_WIDTH: f32 = 700.0;
/// Height of the board image
pub const BOARD_HEIGHT: f32 = 237.0;
/// Width of the Anubis panel
pub const ANUBIS_WIDTH: f32 = 179.0;
/// Height of the Anubis panel
pub const ANUBIS_HEIGHT: f32 = 215.0;
/// Vertical offset of the Anubis panel
pub const ANUBIS_PADDING: f32 = 11.0;

pub const CANVAS_WIDTH: f32 = BOARD_WIDTH + ANUBIS_WIDTH;
pub const CANVAS_HEIGHT: f32 = 400.0;

/// Metrics cell width divided by this gives the piece half-size `w`
pub const PIECE_SCALE: f32 = 3.5;

/// The House of Waters. Moving a piece out of it needs confirmation.
pub const HOUSE_OF_WATERS: usize = 26;

/// Region where captured pieces are displayed
pub const CAPTURE_ZONE: Rect = Rect::new(BOARD_WIDTH, ANUBIS_PADDING, ANUBIS_WIDTH, ANUBIS_HEIGHT);

/// A point on the canvas. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Drop the fractional part of both coordinates
    pub fn truncated(self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc())
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn canvas() -> Self {
        Self::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict containment: points on the edge are outside
    pub fn contains(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }
}

/// A captured piece placed inside the capture zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapturedPiece {
    pub white: bool,
    pub center: Point,
}

/// Whether `p` lies inside the `± w` box around `anchor`
pub fn is_over(anchor: Point, p: Point, w: f32) -> bool {
    (p.x - anchor.x).abs() < w && (p.y - anchor.y).abs() < w
}

/// Index of the first house whose anchor box contains `p`.
///
/// Anchors are tested in house order, so overlapping boxes resolve to the
/// lowest index.
pub fn house_at<I>(anchors: I, p: Point, w: f32) -> Option<usize>
where
    I: IntoIterator<Item = Point>,
{
    anchors.into_iter().position(|anchor| is_over(anchor, p, w))
}

/// Whether `p` is over the Anubis panel
pub fn is_over_capture_zone(p: Point) -> bool {
    CAPTURE_ZONE.contains(p)
}

/// Whether a dragged piece may follow the pointer to `p`.
///
/// Keeps a margin of `w` from the canvas sides and from the bottom edge of
/// the board, so a piece can never be dragged onto the stick row.
pub fn within_drag_bounds(p: Point, w: f32) -> bool {
    !(p.x < w || p.x > CANVAS_WIDTH - w || p.y < w || p.y > BOARD_HEIGHT - w)
}

/// Grid placement for captured pieces, white first then black.
///
/// Pieces run left to right and wrap to a new row once the next piece would
/// cross the right edge of the zone. Column and row spacing derive from `w`.
pub fn capture_layout(white: u32, black: u32, w: f32) -> Vec<CapturedPiece> {
    let gap = w * 2.0;
    let mut x = w;
    let mut y = CAPTURE_ZONE.y + w;

    let colours = std::iter::repeat(true)
        .take(white as usize)
        .chain(std::iter::repeat(false).take(black as usize));

    let mut placed = Vec::with_capacity((white as usize).saturating_add(black as usize).min(64));
    for is_white in colours {
        placed.push(CapturedPiece {
            white: is_white,
            center: Point::new(CAPTURE_ZONE.x + x + w, y + w),
        });
        x += gap + w / 2.0;
        if x + w >= CAPTURE_ZONE.width {
            x = w;
            y += gap + w;
        }
    }
    placed
}
