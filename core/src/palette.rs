// SPDX-License-Identifier: MIT OR Apache-2.0

//! Colours used by the render pipeline.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour, straight (unmultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque grey with all three channels set to `v`
    pub const fn grey(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Channels as `[0.0, 1.0]` floats
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Canvas clear colour outside of board mode
pub const BACKGROUND: Rgba = Rgba::grey(51);
/// Clear colour behind the board art
pub const BOARD_BACKGROUND: Rgba = Rgba::grey(255);

pub const WHITE_PIECE: Rgba = Rgba::rgb(242, 223, 223);
pub const BLACK_PIECE: Rgba = Rgba::rgb(129, 122, 127);
pub const PIECE_OUTLINE: Rgba = Rgba::grey(51);

pub const MESSAGE_TEXT: Rgba = Rgba::rgb(100, 80, 200);
pub const SCORE_TEXT: Rgba = Rgba::grey(0);
pub const STATUS_TEXT: Rgba = Rgba::grey(51);

/// Frame drawn around the Anubis panel
pub const ANUBIS_FRAME: Rgba = Rgba::rgb(151, 99, 12);
pub const ANUBIS_TINT: Rgba = Rgba::rgba(252, 204, 155, 120);

pub const ERROR_OVERLAY: Rgba = Rgba::rgba(255, 99, 71, 70);
pub const ERROR_TEXT: Rgba = Rgba::rgb(255, 0, 0);

/// Piece colour for the side whose slot value is `white`
pub fn piece(white: bool) -> Rgba {
    if white {
        WHITE_PIECE
    } else {
        BLACK_PIECE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_conversion() {
        let c = Rgba::rgba(255, 0, 51, 0).to_f32();
        assert_eq!(c[0], 1.0);
        assert_eq!(c[1], 0.0);
        assert!((c[2] - 0.2).abs() < 0.001);
        assert_eq!(c[3], 0.0);
    }

    #[test]
    fn test_piece_colours_differ() {
        assert_ne!(piece(true), piece(false));
        assert_eq!(piece(true), WHITE_PIECE);
    }
}
