// SPDX-License-Identifier: MIT OR Apache-2.0

//! egui implementation of the drawing surface.
//!
//! The render pipeline works in canvas units (879 x 400); the surface maps
//! them onto the allocated screen rect with a uniform scale.

use egui::load::{SizeHint, SizedTexture, TexturePoll};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rounding, TextureOptions, Vec2};
use senet_core::palette::Rgba;
use senet_core::surface::{Stroke, TextStyle};
use senet_core::{ImageKey, Point, Rect, Size, Surface, SurfaceNotReady};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Placeholder fill for an image that failed to load
const MISSING_IMAGE: Color32 = Color32::from_rgb(90, 90, 90);

/// Where the board images come from, and which of them are broken
pub struct ImageCatalog {
    assets_dir: PathBuf,
    missing: HashSet<ImageKey>,
}

impl ImageCatalog {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            missing: HashSet::new(),
        }
    }

    pub fn uri(&self, key: ImageKey) -> String {
        format!("file://{}", self.assets_dir.join(key.file_name()).display())
    }

    /// Images that could not be loaded at all
    pub fn missing(&self) -> &HashSet<ImageKey> {
        &self.missing
    }
}

pub struct EguiSurface<'a> {
    ctx: &'a egui::Context,
    painter: &'a Painter,
    catalog: &'a mut ImageCatalog,
    canvas: egui::Rect,
    scale: f32,
    textures: HashMap<ImageKey, SizedTexture>,
}

impl<'a> EguiSurface<'a> {
    /// `canvas` is the screen rect the board occupies
    pub fn new(
        ctx: &'a egui::Context,
        painter: &'a Painter,
        catalog: &'a mut ImageCatalog,
        canvas: egui::Rect,
        scale: f32,
    ) -> Self {
        Self {
            ctx,
            painter,
            catalog,
            canvas,
            scale,
            textures: HashMap::new(),
        }
    }

    fn to_screen(&self, p: Point) -> Pos2 {
        self.canvas.min + Vec2::new(p.x, p.y) * self.scale
    }

    fn screen_rect(&self, rect: Rect) -> egui::Rect {
        egui::Rect::from_min_size(
            self.to_screen(rect.origin()),
            Vec2::new(rect.width, rect.height) * self.scale,
        )
    }

    /// Poll every image once. Any still loading means the frame must wait.
    fn load_textures(&mut self) -> Result<(), SurfaceNotReady> {
        for key in ImageKey::ALL {
            if self.catalog.missing.contains(&key) {
                continue;
            }
            let uri = self.catalog.uri(key);
            match self.ctx.try_load_texture(&uri, TextureOptions::LINEAR, SizeHint::default()) {
                Ok(TexturePoll::Ready { texture }) => {
                    self.textures.insert(key, texture);
                }
                Ok(TexturePoll::Pending { .. }) => return Err(SurfaceNotReady),
                Err(e) => {
                    tracing::warn!(uri = %uri, error = %e, "Failed to load board image");
                    self.catalog.missing.insert(key);
                }
            }
        }
        Ok(())
    }
}

fn color(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn stroke(s: Option<Stroke>, scale: f32) -> egui::Stroke {
    match s {
        Some(s) => egui::Stroke::new(s.width * scale, color(s.color)),
        None => egui::Stroke::NONE,
    }
}

impl Surface for EguiSurface<'_> {
    fn begin_frame(&mut self, background: Rgba) -> Result<(), SurfaceNotReady> {
        self.textures.clear();
        self.load_textures()?;
        self.fill_background(background);
        Ok(())
    }

    fn fill_background(&mut self, c: Rgba) {
        self.painter.rect_filled(self.canvas, Rounding::ZERO, color(c));
    }

    fn image(&mut self, key: ImageKey, at: Point, size: Option<Size>) {
        let texture = self.textures.get(&key).copied();
        let size = size
            .or_else(|| self.image_size(key))
            .unwrap_or(Size::new(0.0, 0.0));
        let rect = self.screen_rect(Rect::new(at.x, at.y, size.width, size.height));

        match texture {
            Some(texture) => {
                let uv = egui::Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                self.painter.image(texture.id, rect, uv, Color32::WHITE);
            }
            None => {
                self.painter.rect_filled(rect, Rounding::ZERO, MISSING_IMAGE);
            }
        }
    }

    fn image_size(&self, key: ImageKey) -> Option<Size> {
        self.textures
            .get(&key)
            .map(|t| Size::new(t.size.x, t.size.y))
    }

    fn rect(&mut self, rect: Rect, fill: Option<Rgba>, outline: Option<Stroke>) {
        let fill = fill.map(color).unwrap_or(Color32::TRANSPARENT);
        self.painter.rect(
            self.screen_rect(rect),
            Rounding::ZERO,
            fill,
            stroke(outline, self.scale),
        );
    }

    fn disc(&mut self, center: Point, radius: f32, fill: Rgba, outline: Option<Stroke>) {
        self.painter.circle(
            self.to_screen(center),
            radius * self.scale,
            color(fill),
            stroke(outline, self.scale),
        );
    }

    fn text(&mut self, text: &str, at: Point, style: TextStyle) {
        let pos = self.to_screen(at);
        let font = FontId::proportional(style.size * self.scale);
        let c = color(style.color);
        self.painter.text(pos, Align2::LEFT_BOTTOM, text, font.clone(), c);
        if style.bold {
            // No bold face in the default fonts; overdraw one pixel across
            self.painter
                .text(pos + Vec2::new(1.0, 0.0), Align2::LEFT_BOTTOM, text, font, c);
        }
    }
}
