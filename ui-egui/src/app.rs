// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main application: board canvas, pointer wiring and the House of Waters
//! prompt.

use crossbeam_channel::{Receiver, Sender};
use egui::{Align2, Pos2, Sense, Vec2};
use senet_core::geometry::{CANVAS_HEIGHT, CANVAS_WIDTH};
use senet_core::interaction::{WATERS_PROMPT, WATERS_TITLE};
use senet_core::{
    Applied, BoardController, ErrorData, InteractionState, Point, ReleaseOutcome, RenderRequest, RenderStep,
    RetryPolicy, SoundCue, SoundPlayer,
};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::msg::{NetToUi, UiToNet};
use crate::sound_manager::SoundManager;
use crate::surface::{EguiSurface, ImageCatalog};

/// How often the UI polls the worker channel when nothing else happens
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct SenetApp {
    controller: BoardController,
    sounds: SoundManager,
    images: ImageCatalog,
    ui_tx: Sender<UiToNet>,
    ui_rx: Receiver<NetToUi>,
    worker_handle: Option<JoinHandle<()>>,
    scale: f32,
    /// Connection label shown under the canvas
    link: String,
    /// Earliest time to try a frame again after the surface was not ready
    retry_at: Option<Instant>,
}

impl SenetApp {
    pub fn new(
        ui_tx: Sender<UiToNet>,
        ui_rx: Receiver<NetToUi>,
        policy: RetryPolicy,
        sounds: SoundManager,
        images: ImageCatalog,
        scale: f32,
    ) -> Self {
        Self {
            controller: BoardController::new(policy),
            sounds,
            images,
            ui_tx,
            ui_rx,
            worker_handle: None,
            scale,
            link: "Connecting...".to_string(),
            retry_at: None,
        }
    }

    pub fn set_worker_handle(&mut self, handle: JoinHandle<()>) {
        self.worker_handle = Some(handle);
    }

    pub fn controller(&self) -> &BoardController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut BoardController {
        &mut self.controller
    }

    pub fn sounds(&self) -> &SoundManager {
        &self.sounds
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// Drain everything the worker has sent. Returns whether anything arrived.
    pub fn handle_network_messages(&mut self) -> bool {
        let mut any = false;
        // Try to receive all pending messages without blocking
        while let Ok(msg) = self.ui_rx.try_recv() {
            any = true;
            match msg {
                NetToUi::Connected { peer } => {
                    tracing::info!(peer = %peer, "Connected");
                    self.link = format!("Connected to {}", peer);
                }
                NetToUi::Event(event) => match self.controller.apply_event(event) {
                    Applied::Play(cue) => self.sounds.play(cue),
                    Applied::Redraw | Applied::Ignored => {}
                },
                NetToUi::Disconnected { reason } => {
                    self.link = "Disconnected".to_string();
                    self.controller
                        .set_request(RenderRequest::Error(ErrorData::new("Disconnected", reason)));
                }
                NetToUi::Error { message } => {
                    self.link = "Not connected".to_string();
                    self.controller
                        .set_request(RenderRequest::Error(ErrorData::new("Connection failed", message)));
                }
                NetToUi::ShutdownAck => {
                    tracing::debug!("Worker acknowledged shutdown");
                }
            }
        }
        any
    }

    pub fn pointer_pressed(&mut self, at: Point) -> bool {
        self.controller.press(at)
    }

    pub fn pointer_moved(&mut self, at: Point) -> bool {
        self.controller.drag(at)
    }

    pub fn pointer_released(&mut self) -> ReleaseOutcome {
        let outcome = self.controller.release();
        match outcome {
            ReleaseOutcome::Rejected => self.sounds.play(SoundCue::Error),
            ReleaseOutcome::Move(intent) => self.send(UiToNet::PieceMove(intent)),
            ReleaseOutcome::Ignored | ReleaseOutcome::Unchanged | ReleaseOutcome::NeedsConfirmation(_) => {}
        }
        outcome
    }

    /// Answer the House of Waters prompt
    pub fn answer_confirmation(&mut self, accepted: bool) {
        if let Some(intent) = self.controller.resolve_confirmation(accepted) {
            self.send(UiToNet::PieceMove(intent));
        }
    }

    fn send(&self, msg: UiToNet) {
        if self.ui_tx.send(msg).is_err() {
            tracing::warn!("Network worker is gone, dropping message");
        }
    }

    fn to_canvas(&self, origin: Pos2, p: Pos2) -> Point {
        Point::new((p.x - origin.x) / self.scale, (p.y - origin.y) / self.scale)
    }

    fn handle_pointer(&mut self, ui: &egui::Ui, canvas: egui::Rect) {
        let (pressed, down, released, moved, pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.delta() != Vec2::ZERO,
                i.pointer.interact_pos(),
            )
        });

        if pressed {
            if let Some(p) = pos.filter(|p| canvas.contains(*p)) {
                self.pointer_pressed(self.to_canvas(canvas.min, p));
            }
        } else if down && moved {
            if let Some(p) = pos {
                self.pointer_moved(self.to_canvas(canvas.min, p));
            }
        }

        if released {
            self.pointer_released();
        }
    }

    fn draw_board(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let size = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT) * self.scale;
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let canvas = response.rect;

        self.handle_pointer(ui, canvas);

        if let Some(at) = self.retry_at {
            if Instant::now() < at {
                ctx.request_repaint_after(at - Instant::now());
                return;
            }
            self.retry_at = None;
        }

        let mut surface = EguiSurface::new(ctx, &painter, &mut self.images, canvas, self.scale);
        match self.controller.render(&mut surface) {
            RenderStep::Done(_) => {}
            RenderStep::RetryAfter(delay) => {
                self.retry_at = Some(Instant::now() + delay);
                ctx.request_repaint_after(delay);
            }
            RenderStep::GaveUp => {}
        }
    }

    fn show_confirmation(&mut self, ctx: &egui::Context) {
        if !matches!(self.controller.state(), InteractionState::Confirming(_)) {
            return;
        }

        let mut answer = None;
        egui::Window::new(WATERS_TITLE)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(WATERS_PROMPT);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(accepted) = answer {
            self.answer_confirmation(accepted);
        }
    }
}

impl eframe::App for SenetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_messages();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_board(ctx, ui);
            ui.separator();
            ui.label(&self.link);
        });

        self.show_confirmation(ctx);

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}

impl Drop for SenetApp {
    fn drop(&mut self) {
        if let Some(handle) = self.worker_handle.take() {
            // Tell worker to quit
            let _ = self.ui_tx.send(UiToNet::Shutdown);
            // Wait for graceful shutdown
            handle.join().ok();
        }
    }
}
