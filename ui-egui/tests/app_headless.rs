// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives the app glue without a window: network messages in, pointer
//! gestures through the controller, move requests out.

use crossbeam_channel::{unbounded, Receiver, Sender};
use senet_core::{
    Destination, MoveIntent, Point, RecordingSurface, ReleaseOutcome, RenderRequest, RetryPolicy, ServerEvent,
    Slot, SoundCue,
};
use senet_network::{demo_metrics, demo_snapshot};
use senet_ui_egui::app::SenetApp;
use senet_ui_egui::msg::{NetToUi, UiToNet};
use senet_ui_egui::sound_manager::SoundManager;
use senet_ui_egui::surface::ImageCatalog;

struct Harness {
    app: SenetApp,
    net_tx: Sender<NetToUi>,
    net_rx: Receiver<UiToNet>,
}

fn harness() -> Harness {
    let (ui_tx, net_rx) = unbounded();
    let (net_tx, ui_rx) = unbounded();
    let app = SenetApp::new(
        ui_tx,
        ui_rx,
        RetryPolicy::default(),
        SoundManager::new("assets/sounds"),
        ImageCatalog::new("assets"),
        1.0,
    );
    Harness { app, net_tx, net_rx }
}

/// Push `snapshot` with the demo metrics and draw it once
fn show_board(h: &mut Harness, snapshot: senet_core::BoardSnapshot) {
    h.net_tx.send(NetToUi::Connected { peer: "test".into() }).unwrap();
    h.net_tx
        .send(NetToUi::Event(ServerEvent::BoardRenderInfo(demo_metrics())))
        .unwrap();
    h.net_tx.send(NetToUi::Event(ServerEvent::BoardInfo(snapshot))).unwrap();
    assert!(h.app.handle_network_messages());
    h.app.controller_mut().render(&mut RecordingSurface::new());
    assert!(h.app.controller().is_board_active());
}

// Demo board anchors: row 0 runs left to right, row 1 right to left.
const HOUSE_1: Point = Point::new(126.0, 59.0);
const HOUSE_12: Point = Point::new(510.0, 118.0);
const HOUSE_26: Point = Point::new(446.0, 177.0);
const HOUSE_28: Point = Point::new(574.0, 177.0);

#[test]
fn drag_sends_move_to_worker() {
    let mut h = harness();
    show_board(&mut h, demo_snapshot());
    assert_eq!(h.app.link(), "Connected to test");

    assert!(h.app.pointer_pressed(HOUSE_1));
    assert!(h.app.pointer_moved(HOUSE_12));
    let outcome = h.app.pointer_released();
    assert!(matches!(outcome, ReleaseOutcome::Move(_)));

    match h.net_rx.try_recv() {
        Ok(UiToNet::PieceMove(intent)) => assert_eq!(
            intent,
            MoveIntent {
                from: 1,
                to: Destination::House(12),
                flag: false,
            }
        ),
        other => panic!("expected a move request, got {:?}", other),
    }
}

#[test]
fn rejected_drop_plays_error_sound() {
    let mut h = harness();
    show_board(&mut h, demo_snapshot());

    assert!(h.app.pointer_pressed(HOUSE_1));
    h.app.pointer_moved(Point::new(680.0, 200.0));
    assert_eq!(h.app.pointer_released(), ReleaseOutcome::Rejected);

    assert_eq!(h.app.sounds().last_played(), Some(SoundCue::Error));
    assert!(h.net_rx.try_recv().is_err());
}

#[test]
fn waters_move_is_sent_only_after_answer() {
    let mut snapshot = demo_snapshot();
    snapshot.board[26] = Slot::White;
    let mut h = harness();
    show_board(&mut h, snapshot);

    assert!(h.app.pointer_pressed(HOUSE_26));
    h.app.pointer_moved(HOUSE_28);
    assert!(matches!(h.app.pointer_released(), ReleaseOutcome::NeedsConfirmation(_)));
    assert!(h.net_rx.try_recv().is_err());

    h.app.answer_confirmation(true);
    match h.net_rx.try_recv() {
        Ok(UiToNet::PieceMove(intent)) => {
            assert_eq!(intent.from, 26);
            assert_eq!(intent.to, Destination::House(28));
            assert!(intent.flag);
        }
        other => panic!("expected a move request, got {:?}", other),
    }
}

#[test]
fn sound_event_reaches_sound_manager() {
    let mut h = harness();
    h.net_tx
        .send(NetToUi::Event(ServerEvent::Sound("anubis-final".into())))
        .unwrap();
    h.app.handle_network_messages();
    assert_eq!(h.app.sounds().last_played(), Some(SoundCue::AnubisFinal));
}

#[test]
fn disconnect_shows_error_panel() {
    let mut h = harness();
    show_board(&mut h, demo_snapshot());

    h.net_tx
        .send(NetToUi::Disconnected {
            reason: "gone".into(),
        })
        .unwrap();
    h.app.handle_network_messages();

    assert!(matches!(h.app.controller().request(), RenderRequest::Error(_)));
    let mut surface = RecordingSurface::new();
    h.app.controller_mut().render(&mut surface);
    assert_eq!(surface.texts(), vec!["Disconnected", "gone"]);
    assert!(!h.app.pointer_pressed(HOUSE_1));
}
