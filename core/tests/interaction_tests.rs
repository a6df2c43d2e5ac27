// SPDX-License-Identifier: MIT OR Apache-2.0

mod common;

use common::{anchor, opening, ready_controller, snapshot_with};
use senet_core::{
    BoardController, Destination, InteractionState, MoveIntent, Point, RecordingSurface, ReleaseOutcome,
    RetryPolicy, Slot, HOUSE_OF_WATERS,
};

fn drag_and_drop(controller: &mut BoardController, from: Point, to: Point) -> ReleaseOutcome {
    assert!(controller.press(from), "nothing picked up at {:?}", from);
    controller.drag(to);
    controller.release()
}

#[test]
fn white_moves_five_to_eight() {
    let (mut controller, _) = ready_controller(opening());

    let outcome = drag_and_drop(&mut controller, anchor(5), anchor(8));

    assert_eq!(
        outcome,
        ReleaseOutcome::Move(MoveIntent {
            from: 5,
            to: Destination::House(8),
            flag: false,
        })
    );
    assert_eq!(controller.state(), &InteractionState::Idle);
}

#[test]
fn drop_on_own_house_emits_nothing() {
    let (mut controller, _) = ready_controller(opening());

    let nudge = Point::new(anchor(3).x + 4.0, anchor(3).y - 3.0);
    let outcome = drag_and_drop(&mut controller, anchor(3), nudge);

    assert_eq!(outcome, ReleaseOutcome::Unchanged);
    assert_eq!(controller.store().snapshot().unwrap().pos[3], anchor(3));
}

#[test]
fn invalid_drop_restores_exact_start() {
    let (mut controller, _) = ready_controller(opening());
    let start = controller.store().snapshot().unwrap().pos[1];

    // Right of the last column, left of the Anubis panel.
    let outcome = drag_and_drop(&mut controller, anchor(1), Point::new(680.0, 200.0));

    assert_eq!(outcome, ReleaseOutcome::Rejected);
    assert_eq!(controller.store().snapshot().unwrap().pos[1], start);
    assert_eq!(controller.state(), &InteractionState::Idle);

    // Reverting twice lands on the same spot.
    let outcome = drag_and_drop(&mut controller, anchor(1), Point::new(680.0, 200.0));
    assert_eq!(outcome, ReleaseOutcome::Rejected);
    assert_eq!(controller.store().snapshot().unwrap().pos[1], start);
}

#[test]
fn drop_on_anubis_targets_capture_zone() {
    let (mut controller, _) = ready_controller(opening());

    let outcome = drag_and_drop(&mut controller, anchor(5), Point::new(790.0, 120.0));

    assert_eq!(
        outcome,
        ReleaseOutcome::Move(MoveIntent {
            from: 5,
            to: Destination::Anubis,
            flag: false,
        })
    );
}

#[test]
fn black_pieces_cannot_be_picked_on_whites_turn() {
    let (mut controller, _) = ready_controller(opening());
    assert!(!controller.press(anchor(4)));
    assert_eq!(controller.state(), &InteractionState::Idle);
}

#[test]
fn movable_flag_is_checked_independently_of_turn() {
    let mut snapshot = opening();
    snapshot.mov = Some(false);
    let (mut controller, _) = ready_controller(snapshot);

    // White to move, but the server marked black pieces movable.
    assert!(controller.press(anchor(4)));
    controller.release();
    assert!(controller.press(anchor(5)));
}

#[test]
fn drag_outside_interior_is_ignored() {
    let (mut controller, _) = ready_controller(opening());
    assert!(controller.press(anchor(5)));

    // Below the board, over the stick row.
    assert!(!controller.drag(Point::new(300.0, 300.0)));
    assert_eq!(controller.store().snapshot().unwrap().pos[5], anchor(5));

    assert!(controller.drag(Point::new(300.0, 100.0)));
    assert_eq!(controller.store().snapshot().unwrap().pos[5], Point::new(300.0, 100.0));
}

#[test]
fn waters_move_waits_for_confirmation() {
    let (mut controller, _) = ready_controller(opening());

    let outcome = drag_and_drop(&mut controller, anchor(HOUSE_OF_WATERS), anchor(29));
    assert!(matches!(outcome, ReleaseOutcome::NeedsConfirmation(_)));
    assert!(matches!(controller.state(), InteractionState::Confirming(_)));

    // Pointer input is ignored while the prompt is open.
    assert!(!controller.press(anchor(5)));

    let intent = controller.resolve_confirmation(true);
    assert_eq!(
        intent,
        Some(MoveIntent {
            from: HOUSE_OF_WATERS,
            to: Destination::House(29),
            flag: true,
        })
    );
    assert_eq!(controller.state(), &InteractionState::Idle);
}

#[test]
fn declined_waters_move_reverts() {
    let (mut controller, _) = ready_controller(opening());

    let outcome = drag_and_drop(&mut controller, anchor(HOUSE_OF_WATERS), anchor(29));
    assert!(matches!(outcome, ReleaseOutcome::NeedsConfirmation(_)));

    assert_eq!(controller.resolve_confirmation(false), None);
    assert_eq!(
        controller.store().snapshot().unwrap().pos[HOUSE_OF_WATERS],
        anchor(HOUSE_OF_WATERS)
    );
    assert_eq!(controller.state(), &InteractionState::Idle);
}

#[test]
fn snapshot_mid_drag_keeps_piece_under_pointer() {
    let (mut controller, _) = ready_controller(opening());
    assert!(controller.press(anchor(5)));
    assert!(controller.drag(Point::new(400.0, 100.0)));

    // Server pushes an update that nudges house 5's anchor.
    let mut update = opening();
    update.pos[5] = Point::new(anchor(5).x + 2.0, anchor(5).y);
    update.sticks = vec![false; 4];
    controller.apply_snapshot(update).unwrap();

    let snapshot = controller.store().snapshot().unwrap();
    assert_eq!(snapshot.pos[5], Point::new(400.0, 100.0));
    assert_eq!(snapshot.sticks, vec![false; 4]);

    // Cancelling now reverts to the server's latest anchor.
    let outcome = {
        controller.drag(Point::new(680.0, 200.0));
        controller.release()
    };
    assert_eq!(outcome, ReleaseOutcome::Rejected);
    assert_eq!(
        controller.store().snapshot().unwrap().pos[5],
        Point::new(anchor(5).x + 2.0, anchor(5).y)
    );
}

#[test]
fn snapshot_removing_dragged_piece_ends_drag() {
    let (mut controller, _) = ready_controller(opening());
    assert!(controller.press(anchor(5)));
    controller.drag(Point::new(400.0, 100.0));

    let update = snapshot_with(&[(6, Slot::White)]);
    controller.apply_snapshot(update).unwrap();

    assert_eq!(controller.state(), &InteractionState::Idle);
    assert_eq!(controller.store().snapshot().unwrap().pos[5], anchor(5));
    assert_eq!(controller.release(), ReleaseOutcome::Ignored);
}

#[test]
fn pointer_ignored_until_board_drawn() {
    let mut controller = BoardController::new(RetryPolicy::default());
    controller.apply_metrics(common::metrics());
    controller.apply_snapshot(opening()).unwrap();

    // Nothing has been drawn yet.
    assert!(!controller.press(anchor(5)));

    let mut surface = RecordingSurface::new();
    controller.render(&mut surface);
    assert!(controller.press(anchor(5)));
}

#[test]
fn rejected_snapshot_keeps_previous() {
    let (mut controller, _) = ready_controller(opening());
    let mut broken = opening();
    broken.pos.truncate(10);

    assert!(controller.apply_snapshot(broken).is_err());
    assert_eq!(controller.store().snapshot().unwrap().pos.len(), common::HOUSES);
}
