// SPDX-License-Identifier: MIT OR Apache-2.0

use senet_cli::render::render_board;
use senet_network::demo_snapshot;

#[test]
fn demo_board_prints_three_rows_in_screen_order() {
    let text = render_board(&demo_snapshot());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "White's Go");
    assert!(lines[1].starts_with("[ 0 B][ 1 W]"));
    // The middle row is laid out right to left, so house 19 is drawn first.
    assert!(lines[2].starts_with("[19 .][18 .]"));
    assert!(lines[2].ends_with("[10 .]"));
    assert!(lines[3].starts_with("[20 .]"));
    assert_eq!(lines[4], "Sticks: W B W B  (2)");
    assert_eq!(lines[5], "Anubis: 0 white, 0 black");
}
