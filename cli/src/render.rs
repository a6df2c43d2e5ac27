// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use senet_core::{BoardSnapshot, Slot};

fn symbol(slot: Slot) -> char {
    match slot {
        Slot::White => 'W',
        Slot::Black => 'B',
        Slot::Empty => '.',
    }
}

/// Render the board as ASCII art.
///
/// Houses are grouped into rows by their screen anchor and ordered left to
/// right, so the picture follows whatever layout the server pushes.
pub fn render_board(snapshot: &BoardSnapshot) -> String {
    let mut houses: Vec<usize> = (0..snapshot.board.len().min(snapshot.pos.len())).collect();
    houses.sort_by(|a, b| {
        let (pa, pb) = (snapshot.pos[*a], snapshot.pos[*b]);
        (pa.y as i64, pa.x as i64).cmp(&(pb.y as i64, pb.x as i64))
    });

    let mut output = String::new();
    output.push_str(&format!("{}\n", snapshot.turn_label()));

    let mut row_y = None;
    for house in houses {
        let y = snapshot.pos[house].y as i64;
        if row_y.is_some() && row_y != Some(y) {
            output.push('\n');
        }
        row_y = Some(y);
        output.push_str(&format!("[{:2} {}]", house, symbol(snapshot.board[house])));
    }
    output.push('\n');

    let sticks: Vec<&str> = snapshot
        .sticks
        .iter()
        .map(|white| if *white { "W" } else { "B" })
        .collect();
    output.push_str(&format!("Sticks: {}", sticks.join(" ")));
    if let Some(score) = snapshot.score {
        output.push_str(&format!("  ({})", score));
    }
    output.push('\n');

    let (white, black) = snapshot.at_anubis;
    output.push_str(&format!("Anubis: {} white, {} black\n", white, black));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use senet_core::Point;

    #[test]
    fn test_rows_follow_anchors() {
        let snapshot = BoardSnapshot {
            board: vec![Slot::White, Slot::Empty, Slot::Black, Slot::Empty],
            // Second row runs right to left
            pos: vec![
                Point::new(10.0, 10.0),
                Point::new(50.0, 10.0),
                Point::new(50.0, 60.0),
                Point::new(10.0, 60.0),
            ],
            white_go: false,
            mov: None,
            sticks: vec![true, false],
            score: Some(1),
            at_anubis: (1, 0),
        };

        let text = render_board(&snapshot);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Black's Go");
        assert_eq!(lines[1], "[ 0 W][ 1 .]");
        assert_eq!(lines[2], "[ 3 .][ 2 B]");
        assert_eq!(lines[3], "Sticks: W B  (1)");
        assert_eq!(lines[4], "Anubis: 1 white, 0 black");
    }
}
