//! Board rendering.

use gambit_core::{File, Rank};
use gambit_engine::Board;
use std::fmt::Write;

/// Renders the board's grid view as text: ranks 8 down to 1, files a through
/// h, `.` for empty squares, White pieces uppercase and Black lowercase.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("  ________________\n");
    for rank in Rank::ALL.into_iter().rev() {
        let _ = write!(out, "{}|", rank);
        for file in File::ALL {
            let symbol = board.grid()[rank.index() as usize][file.index() as usize]
                .map(|id| {
                    let piece = board.piece(id);
                    piece.kind.symbol(piece.color)
                })
                .unwrap_or('.');
            out.push(symbol);
            out.push(' ');
        }
        out.push_str("|\n");
    }
    out.push_str("  \u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\n");
    out.push_str("  a b c d e f g h");
    out
}
