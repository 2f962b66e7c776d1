//! Move legality, check detection, and checkmate search.
//!
//! Everything here is pure with respect to the live board: hypothetical
//! outcomes are evaluated on disposable copies and discarded.

use crate::board::{Board, Piece, PieceId};
use gambit_core::{Color, PieceKind, Square};
use tracing::{debug, trace};

/// Returns true if the piece's movement pattern permits reaching `target`,
/// ignoring whether the mover's own king would be left in check.
///
/// Friendly occupancy of `target` is deliberately not tested: for real moves
/// the executor rejects friendly capture first, while attack scans must
/// treat the target's occupant as irrelevant. A piece never reaches its own
/// square.
pub fn is_pseudo_legal(board: &Board, piece: &Piece, target: Square) -> bool {
    let from = piece.square;
    if from == target {
        return false;
    }
    let dx = target.file().index() - from.file().index();
    let dy = target.rank().index() - from.rank().index();

    match piece.kind {
        PieceKind::Pawn => pawn_reaches(board, piece, target, dx, dy),
        PieceKind::Knight => {
            (dx.abs() == 1 && dy.abs() == 2) || (dx.abs() == 2 && dy.abs() == 1)
        }
        PieceKind::Bishop => dx.abs() == dy.abs() && clear_path(board, from, target),
        PieceKind::Rook => (dx == 0) != (dy == 0) && clear_path(board, from, target),
        PieceKind::Queen => {
            (dx.abs() == dy.abs() || (dx == 0) != (dy == 0)) && clear_path(board, from, target)
        }
        PieceKind::King => dx.abs() <= 1 && dy.abs() <= 1,
    }
}

/// Pawn movement: one step forward onto an empty square, two steps from the
/// starting rank with both squares empty, or a one-step diagonal capture.
fn pawn_reaches(board: &Board, piece: &Piece, target: Square, dx: i8, dy: i8) -> bool {
    let dir = piece.color.pawn_direction();

    if dx == 0 && dy == dir {
        return board.piece_at(target).is_none();
    }

    if dx == 0 && dy == 2 * dir && piece.square.rank() == piece.color.pawn_start_rank() {
        if let Some(step) = piece.square.offset(0, dir) {
            return board.piece_at(step).is_none() && board.piece_at(target).is_none();
        }
    }

    if dx.abs() == 1 && dy == dir {
        return board
            .piece_at(target)
            .is_some_and(|occupant| occupant.color != piece.color);
    }

    false
}

/// Returns true if every square strictly between `from` and `to` is empty.
/// `from` and `to` must share a rank, a file, or a diagonal.
fn clear_path(board: &Board, from: Square, to: Square) -> bool {
    let dx = (to.file().index() - from.file().index()).signum();
    let dy = (to.rank().index() - from.rank().index()).signum();

    let mut square = from.offset(dx, dy);
    while let Some(current) = square {
        if current == to {
            return true;
        }
        if board.piece_at(current).is_some() {
            return false;
        }
        square = current.offset(dx, dy);
    }
    // Unreachable for aligned inputs: the walk hits `to` before the edge.
    false
}

/// Returns true if any piece of `by` attacks `square`.
pub fn is_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces()
        .any(|(_, piece)| piece.color == by && is_pseudo_legal(board, piece, square))
}

/// Returns true if the given color's king is attacked.
///
/// A board without that king is reported as not in check; a missing king is
/// outside normal play and treated permissively rather than as an error.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_attacked(board, king, color.opposite()),
        None => false,
    }
}

/// Exhaustively decides whether `color`, already in check, has any move that
/// escapes it.
///
/// Every (piece, destination) pair is tried in board order: pairs that fail
/// pseudo-legality or target a friendly occupant are skipped, every other
/// candidate is simulated on a disposable copy of the board and tested for
/// check there. The search returns not-checkmate on the first escaping pair;
/// the live board is never mutated.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    if !is_in_check(board, color) {
        return false;
    }

    let defenders: Vec<PieceId> = board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .map(|(id, _)| id)
        .collect();

    for id in defenders {
        let piece = *board.piece(id);
        for target in Square::all() {
            if target == piece.square {
                continue;
            }
            if board
                .piece_at(target)
                .is_some_and(|occupant| occupant.color == color)
            {
                continue;
            }
            if !is_pseudo_legal(board, &piece, target) {
                continue;
            }

            let mut probe = board.clone();
            probe.force_move(id, target);
            if !is_in_check(&probe, color) {
                trace!(piece = %piece.kind, from = %piece.square, to = %target, "escape move found");
                return false;
            }
        }
    }

    debug!(%color, "no escape moves found, checkmate");
    true
}
