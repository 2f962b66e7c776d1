//! Game session: the turn state machine and move executor.

use crate::board::Board;
use crate::promotion::PromotionChooser;
use crate::rules;
use gambit_core::{Color, Move, PieceKind, Square};
use thiserror::Error;
use tracing::debug;

/// Why a submitted move was rejected.
///
/// Every rejection is recoverable: the session is left untouched and the
/// caller re-prompts. Malformed tokens and off-board coordinates never reach
/// the engine; they are rejected by [`Move::from_token`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece on {0}")]
    NoPiece(Square),

    #[error("it is {0}'s turn to move")]
    WrongSide(Color),

    #[error("{0} is occupied by your own piece")]
    FriendlyCapture(Square),

    #[error("{kind} on {from} cannot reach {to}")]
    IllegalPattern {
        kind: PieceKind,
        from: Square,
        to: Square,
    },

    #[error("move would leave the {0} king in check")]
    SelfCheck(Color),
}

/// A chess game session.
///
/// Owns the board, the side to move, the check/checkmate flags, and the
/// promotion collaborator. This is the only type external callers drive;
/// the board is never mutated except through [`submit_move`](Self::submit_move).
#[derive(Debug)]
pub struct Game<P> {
    board: Board,
    side_to_move: Color,
    in_check: Option<Color>,
    in_checkmate: Option<Color>,
    chooser: P,
}

impl<P: PromotionChooser> Game<P> {
    /// Creates a session with the standard starting position, White to move.
    pub fn new(chooser: P) -> Self {
        Game {
            board: Board::standard(),
            side_to_move: Color::White,
            in_check: None,
            in_checkmate: None,
            chooser,
        }
    }

    /// Creates a session from a staged position.
    ///
    /// The check and checkmate flags are evaluated for `side_to_move`
    /// immediately, so a position staged mid-combination reports its state
    /// without waiting for a move.
    pub fn from_board(board: Board, side_to_move: Color, chooser: P) -> Self {
        let mut game = Game {
            board,
            side_to_move,
            in_check: None,
            in_checkmate: None,
            chooser,
        };
        game.evaluate_check();
        game
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the color currently in check, if any.
    pub fn in_check(&self) -> Option<Color> {
        self.in_check
    }

    /// Returns the checkmated color, if any.
    pub fn in_checkmate(&self) -> Option<Color> {
        self.in_checkmate
    }

    /// Returns true if a checkmate has been recorded.
    pub fn is_game_over(&self) -> bool {
        self.in_checkmate.is_some()
    }

    /// Validates and applies a move for the side to move.
    ///
    /// On success the move is committed, the turn passes, and the check and
    /// checkmate flags are re-evaluated for the new side to move. On any
    /// rejection the session is left bit-for-bit unchanged: the hypothetical
    /// outcome is probed on a disposable copy of the board, never on the
    /// live one.
    pub fn submit_move(&mut self, mv: Move) -> Result<(), MoveError> {
        let mover = self
            .board
            .occupant(mv.from)
            .ok_or(MoveError::NoPiece(mv.from))?;
        let piece = *self.board.piece(mover);

        if piece.color != self.side_to_move {
            return Err(MoveError::WrongSide(self.side_to_move));
        }
        if self
            .board
            .piece_at(mv.to)
            .is_some_and(|occupant| occupant.color == piece.color)
        {
            return Err(MoveError::FriendlyCapture(mv.to));
        }
        if !rules::is_pseudo_legal(&self.board, &piece, mv.to) {
            return Err(MoveError::IllegalPattern {
                kind: piece.kind,
                from: mv.from,
                to: mv.to,
            });
        }

        let mut next = self.board.clone();
        next.force_move(mover, mv.to);

        // A move may never leave the mover's own king in check, even when it
        // resolves an unrelated one.
        if rules::is_in_check(&next, piece.color) {
            debug!(%mv, color = %piece.color, "rejected: leaves own king in check");
            return Err(MoveError::SelfCheck(piece.color));
        }

        if piece.kind == PieceKind::Pawn && mv.to.rank() == piece.color.promotion_rank() {
            let choice = self.chooser.choose(piece.color, mv.to);
            debug!(color = %piece.color, square = %mv.to, kind = %choice.kind(), "pawn promoted");
            next.promote(mover, choice);
        }

        next.rebuild_grid();
        self.board = next;
        self.side_to_move = self.side_to_move.opposite();
        self.evaluate_check();
        Ok(())
    }

    /// Re-evaluates the check and checkmate flags for the side to move.
    fn evaluate_check(&mut self) {
        self.in_check = None;
        self.in_checkmate = None;
        if rules::is_in_check(&self.board, self.side_to_move) {
            self.in_check = Some(self.side_to_move);
            debug!(color = %self.side_to_move, "check");
            if rules::is_checkmate(&self.board, self.side_to_move) {
                self.in_checkmate = Some(self.side_to_move);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::FixedPromotion;
    use gambit_core::Promotion;
    use std::cell::Cell;
    use std::rc::Rc;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_token(s).unwrap()
    }

    fn game() -> Game<FixedPromotion> {
        Game::new(FixedPromotion(Promotion::Queen))
    }

    #[test]
    fn new_game() {
        let game = game();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.in_check(), None);
        assert_eq!(game.in_checkmate(), None);
        assert!(!game.is_game_over());
    }

    #[test]
    fn committed_move_flips_side_and_relocates() {
        let mut game = game();
        game.submit_move(mv("e2e4")).unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.board().piece_at(sq("e2")), None);
        let pawn = game.board().piece_at(sq("e4")).unwrap();
        assert_eq!((pawn.kind, pawn.color), (PieceKind::Pawn, Color::White));
    }

    #[test]
    fn no_piece_at_source() {
        let mut game = game();
        assert_eq!(game.submit_move(mv("e4e5")), Err(MoveError::NoPiece(sq("e4"))));
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn wrong_side_to_move() {
        let mut game = game();
        assert_eq!(
            game.submit_move(mv("e7e5")),
            Err(MoveError::WrongSide(Color::White))
        );
    }

    #[test]
    fn friendly_capture_rejected_board_unchanged() {
        let mut game = game();
        let before = game.board().clone();
        assert_eq!(
            game.submit_move(mv("a1a2")),
            Err(MoveError::FriendlyCapture(sq("a2")))
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn illegal_pattern_rejected() {
        let mut game = game();
        assert_eq!(
            game.submit_move(mv("e2e5")),
            Err(MoveError::IllegalPattern {
                kind: PieceKind::Pawn,
                from: sq("e2"),
                to: sq("e5"),
            })
        );
    }

    #[test]
    fn double_step_only_from_start_rank() {
        let mut game = game();
        game.submit_move(mv("d2d4")).unwrap();
        game.submit_move(mv("a7a6")).unwrap();
        assert!(matches!(
            game.submit_move(mv("d4d6")),
            Err(MoveError::IllegalPattern { .. })
        ));
    }

    #[test]
    fn capture_removes_piece() {
        let mut game = game();
        game.submit_move(mv("e2e4")).unwrap();
        game.submit_move(mv("d7d5")).unwrap();
        game.submit_move(mv("e4d5")).unwrap();
        assert_eq!(game.board().pieces().count(), 31);
        let pawn = game.board().piece_at(sq("d5")).unwrap();
        assert_eq!((pawn.kind, pawn.color), (PieceKind::Pawn, Color::White));
    }

    #[test]
    fn fools_mate() {
        let mut game = game();
        game.submit_move(mv("f2f3")).unwrap();
        game.submit_move(mv("e7e5")).unwrap();
        game.submit_move(mv("g2g4")).unwrap();
        game.submit_move(mv("d8h4")).unwrap();
        assert_eq!(game.in_check(), Some(Color::White));
        assert_eq!(game.in_checkmate(), Some(Color::White));
        assert!(game.is_game_over());
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, sq("e1"));
        board.place(PieceKind::Rook, Color::White, sq("e2"));
        board.place(PieceKind::Rook, Color::Black, sq("e8"));
        board.place(PieceKind::King, Color::Black, sq("h8"));
        let mut game = Game::from_board(board, Color::White, FixedPromotion(Promotion::Queen));
        assert_eq!(game.in_check(), None);

        let before = game.board().clone();
        assert_eq!(
            game.submit_move(mv("e2a2")),
            Err(MoveError::SelfCheck(Color::White))
        );
        assert_eq!(game.board(), &before);

        // Sliding along the pin stays legal.
        game.submit_move(mv("e2e5")).unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn check_must_be_addressed() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, sq("e1"));
        board.place(PieceKind::Rook, Color::White, sq("h2"));
        board.place(PieceKind::Rook, Color::Black, sq("e8"));
        board.place(PieceKind::King, Color::Black, sq("h8"));
        let mut game = Game::from_board(board, Color::White, FixedPromotion(Promotion::Queen));
        assert_eq!(game.in_check(), Some(Color::White));
        assert_eq!(game.in_checkmate(), None);

        // A move that ignores the check is a self-check violation.
        assert_eq!(
            game.submit_move(mv("h2h3")),
            Err(MoveError::SelfCheck(Color::White))
        );

        // Interposing resolves it.
        game.submit_move(mv("h2e2")).unwrap();
        assert_eq!(game.in_check(), None);
    }

    #[test]
    fn staged_back_rank_mate_reported_on_construction() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::Black, sq("h8"));
        board.place(PieceKind::Pawn, Color::Black, sq("g7"));
        board.place(PieceKind::Pawn, Color::Black, sq("h7"));
        board.place(PieceKind::Rook, Color::White, sq("a8"));
        board.place(PieceKind::King, Color::White, sq("e1"));
        let game = Game::from_board(board, Color::Black, FixedPromotion(Promotion::Queen));
        assert_eq!(game.in_check(), Some(Color::Black));
        assert_eq!(game.in_checkmate(), Some(Color::Black));
        assert!(game.is_game_over());
    }

    #[derive(Debug, Clone)]
    struct CountingChooser {
        choice: Promotion,
        calls: Rc<Cell<usize>>,
    }

    impl PromotionChooser for CountingChooser {
        fn choose(&mut self, _color: Color, _square: Square) -> Promotion {
            self.calls.set(self.calls.get() + 1);
            self.choice
        }
    }

    #[test]
    fn promotion_invokes_chooser_exactly_once() {
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Color::White, sq("a7"));
        board.place(PieceKind::King, Color::White, sq("e1"));
        board.place(PieceKind::King, Color::Black, sq("g5"));
        let calls = Rc::new(Cell::new(0));
        let mut game = Game::from_board(
            board,
            Color::White,
            CountingChooser {
                choice: Promotion::Queen,
                calls: Rc::clone(&calls),
            },
        );

        game.submit_move(mv("a7a8")).unwrap();
        assert_eq!(calls.get(), 1);
        let queen = game.board().piece_at(sq("a8")).unwrap();
        assert_eq!((queen.kind, queen.color), (PieceKind::Queen, Color::White));
        assert_eq!(queen.kind.symbol(queen.color), 'Q');
    }

    #[test]
    fn black_promotion_keeps_lowercase_symbol() {
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Color::Black, sq("h2"));
        board.place(PieceKind::King, Color::Black, sq("a8"));
        board.place(PieceKind::King, Color::White, sq("e8"));
        let mut game = Game::from_board(board, Color::Black, FixedPromotion(Promotion::Rook));

        game.submit_move(mv("h2h1")).unwrap();
        let rook = game.board().piece_at(sq("h1")).unwrap();
        assert_eq!((rook.kind, rook.color), (PieceKind::Rook, Color::Black));
        assert_eq!(rook.kind.symbol(rook.color), 'r');
    }

    #[test]
    fn chooser_untouched_without_promotion() {
        let calls = Rc::new(Cell::new(0));
        let mut game = Game::from_board(
            Board::standard(),
            Color::White,
            CountingChooser {
                choice: Promotion::Queen,
                calls: Rc::clone(&calls),
            },
        );
        game.submit_move(mv("e2e4")).unwrap();
        assert_eq!(calls.get(), 0);
    }

    fn square_from_index(i: u8) -> Square {
        use gambit_core::{File, Rank};
        Square::new(
            File::from_index((i % 8) as i8).unwrap(),
            Rank::from_index((i / 8) as i8).unwrap(),
        )
    }

    proptest::proptest! {
        /// Rejected moves leave the session bit-for-bit unchanged and
        /// committed moves flip the side to move without ever leaving the
        /// mover's own king attacked.
        #[test]
        fn submit_move_state_machine(
            moves in proptest::collection::vec((0..64u8, 0..64u8), 1..60)
        ) {
            use proptest::prelude::{prop_assert, prop_assert_eq};

            let mut game = Game::new(FixedPromotion(Promotion::Queen));
            for (from, to) in moves {
                let attempt = Move::new(square_from_index(from), square_from_index(to));
                let board_before = game.board().clone();
                let side_before = game.side_to_move();
                let check_before = game.in_check();
                let mate_before = game.in_checkmate();

                match game.submit_move(attempt) {
                    Ok(()) => {
                        prop_assert_eq!(game.side_to_move(), side_before.opposite());
                        prop_assert!(!rules::is_in_check(game.board(), side_before));
                    }
                    Err(_) => {
                        prop_assert_eq!(game.board(), &board_before);
                        prop_assert_eq!(game.side_to_move(), side_before);
                        prop_assert_eq!(game.in_check(), check_before);
                        prop_assert_eq!(game.in_checkmate(), mate_before);
                    }
                }

                if game.is_game_over() {
                    break;
                }
            }
        }
    }
}
