//! Turn-based rule engine for standard chess.
//!
//! This crate provides:
//! - [`Board`] - piece registry with a derived square-to-occupant grid
//! - [`rules`] - pseudo-legality evaluation, check detection, checkmate search
//! - [`Game`] - the turn state machine external callers drive
//! - [`PromotionChooser`] - injected capability for pawn promotion choices
//!
//! # Architecture
//!
//! The board owns every live piece in a slot arena; a [`PieceId`] stays valid
//! across unrelated captures. Rule evaluation is pure: the legality functions
//! in [`rules`] read the board without mutating it, and hypothetical outcomes
//! (self-check validation, checkmate search) are probed on disposable copies,
//! never on the canonical board.
//!
//! The engine performs no I/O. The promotion choice is obtained through the
//! [`PromotionChooser`] capability, so the rules stay testable headlessly.
//!
//! # Example
//!
//! ```
//! use gambit_core::{Color, Move, Promotion};
//! use gambit_engine::{FixedPromotion, Game};
//!
//! let mut game = Game::new(FixedPromotion(Promotion::Queen));
//! game.submit_move(Move::from_token("e2e4").unwrap()).unwrap();
//! assert_eq!(game.side_to_move(), Color::Black);
//! ```

mod board;
mod game;
mod promotion;
pub mod rules;

pub use board::{Board, Grid, Piece, PieceId};
pub use game::{Game, MoveError};
pub use promotion::{FixedPromotion, PromotionChooser};
