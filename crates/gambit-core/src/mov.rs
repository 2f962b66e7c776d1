//! Move representation and token parsing.

use crate::{File, Rank, Square};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing a move token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected a 4-character token like e2e4, got {0} characters")]
    Length(usize),

    #[error("invalid file '{0}', expected a-h")]
    InvalidFile(char),

    #[error("invalid rank '{0}', expected 1-8")]
    InvalidRank(char),
}

/// A proposed move: explicit source and destination squares.
///
/// A `Move` carries no legality information; the engine decides whether the
/// side to move may actually play it. Because the source square is explicit,
/// no disambiguation between same-kind pieces is ever needed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a move between two squares.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Parses the four-character move token `<fromFile><fromRank><toFile><toRank>`
    /// (e.g., "e2e4"). Tokens of any other length are rejected outright.
    pub fn from_token(token: &str) -> Result<Self, ParseMoveError> {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() != 4 {
            return Err(ParseMoveError::Length(chars.len()));
        }
        let from = parse_square(chars[0], chars[1])?;
        let to = parse_square(chars[2], chars[3])?;
        Ok(Move { from, to })
    }
}

fn parse_square(file: char, rank: char) -> Result<Square, ParseMoveError> {
    let file = File::from_char(file).ok_or(ParseMoveError::InvalidFile(file))?;
    let rank = Rank::from_char(rank).ok_or(ParseMoveError::InvalidRank(rank))?;
    Ok(Square::new(file, rank))
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
