//! Board square representation.

use std::fmt;

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order, a through h.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: i8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// Creates a file from a character ('a'-'h' or 'A'-'H').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(File::A),
            'b' => Some(File::B),
            'c' => Some(File::C),
            'd' => Some(File::D),
            'e' => Some(File::E),
            'f' => Some(File::F),
            'g' => Some(File::G),
            'h' => Some(File::H),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> i8 {
        self as i8
    }

    /// Returns the character representation ('a'-'h').
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order, 1 through 8.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: i8) -> Option<Self> {
        match index {
            0 => Some(Rank::R1),
            1 => Some(Rank::R2),
            2 => Some(Rank::R3),
            3 => Some(Rank::R4),
            4 => Some(Rank::R5),
            5 => Some(Rank::R6),
            6 => Some(Rank::R7),
            7 => Some(Rank::R8),
            _ => None,
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank::R1),
            '2' => Some(Rank::R2),
            '3' => Some(Rank::R3),
            '4' => Some(Rank::R4),
            '5' => Some(Rank::R5),
            '6' => Some(Rank::R6),
            '7' => Some(Rank::R7),
            '8' => Some(Rank::R8),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> i8 {
        self as i8
    }

    /// Returns the character representation ('1'-'8').
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the chess board: a file/rank pair.
///
/// Both coordinates are closed enums, so a `Square` is always on the board;
/// out-of-range coordinates are rejected when parsing move tokens.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square { file, rank }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = File::from_char(chars.next()?)?;
        let rank = Rank::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square::new(file, rank))
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        self.file
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// Returns the square `dx` files and `dy` ranks away, or `None` if that
    /// steps off the board.
    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let file = match File::from_index(self.file.index() + dx) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_index(self.rank.index() + dy) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Iterates over all 64 squares in board order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| File::ALL.into_iter().map(move |file| Square::new(file, rank)))
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}{})", self.file, self.rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_from_algebraic() {
        assert_eq!(
            Square::from_algebraic("a1"),
            Some(Square::new(File::A, Rank::R1))
        );
        assert_eq!(
            Square::from_algebraic("e4"),
            Some(Square::new(File::E, Rank::R4))
        );
        assert_eq!(
            Square::from_algebraic("h8"),
            Some(Square::new(File::H, Rank::R8))
        );
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a"), None);
        assert_eq!(Square::from_algebraic("a11"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_display() {
        assert_eq!(Square::new(File::A, Rank::R1).to_string(), "a1");
        assert_eq!(Square::new(File::E, Rank::R4).to_string(), "e4");
        assert_eq!(Square::new(File::H, Rank::R8).to_string(), "h8");
    }

    #[test]
    fn square_offset() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.offset(0, 1), Some(Square::new(File::E, Rank::R5)));
        assert_eq!(e4.offset(-1, -1), Some(Square::new(File::D, Rank::R3)));
        assert_eq!(e4.offset(3, 0), Some(Square::new(File::H, Rank::R4)));
        assert_eq!(e4.offset(4, 0), None);

        let a1 = Square::new(File::A, Rank::R1);
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
    }

    #[test]
    fn all_squares_in_board_order() {
        let all: Vec<Square> = Square::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], Square::new(File::A, Rank::R1));
        assert_eq!(all[7], Square::new(File::H, Rank::R1));
        assert_eq!(all[8], Square::new(File::A, Rank::R2));
        assert_eq!(all[63], Square::new(File::H, Rank::R8));
    }

    proptest::proptest! {
        #[test]
        fn algebraic_round_trip(file in 0i8..8, rank in 0i8..8) {
            let square = Square::new(
                File::from_index(file).unwrap(),
                Rank::from_index(rank).unwrap(),
            );
            proptest::prop_assert_eq!(Square::from_algebraic(&square.to_string()), Some(square));
        }
    }
}
