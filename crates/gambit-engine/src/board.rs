//! Board state: the piece registry and its derived grid view.

use gambit_core::{Color, File, PieceKind, Promotion, Rank, Square};

/// Stable identifier for a live piece.
///
/// A `PieceId` names a slot in the board's piece arena. Captures clear the
/// slot instead of shifting the collection, so an id held across an
/// unrelated removal keeps referring to the same piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(usize);

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

/// Derived square-to-occupant view, indexed `[rank][file]`.
///
/// Always recomputed from the piece arena after a committed mutation; a
/// cached view for rendering, never the source of truth.
pub type Grid = [[Option<PieceId>; 8]; 8];

/// The chess board: every live piece plus the derived grid.
///
/// Invariants: at most one piece per square, and at most one king per color
/// while a game is in progress (the latter is not defended against). The
/// grid is consistent with the arena whenever a public operation returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    slots: Vec<Option<Piece>>,
    grid: Grid,
}

/// Back-rank piece order, file a through h.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            slots: Vec::new(),
            grid: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting position: pawns on ranks 2 and 7,
    /// back ranks in Rook-Knight-Bishop-Queen-King-Bishop-Knight-Rook order.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for file in File::ALL {
            board.place(PieceKind::Pawn, Color::White, Square::new(file, Rank::R2));
            board.place(PieceKind::Pawn, Color::Black, Square::new(file, Rank::R7));
        }
        for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
            board.place(kind, Color::White, Square::new(file, Rank::R1));
            board.place(kind, Color::Black, Square::new(file, Rank::R8));
        }
        board
    }

    /// Places a piece on an empty square and returns its id.
    pub fn place(&mut self, kind: PieceKind, color: Color, square: Square) -> PieceId {
        debug_assert!(self.piece_at(square).is_none(), "square already occupied");
        let id = PieceId(self.slots.len());
        self.slots.push(Some(Piece {
            kind,
            color,
            square,
        }));
        *self.cell_mut(square) = Some(id);
        id
    }

    /// Returns the piece standing on `square`, if any.
    ///
    /// Scans the piece arena; the arena is authoritative, the grid is not.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.slots.iter().flatten().find(|p| p.square == square)
    }

    /// Returns the id of the piece standing on `square`, if any.
    pub(crate) fn occupant(&self, square: Square) -> Option<PieceId> {
        self.pieces()
            .find(|(_, piece)| piece.square == square)
            .map(|(id, _)| id)
    }

    /// Returns the piece with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id refers to a captured piece.
    pub fn piece(&self, id: PieceId) -> &Piece {
        self.slots[id.0].as_ref().expect("stale piece id")
    }

    /// Iterates over all live pieces with their ids, in arena order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|piece| (PieceId(i), piece)))
    }

    /// Returns the square of the given color's king, if one is on the board.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.slots
            .iter()
            .flatten()
            .find(|p| p.kind == PieceKind::King && p.color == color)
            .map(|p| p.square)
    }

    /// Returns the derived grid view.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Relocates a piece, removing any occupant of the target square first.
    ///
    /// Leaves the grid stale; callers commit with [`rebuild_grid`](Self::rebuild_grid).
    pub(crate) fn force_move(&mut self, id: PieceId, to: Square) {
        if let Some(captured) = self.occupant(to) {
            self.slots[captured.0] = None;
        }
        self.slots[id.0].as_mut().expect("stale piece id").square = to;
    }

    /// Replaces a piece's kind with its promotion target.
    pub(crate) fn promote(&mut self, id: PieceId, promotion: Promotion) {
        self.slots[id.0].as_mut().expect("stale piece id").kind = promotion.kind();
    }

    /// Recomputes the grid from the piece arena.
    pub(crate) fn rebuild_grid(&mut self) {
        self.grid = [[None; 8]; 8];
        for i in 0..self.slots.len() {
            if let Some(piece) = self.slots[i] {
                *self.cell_mut(piece.square) = Some(PieceId(i));
            }
        }
    }

    fn cell_mut(&mut self, square: Square) -> &mut Option<PieceId> {
        &mut self.grid[square.rank().index() as usize][square.file().index() as usize]
    }
}
