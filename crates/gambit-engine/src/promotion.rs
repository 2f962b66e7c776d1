//! Pawn-promotion capability.

use gambit_core::{Color, Promotion, Square};

/// Capability for choosing a pawn's promotion piece.
///
/// The engine performs no I/O: when a pawn reaches the farthest rank, the
/// move executor blocks on this collaborator and replaces the pawn with the
/// returned kind. [`Promotion`] is a closed enum, so a choice outside
/// Queen/Rook/Bishop/Knight is unrepresentable; interactive implementors
/// must re-prompt until the input names one of the four.
pub trait PromotionChooser {
    /// Called with the promoting pawn's color and destination square.
    fn choose(&mut self, color: Color, square: Square) -> Promotion;
}

/// Chooser that always returns the same kind. Useful for headless play and
/// tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedPromotion(pub Promotion);

impl PromotionChooser for FixedPromotion {
    fn choose(&mut self, _color: Color, _square: Square) -> Promotion {
        self.0
    }
}
