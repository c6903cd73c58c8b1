//! Append-only log of the moves applied to a board.

use crate::engine::moves::Move;
use crate::engine::types::Square;

/// Moves in the order they were played.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    moves: Vec<Move>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// The most recent move, if any.
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Whether any recorded move touched `sq`.
    ///
    /// A piece still standing on its starting square has moved iff this is
    /// true: any move out of, into, or through the square (rook hops and
    /// en passant captures included) disturbs whatever stood there.
    pub fn has_moved(&self, sq: Square) -> bool {
        self.moves.iter().any(|mv| mv.involves(sq))
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
}
