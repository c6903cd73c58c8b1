//! The closed set of move variants and how each one changes a board.

use std::fmt;

use crate::engine::board::Board;
use crate::engine::types::{ChessError, Color, PieceKind, Square};

/// Which way the king castles. Queen side is toward file a.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

/// A single move. Every variant carries the mover's origin and destination.
///
/// Equality is value equality, which agrees with comparing
/// [`Move::identifier`] for any two moves generated from the same position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Regular {
        from: Square,
        to: Square,
    },
    /// King move of two files plus the rook hop; `from`/`to` are the king's.
    Castling {
        from: Square,
        to: Square,
        rook_from: Square,
        rook_to: Square,
        side: CastlingSide,
    },
    /// Pawn capture of a pawn that just advanced two ranks past it.
    EnPassant {
        from: Square,
        to: Square,
        captured: Square,
    },
    Promotion {
        from: Square,
        to: Square,
        kind: PieceKind,
        color: Color,
    },
}

impl Move {
    pub fn from(&self) -> Square {
        match *self {
            Move::Regular { from, .. }
            | Move::Castling { from, .. }
            | Move::EnPassant { from, .. }
            | Move::Promotion { from, .. } => from,
        }
    }

    pub fn to(&self) -> Square {
        match *self {
            Move::Regular { to, .. }
            | Move::Castling { to, .. }
            | Move::EnPassant { to, .. }
            | Move::Promotion { to, .. } => to,
        }
    }

    /// Whether this move disturbs `sq` in any way.
    pub fn involves(&self, sq: Square) -> bool {
        if sq == self.from() || sq == self.to() {
            return true;
        }
        match *self {
            Move::Castling {
                rook_from, rook_to, ..
            } => sq == rook_from || sq == rook_to,
            Move::EnPassant { captured, .. } => sq == captured,
            _ => false,
        }
    }

    /// Whether the move removes an opponent piece from `board`, which must
    /// be the position the move is played from.
    pub fn is_capture(&self, board: &Board) -> bool {
        match self {
            Move::Regular { to, .. } | Move::Promotion { to, .. } => !board.is_empty(*to),
            Move::EnPassant { .. } => true,
            Move::Castling { .. } => false,
        }
    }

    /// Canonical coordinate text: `e2e4`, `e5d6e.p.`, `e7e8Q`, `e2e1q`.
    /// Castling uses the king's squares (`e1g1`).
    pub fn identifier(&self) -> String {
        let base = format!("{}{}", self.from().notation(), self.to().notation());
        match *self {
            Move::Regular { .. } | Move::Castling { .. } => base,
            Move::EnPassant { .. } => format!("{base}e.p."),
            Move::Promotion { kind, color, .. } => format!("{base}{}", kind.to_char(color)),
        }
    }

    /// Change the cells of `board`. Does not touch its history; see
    /// [`Board::play`] for the recording variant.
    pub fn apply(&self, board: &mut Board) -> Result<(), ChessError> {
        match *self {
            Move::Regular { from, to } => board.relocate(from, to),
            Move::Castling {
                from,
                to,
                rook_from,
                rook_to,
                ..
            } => {
                board.relocate(from, to)?;
                board.relocate(rook_from, rook_to)
            }
            Move::EnPassant { from, to, captured } => {
                board.relocate(from, to)?;
                board.remove(captured).map(|_| ())
            }
            Move::Promotion {
                from,
                to,
                kind,
                color,
            } => {
                board.remove(from)?;
                board.place(kind, color, to)
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}
