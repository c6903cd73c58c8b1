//! Mailbox board representation.
//!
//! `Board` stores one `Option<Piece>` per cell in a rank-major vector
//! (a1 = 0, b1 = 1, … on the standard board), together with the `History`
//! of moves played on it. Cloning a board clones its history, so a clone can
//! be used to simulate a move without touching the board it came from.

use std::fmt;

use crate::engine::history::History;
use crate::engine::movegen;
use crate::engine::moves::Move;
use crate::engine::piece::Piece;
use crate::engine::types::{BoardSize, ChessError, Color, PieceKind, Square};

/// Standard back rank, file a to file h.
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

/// Character used for an empty cell in board text.
pub const EMPTY_CELL: char = '.';

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Option<Piece>>,
    history: History,
}

impl Board {
    /// An empty board of the given size.
    pub fn empty(size: BoardSize) -> Self {
        Board {
            size,
            cells: vec![None; size.cells()],
            history: History::new(),
        }
    }

    /// The standard starting position on an 8×8 board.
    pub fn standard() -> Self {
        let mut board = Board::empty(BoardSize::STANDARD);
        board.place_standard_pieces();
        board
    }

    /// Clear the board and set up the standard army for both sides.
    ///
    /// Needs exactly 8 files and at least 4 ranks so the pawn rows don't
    /// overlap the back ranks.
    pub fn setup_standard(&mut self) -> Result<(), ChessError> {
        if self.size.files() != 8 || self.size.ranks() < 4 {
            return Err(ChessError::InvalidBoardSize {
                ranks: self.size.ranks(),
                files: self.size.files(),
            });
        }
        self.clear();
        self.place_standard_pieces();
        Ok(())
    }

    fn place_standard_pieces(&mut self) {
        let top = self.size.ranks() as i8 - 1;
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as i8;
            self.put(Piece::new(*kind, Color::White, Square::new(0, file)));
            self.put(Piece::new(PieceKind::Pawn, Color::White, Square::new(1, file)));
            self.put(Piece::new(PieceKind::Pawn, Color::Black, Square::new(top - 1, file)));
            self.put(Piece::new(*kind, Color::Black, Square::new(top, file)));
        }
    }

    /// Remove every piece and forget the history.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.history = History::new();
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The piece on `sq`, `None` if empty or off the board.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.size.index(sq).and_then(|i| self.cells[i].as_ref())
    }

    /// No piece on `sq`. Off-board squares count as empty.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// `sq` holds a piece of `color`.
    #[inline]
    pub fn is_friendly(&self, color: Color, sq: Square) -> bool {
        self.piece_at(sq).is_some_and(|p| p.color == color)
    }

    /// `sq` holds a piece of the side opposing `color`.
    #[inline]
    pub fn is_opponent(&self, color: Color, sq: Square) -> bool {
        self.piece_at(sq).is_some_and(|p| p.color != color)
    }

    /// All pieces, in rank-major order from a1.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten()
    }

    /// Pieces belonging to `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.color == color)
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Put a piece on `sq`, replacing whatever stood there.
    pub fn place(&mut self, kind: PieceKind, color: Color, sq: Square) -> Result<(), ChessError> {
        if !sq.inside(self.size) {
            return Err(ChessError::InvalidSquare(sq.notation()));
        }
        self.put(Piece::new(kind, color, sq));
        Ok(())
    }

    /// Take the piece off `sq`. Fails if `sq` is off the board or empty.
    pub fn remove(&mut self, sq: Square) -> Result<Piece, ChessError> {
        let idx = self
            .size
            .index(sq)
            .ok_or_else(|| ChessError::InvalidSquare(sq.notation()))?;
        self.cells[idx]
            .take()
            .ok_or_else(|| ChessError::EmptySquare(sq.notation()))
    }

    /// Move the piece on `from` to `to`, capturing anything on `to`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Result<(), ChessError> {
        if !to.inside(self.size) {
            return Err(ChessError::InvalidSquare(to.notation()));
        }
        let mut piece = self.remove(from)?;
        piece.square = to;
        self.put(piece);
        Ok(())
    }

    /// Apply `mv` and append it to the history.
    pub fn play(&mut self, mv: &Move) -> Result<(), ChessError> {
        mv.apply(self)?;
        self.history.record(*mv);
        Ok(())
    }

    fn put(&mut self, piece: Piece) {
        if let Some(idx) = self.size.index(piece.square) {
            self.cells[idx] = Some(piece);
        }
    }

    // -----------------------------------------------------------------------
    // Check detection
    // -----------------------------------------------------------------------

    /// Square of the king of `color`, provided there is exactly one.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let mut kings = self
            .pieces_of(color)
            .filter(|p| p.kind == PieceKind::King)
            .map(|p| p.square);
        match (kings.next(), kings.next()) {
            (Some(sq), None) => Some(sq),
            _ => None,
        }
    }

    /// Whether any piece of `by` has `sq` in its reach.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.pieces_of(by).any(|p| p.reach(self).contains(&sq))
    }

    /// Whether the king of `color` is attacked. A side without a unique king
    /// is never in check.
    pub fn in_check(&self, color: Color) -> bool {
        self.find_king(color)
            .is_some_and(|king| self.is_attacked(king, !color))
    }

    // -----------------------------------------------------------------------
    // Legal moves
    // -----------------------------------------------------------------------

    /// Every legal move for `color` in this position.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        movegen::legal_moves(self, color)
    }

    pub fn in_checkmate(&self, color: Color) -> bool {
        self.in_check(color) && self.legal_moves(color).is_empty()
    }

    pub fn in_stalemate(&self, color: Color) -> bool {
        !self.in_check(color) && self.legal_moves(color).is_empty()
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    /// Board text: highest rank first, one line per rank, uppercase White,
    /// lowercase Black, `.` for empty cells.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.size.cells() + self.size.ranks() as usize);
        for rank in (0..self.size.ranks() as i8).rev() {
            for file in 0..self.size.files() as i8 {
                out.push(
                    self.piece_at(Square::new(rank, file))
                        .map_or(EMPTY_CELL, |p| p.symbol()),
                );
            }
            out.push('\n');
        }
        out
    }

    /// Parse board text as produced by [`Board::render`]. The size is taken
    /// from the text; the history starts empty.
    pub fn from_text(text: &str) -> Result<Self, ChessError> {
        let rows: Vec<&str> = text.lines().map(str::trim_end).collect();
        if rows.is_empty() {
            return Err(ChessError::InvalidBoardText("no rows".into()));
        }
        let width = rows[0].chars().count();
        if rows.iter().any(|r| r.chars().count() != width) {
            return Err(ChessError::InvalidBoardText(
                "rows have different widths".into(),
            ));
        }
        let ranks = u8::try_from(rows.len()).unwrap_or(u8::MAX);
        let files = u8::try_from(width).unwrap_or(u8::MAX);
        let size = BoardSize::new(ranks, files)?;

        let mut board = Board::empty(size);
        for (row, line) in rows.iter().enumerate() {
            let rank = (rows.len() - 1 - row) as i8;
            for (file, c) in line.chars().enumerate() {
                if c == EMPTY_CELL {
                    continue;
                }
                let (color, kind) = PieceKind::from_char(c).ok_or(ChessError::InvalidPiece(c))?;
                board.put(Piece::new(kind, color, Square::new(rank, file as i8)));
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
