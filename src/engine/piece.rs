//! Pieces and their reach.
//!
//! A piece's *reach* is the set of squares it attacks or may step to under
//! the basic movement rules, before any castling, en passant, promotion, or
//! king-safety handling. Check detection uses reach directly.

use crate::engine::board::Board;
use crate::engine::movegen;
use crate::engine::moves::Move;
use crate::engine::types::{Color, PieceKind, Square};

// ---------------------------------------------------------------------------
// Step tables
// ---------------------------------------------------------------------------

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A piece standing on a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
        }
    }

    /// Board-text symbol: uppercase for White, lowercase for Black.
    pub fn symbol(&self) -> char {
        self.kind.to_char(self.color)
    }

    /// Squares this piece attacks or may move to on `board`.
    pub fn reach(&self, board: &Board) -> Vec<Square> {
        match self.kind {
            PieceKind::Pawn => self.pawn_reach(board),
            PieceKind::Knight => self.step_reach(board, &KNIGHT_STEPS),
            PieceKind::King => self.step_reach(board, &KING_STEPS),
            PieceKind::Bishop => self.ray_reach(board, &BISHOP_RAYS),
            PieceKind::Rook => self.ray_reach(board, &ROOK_RAYS),
            PieceKind::Queen => {
                let mut reach = self.ray_reach(board, &ROOK_RAYS);
                reach.extend(self.ray_reach(board, &BISHOP_RAYS));
                reach
            }
        }
    }

    /// Legal moves of this piece, including castling, en passant and
    /// promotions, with moves that expose the own king removed.
    pub fn legal_moves(&self, board: &Board) -> Vec<Move> {
        movegen::piece_legal_moves(board, self)
    }

    /// Rank on which this side's pawns start and may advance two squares.
    pub fn pawn_start_rank(color: Color, board: &Board) -> i8 {
        match color {
            Color::White => 1,
            Color::Black => board.size().ranks() as i8 - 2,
        }
    }

    /// Farthest rank in this side's forward direction.
    pub fn last_rank(color: Color, board: &Board) -> i8 {
        match color {
            Color::White => board.size().ranks() as i8 - 1,
            Color::Black => 0,
        }
    }

    fn step_reach(&self, board: &Board, steps: &[(i8, i8)]) -> Vec<Square> {
        steps
            .iter()
            .map(|&(dr, df)| self.square.offset(dr, df))
            .filter(|&to| to.inside(board.size()) && !board.is_friendly(self.color, to))
            .collect()
    }

    fn ray_reach(&self, board: &Board, rays: &[(i8, i8)]) -> Vec<Square> {
        let mut reach = Vec::new();
        for &(dr, df) in rays {
            let mut to = self.square.offset(dr, df);
            while to.inside(board.size()) {
                match board.piece_at(to) {
                    None => reach.push(to),
                    Some(other) => {
                        if other.color != self.color {
                            reach.push(to);
                        }
                        break;
                    }
                }
                to = to.offset(dr, df);
            }
        }
        reach
    }

    fn pawn_reach(&self, board: &Board) -> Vec<Square> {
        let size = board.size();
        let fwd = self.color.forward();
        let mut reach = Vec::new();

        let one = self.square.offset(fwd, 0);
        if one.inside(size) && board.is_empty(one) {
            reach.push(one);
            let two = self.square.offset(2 * fwd, 0);
            if self.square.rank() == Piece::pawn_start_rank(self.color, board)
                && two.inside(size)
                && board.is_empty(two)
            {
                reach.push(two);
            }
        }

        for df in [-1, 1] {
            let diag = self.square.offset(fwd, df);
            if diag.inside(size) && board.is_opponent(self.color, diag) {
                reach.push(diag);
            }
        }
        reach
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn sorted(mut squares: Vec<Square>) -> Vec<String> {
        squares.sort_by_key(|s| (s.rank(), s.file()));
        squares.iter().map(|s| s.notation()).collect()
    }

    fn lone(kind: PieceKind, color: Color, at: &str) -> (Board, Piece) {
        let mut board = Board::empty(Default::default());
        board.place(kind, color, sq(at)).unwrap();
        let piece = *board.piece_at(sq(at)).unwrap();
        (board, piece)
    }

    #[test]
    fn knight_in_corner() {
        let (board, knight) = lone(PieceKind::Knight, Color::White, "a1");
        assert_eq!(sorted(knight.reach(&board)), vec!["c2", "b3"]);
    }

    #[test]
    fn knight_in_center_has_eight() {
        let (board, knight) = lone(PieceKind::Knight, Color::Black, "d4");
        assert_eq!(knight.reach(&board).len(), 8);
    }

    #[test]
    fn king_on_edge() {
        let (board, king) = lone(PieceKind::King, Color::White, "e1");
        assert_eq!(sorted(king.reach(&board)), vec!["d1", "f1", "d2", "e2", "f2"]);
    }

    #[test]
    fn rook_on_empty_board() {
        let (board, rook) = lone(PieceKind::Rook, Color::White, "a1");
        assert_eq!(rook.reach(&board).len(), 14);
    }

    #[test]
    fn queen_on_empty_board() {
        let (board, queen) = lone(PieceKind::Queen, Color::White, "d4");
        assert_eq!(queen.reach(&board).len(), 27);
    }

    #[test]
    fn slider_stops_at_blockers() {
        let mut board = Board::empty(Default::default());
        board.place(PieceKind::Rook, Color::White, sq("a1")).unwrap();
        board.place(PieceKind::Pawn, Color::White, sq("a3")).unwrap();
        board.place(PieceKind::Knight, Color::Black, sq("c1")).unwrap();
        let rook = *board.piece_at(sq("a1")).unwrap();
        // Own piece excluded, enemy included, nothing beyond either.
        assert_eq!(sorted(rook.reach(&board)), vec!["b1", "c1", "a2"]);
    }

    #[test]
    fn bishop_captures_first_enemy_only() {
        let mut board = Board::empty(Default::default());
        board.place(PieceKind::Bishop, Color::Black, sq("h8")).unwrap();
        board.place(PieceKind::Pawn, Color::White, sq("e5")).unwrap();
        board.place(PieceKind::Pawn, Color::White, sq("d4")).unwrap();
        let bishop = *board.piece_at(sq("h8")).unwrap();
        assert_eq!(sorted(bishop.reach(&board)), vec!["e5", "f6", "g7"]);
    }

    #[test]
    fn pawn_double_step_from_start() {
        let (board, pawn) = lone(PieceKind::Pawn, Color::White, "e2");
        assert_eq!(sorted(pawn.reach(&board)), vec!["e3", "e4"]);

        let (board, pawn) = lone(PieceKind::Pawn, Color::Black, "d7");
        assert_eq!(sorted(pawn.reach(&board)), vec!["d5", "d6"]);
    }

    #[test]
    fn pawn_single_step_off_start() {
        let (board, pawn) = lone(PieceKind::Pawn, Color::White, "e3");
        assert_eq!(sorted(pawn.reach(&board)), vec!["e4"]);
    }

    #[test]
    fn pawn_blocked() {
        let mut board = Board::empty(Default::default());
        board.place(PieceKind::Pawn, Color::White, sq("e2")).unwrap();
        board.place(PieceKind::Knight, Color::Black, sq("e4")).unwrap();
        let pawn = *board.piece_at(sq("e2")).unwrap();
        assert_eq!(sorted(pawn.reach(&board)), vec!["e3"]);

        board.place(PieceKind::Knight, Color::Black, sq("e3")).unwrap();
        let pawn = *board.piece_at(sq("e2")).unwrap();
        assert!(pawn.reach(&board).is_empty());
    }

    #[test]
    fn pawn_diagonals_need_an_enemy() {
        let mut board = Board::empty(Default::default());
        board.place(PieceKind::Pawn, Color::White, sq("e4")).unwrap();
        board.place(PieceKind::Pawn, Color::Black, sq("d5")).unwrap();
        board.place(PieceKind::Pawn, Color::White, sq("f5")).unwrap();
        let pawn = *board.piece_at(sq("e4")).unwrap();
        assert_eq!(sorted(pawn.reach(&board)), vec!["d5", "e5"]);
    }

    #[test]
    fn legal_moves_drop_self_checks() {
        let mut board = Board::empty(Default::default());
        board.place(PieceKind::King, Color::White, sq("e1")).unwrap();
        board.place(PieceKind::Rook, Color::Black, sq("d8")).unwrap();
        let king = *board.piece_at(sq("e1")).unwrap();
        assert_eq!(king.reach(&board).len(), 5);
        let dests: Vec<Square> = king.legal_moves(&board).iter().map(|m| m.to()).collect();
        assert_eq!(sorted(dests), vec!["f1", "e2", "f2"]);
    }

    #[test]
    fn symbol_case_follows_color() {
        let p = Piece::new(PieceKind::Queen, Color::White, sq("d1"));
        assert_eq!(p.symbol(), 'Q');
        let p = Piece::new(PieceKind::Knight, Color::Black, sq("b8"));
        assert_eq!(p.symbol(), 'n');
    }
}
