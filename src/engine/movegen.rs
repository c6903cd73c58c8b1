//! Legal move generation.
//!
//! Pipeline:
//!   1. Each piece of the mover proposes candidates from its reach, plus
//!      castling (king) and en passant (pawn). Pawn moves onto the last
//!      rank are expanded into one promotion per piece kind.
//!   2. Filter: play each candidate on a clone of the board and drop it if
//!      the mover's king is attacked afterwards.

use crate::engine::board::Board;
use crate::engine::moves::{CastlingSide, Move};
use crate::engine::piece::Piece;
use crate::engine::types::{Color, PieceKind, Square};

// =========================================================================
// Public API
// =========================================================================

/// Generate all legal moves for `color`.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces_of(color)
        .flat_map(|piece| piece_legal_moves(board, piece))
        .collect()
}

/// Generate all legal moves of the piece standing on `from`.
pub fn legal_moves_from(board: &Board, from: Square) -> Vec<Move> {
    board
        .piece_at(from)
        .map_or_else(Vec::new, |piece| piece_legal_moves(board, piece))
}

/// Generate the legal moves of one piece.
pub fn piece_legal_moves(board: &Board, piece: &Piece) -> Vec<Move> {
    let mut candidates = Vec::new();
    piece_candidates(board, piece, &mut candidates);
    candidates.retain(|mv| leaves_king_safe(board, piece.color, mv));
    candidates
}

/// Whether playing `mv` keeps the king of `color` out of check.
fn leaves_king_safe(board: &Board, color: Color, mv: &Move) -> bool {
    let mut copy = board.clone();
    mv.apply(&mut copy).is_ok() && !copy.in_check(color)
}

// =========================================================================
// Candidates (internal)
// =========================================================================

fn piece_candidates(board: &Board, piece: &Piece, moves: &mut Vec<Move>) {
    let from = piece.square;
    let last_rank = Piece::last_rank(piece.color, board);

    for to in piece.reach(board) {
        if piece.kind == PieceKind::Pawn && to.rank() == last_rank {
            push_promotions(from, to, piece.color, moves);
        } else {
            moves.push(Move::Regular { from, to });
        }
    }

    match piece.kind {
        PieceKind::King => castling_candidates(board, piece, moves),
        PieceKind::Pawn => {
            if let Some(mv) = en_passant_candidate(board, piece) {
                moves.push(mv);
            }
        }
        _ => {}
    }
}

fn push_promotions(from: Square, to: Square, color: Color, moves: &mut Vec<Move>) {
    for kind in PieceKind::PROMOTIONS {
        moves.push(Move::Promotion {
            from,
            to,
            kind,
            color,
        });
    }
}

// =========================================================================
// Castling
// =========================================================================

/// Castling is offered when the king sits unmoved on its home rank, is not
/// in check, and the first piece outward along the rank is an unmoved
/// friendly rook at least three files away. Only the king's landing square
/// is verified by the safety filter; the square it crosses is not.
fn castling_candidates(board: &Board, king: &Piece, moves: &mut Vec<Move>) {
    let from = king.square;
    let home_rank = match king.color {
        Color::White => 0,
        Color::Black => board.size().ranks() as i8 - 1,
    };
    if from.rank() != home_rank
        || board.history().has_moved(from)
        || board.in_check(king.color)
    {
        return;
    }

    for (dir, side) in [(-1, CastlingSide::QueenSide), (1, CastlingSide::KingSide)] {
        let Some(rook) = first_piece_along_rank(board, from, dir) else {
            continue;
        };
        let distance = (rook.square.file() - from.file()).abs();
        if distance >= 3
            && rook.kind == PieceKind::Rook
            && rook.color == king.color
            && !board.history().has_moved(rook.square)
        {
            moves.push(Move::Castling {
                from,
                to: from.offset(0, 2 * dir),
                rook_from: rook.square,
                rook_to: from.offset(0, dir),
                side,
            });
        }
    }
}

fn first_piece_along_rank(board: &Board, from: Square, dir: i8) -> Option<&Piece> {
    let mut sq = from.offset(0, dir);
    while sq.inside(board.size()) {
        if let Some(piece) = board.piece_at(sq) {
            return Some(piece);
        }
        sq = sq.offset(0, dir);
    }
    None
}

// =========================================================================
// En passant
// =========================================================================

/// Capture of an opponent pawn that has just advanced two ranks and now
/// stands beside this pawn.
fn en_passant_candidate(board: &Board, pawn: &Piece) -> Option<Move> {
    let last = board.history().last()?;
    let Move::Regular { from, to } = *last else {
        return None;
    };
    let passed = board.piece_at(to)?;
    if passed.kind != PieceKind::Pawn
        || passed.color == pawn.color
        || (to.rank() - from.rank()).abs() != 2
        || to.rank() != pawn.square.rank()
        || (to.file() - pawn.square.file()).abs() != 1
    {
        return None;
    }
    let dest = to.offset(pawn.color.forward(), 0);
    (dest.inside(board.size()) && board.is_empty(dest)).then_some(Move::EnPassant {
        from: pawn.square,
        to: dest,
        captured: to,
    })
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn board(text: &str) -> Board {
        Board::from_text(text).unwrap()
    }

    fn ids(moves: &[Move]) -> Vec<String> {
        let mut ids: Vec<String> = moves.iter().map(Move::identifier).collect();
        ids.sort();
        ids
    }

    fn play(board: &mut Board, from: &str, to: &str) {
        board
            .play(&Move::Regular {
                from: sq(from),
                to: sq(to),
            })
            .unwrap();
    }

    #[test]
    fn startpos_has_20_moves() {
        let b = Board::standard();
        assert_eq!(legal_moves(&b, Color::White).len(), 20);
        assert_eq!(legal_moves(&b, Color::Black).len(), 20);
    }

    #[test]
    fn legal_moves_from_square() {
        let b = Board::standard();
        assert_eq!(ids(&legal_moves_from(&b, sq("g1"))), vec!["g1f3", "g1h3"]);
        assert!(legal_moves_from(&b, sq("e4")).is_empty());
        assert!(legal_moves_from(&b, sq("d1")).is_empty());
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let b = board("....k...\n....r...\n........\n........\n........\n........\n....B...\n....K...\n");
        assert!(legal_moves_from(&b, sq("e2")).is_empty());
    }

    #[test]
    fn every_legal_move_leaves_king_safe() {
        let b = board("r...k..r\np.ppqpb.\nbn..pnp.\n...PN...\n.p..P...\n..N..Q.p\nPPPBBPPP\nR...K..R\n");
        let moves = legal_moves(&b, Color::White);
        assert!(!moves.is_empty());
        for mv in moves {
            let mut copy = b.clone();
            copy.play(&mv).unwrap();
            assert!(!copy.in_check(Color::White), "{mv} leaves the king in check");
        }
    }

    #[test]
    fn castling_both_sides() {
        let b = board("r...k..r\n........\n........\n........\n........\n........\n........\nR...K..R\n");
        let moves = legal_moves_from(&b, sq("e1"));
        let castles: Vec<_> = moves
            .iter()
            .filter(|m| matches!(m, Move::Castling { .. }))
            .collect();
        assert_eq!(castles.len(), 2);
        assert!(moves.contains(&Move::Castling {
            from: sq("e1"),
            to: sq("g1"),
            rook_from: sq("h1"),
            rook_to: sq("f1"),
            side: CastlingSide::KingSide,
        }));
        assert!(moves.contains(&Move::Castling {
            from: sq("e1"),
            to: sq("c1"),
            rook_from: sq("a1"),
            rook_to: sq("d1"),
            side: CastlingSide::QueenSide,
        }));
    }

    #[test]
    fn no_castling_through_pieces() {
        let b = board("r...k..r\n........\n........\n........\n........\n........\n........\nRN..KB.R\n");
        let castles = legal_moves_from(&b, sq("e1"))
            .into_iter()
            .filter(|m| matches!(m, Move::Castling { .. }))
            .count();
        assert_eq!(castles, 0);
    }

    #[test]
    fn no_castling_after_king_moved() {
        let mut b = board("r...k..r\n........\n........\n........\n........\n........\n........\nR...K..R\n");
        play(&mut b, "e1", "e2");
        play(&mut b, "a8", "a7");
        play(&mut b, "e2", "e1");
        play(&mut b, "a7", "a8");
        let castles = legal_moves_from(&b, sq("e1"))
            .into_iter()
            .filter(|m| matches!(m, Move::Castling { .. }))
            .count();
        assert_eq!(castles, 0);
    }

    #[test]
    fn no_castling_with_moved_rook() {
        let mut b = board("r...k..r\n........\n........\n........\n........\n........\n........\nR...K..R\n");
        play(&mut b, "h1", "h2");
        play(&mut b, "a8", "a7");
        play(&mut b, "h2", "h1");
        play(&mut b, "a7", "a8");
        let castles: Vec<_> = legal_moves_from(&b, sq("e1"))
            .into_iter()
            .filter(|m| matches!(m, Move::Castling { .. }))
            .collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to(), sq("c1"));
    }

    #[test]
    fn no_castling_out_of_check() {
        let b = board("r...k..r\n........\n........\n........\n....r...\n........\n........\nR...K..R\n");
        assert!(b.in_check(Color::White));
        assert!(
            !legal_moves(&b, Color::White)
                .iter()
                .any(|m| matches!(m, Move::Castling { .. }))
        );
    }

    #[test]
    fn no_castling_into_check() {
        let b = board("r...k.r.\n........\n........\n........\n........\n........\n........\nR...K..R\n");
        assert!(
            !legal_moves_from(&b, sq("e1"))
                .iter()
                .any(|m| matches!(m, Move::Castling { side: CastlingSide::KingSide, .. }))
        );
    }

    #[test]
    fn castling_across_attacked_square_is_allowed() {
        let crossing = ".....r.k\n........\n........\n........\n........\n........\n........\n....K..R\n";
        let mut b = board(crossing);
        let castle = legal_moves_from(&b, sq("e1"))
            .into_iter()
            .find(|m| matches!(m, Move::Castling { side: CastlingSide::KingSide, .. }))
            .expect("f1 is attacked but castling is still offered");
        b.play(&castle).unwrap();
        assert_eq!(b.piece_at(sq("g1")).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(b.piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));

        let landing = "......rk\n........\n........\n........\n........\n........\n........\n....K..R\n";
        let b = board(landing);
        assert!(
            !legal_moves_from(&b, sq("e1"))
                .iter()
                .any(|m| matches!(m, Move::Castling { .. }))
        );
    }

    #[test]
    fn en_passant_after_double_step() {
        let mut b = board("....k...\n...p....\n........\n....P...\n........\n........\n........\n....K...\n");
        play(&mut b, "d7", "d5");
        let moves = legal_moves_from(&b, sq("e5"));
        assert!(moves.contains(&Move::EnPassant {
            from: sq("e5"),
            to: sq("d6"),
            captured: sq("d5"),
        }));
    }

    #[test]
    fn en_passant_only_immediately() {
        let mut b = board("....k...\n...p....\n........\n....P...\n........\n........\n........\n....K...\n");
        play(&mut b, "d7", "d5");
        play(&mut b, "e1", "e2");
        play(&mut b, "e8", "e7");
        assert!(
            !legal_moves_from(&b, sq("e5"))
                .iter()
                .any(|m| matches!(m, Move::EnPassant { .. }))
        );
    }

    #[test]
    fn no_en_passant_after_single_steps() {
        let mut b = board("....k...\n........\n...p....\n....P...\n........\n........\n........\n....K...\n");
        play(&mut b, "d6", "d5");
        assert!(
            !legal_moves_from(&b, sq("e5"))
                .iter()
                .any(|m| matches!(m, Move::EnPassant { .. }))
        );
    }

    #[test]
    fn promotion_expands_to_four() {
        let b = board("....k...\nP.......\n........\n........\n........\n........\n........\n....K...\n");
        let moves = legal_moves_from(&b, sq("a7"));
        assert_eq!(ids(&moves), vec!["a7a8B", "a7a8N", "a7a8Q", "a7a8R"]);
    }

    #[test]
    fn black_promotion_with_capture() {
        let b = board("....k...\n........\n........\n........\n........\n........\n.p......\nR...K...\n");
        let moves = legal_moves_from(&b, sq("b2"));
        assert_eq!(
            ids(&moves),
            vec!["b2a1b", "b2a1n", "b2a1q", "b2a1r", "b2b1b", "b2b1n", "b2b1q", "b2b1r"]
        );
    }
}
