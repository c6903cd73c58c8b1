//! Move notation: rendering and parsing.
//!
//! Rendering examples: `e4`, `Nf3`, `Rad1`, `exd6e.p.`, `b8Q+`, `Qh4#`,
//! `0-0`, `0-0-0`.
//!
//! Parsing accepts, in order of precedence:
//!   * castling tokens `0-0` / `0-0-0` (or `O-O` / `O-O-O`),
//!   * coordinates `e2e4`, optionally followed by `e.p.` or a promotion
//!     letter in either case (`e7e8q`),
//!   * algebraic text, matched by rendering every legal move.

use crate::engine::board::Board;
use crate::engine::moves::{CastlingSide, Move};
use crate::engine::types::{BoardSize, ChessError, Color, PieceKind, Square};

const EN_PASSANT_SUFFIX: &str = "e.p.";

// =========================================================================
// Rendering
// =========================================================================

/// Render `mv` in algebraic notation. `board` is the position the move is
/// played from and `mv` must be legal in it.
pub fn move_to_notation(board: &Board, mv: &Move) -> String {
    if let Move::Castling { side, .. } = mv {
        return castling_token(*side).into();
    }

    let from = mv.from();
    let Some(piece) = board.piece_at(from).copied() else {
        return mv.identifier();
    };

    let mut text = String::with_capacity(8);
    let capture = mv.is_capture(board);

    if piece.kind == PieceKind::Pawn {
        if capture {
            text.push(from.file_char());
            text.push('x');
        }
    } else {
        text.push(piece.kind.letter());
        text.push_str(&disambiguation(board, mv, piece.kind, piece.color));
        if capture {
            text.push('x');
        }
    }
    text.push_str(&mv.to().notation());

    match mv {
        Move::EnPassant { .. } => text.push_str(EN_PASSANT_SUFFIX),
        Move::Promotion { kind, .. } => text.push(kind.letter()),
        _ => {}
    }

    text.push_str(check_suffix(board, mv, piece.color));
    text
}

fn castling_token(side: CastlingSide) -> &'static str {
    match side {
        CastlingSide::KingSide => "0-0",
        CastlingSide::QueenSide => "0-0-0",
    }
}

/// File, rank, or both of the origin, when another piece of the same kind
/// can also legally reach the destination.
fn disambiguation(board: &Board, mv: &Move, kind: PieceKind, color: Color) -> String {
    let from = mv.from();
    let rivals: Vec<Square> = board
        .legal_moves(color)
        .iter()
        .filter(|m| m.to() == mv.to() && m.from() != from && !matches!(m, Move::Castling { .. }))
        .filter(|m| board.piece_at(m.from()).is_some_and(|p| p.kind == kind))
        .map(|m| m.from())
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let same_file = rivals.iter().any(|s| s.file() == from.file());
    let same_rank = rivals.iter().any(|s| s.rank() == from.rank());

    match (same_file, same_rank) {
        (false, _) => from.file_char().to_string(),
        (true, false) => from.rank_label(),
        (true, true) => from.notation(),
    }
}

/// `#` if the opponent is mated after `mv`, `+` if merely in check.
fn check_suffix(board: &Board, mv: &Move, mover: Color) -> &'static str {
    let mut after = board.clone();
    if after.play(mv).is_err() {
        return "";
    }
    let opponent = !mover;
    if after.in_checkmate(opponent) {
        "#"
    } else if after.in_check(opponent) {
        "+"
    } else {
        ""
    }
}

// =========================================================================
// Parsing
// =========================================================================

/// What a coordinate string asks for beyond its two squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Suffix {
    None,
    EnPassant,
    Promotion(PieceKind),
}

/// Resolve `text` to one of the legal moves of `color` on `board`.
pub fn parse_move(board: &Board, color: Color, text: &str) -> Result<Move, ChessError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(invalid(text, "empty move"));
    }
    let legal = board.legal_moves(color);

    if let Some(side) = parse_castling(text) {
        return legal
            .into_iter()
            .find(|m| matches!(m, Move::Castling { side: s, .. } if *s == side))
            .ok_or_else(|| invalid(text, "castling is not allowed"));
    }

    if let Some((from, to, suffix)) = parse_coordinates(text, board.size()) {
        return legal
            .into_iter()
            .find(|m| m.from() == from && m.to() == to && suffix_matches(m, suffix))
            .ok_or_else(|| invalid(text, "not a legal move"));
    }

    let rendered: Vec<(Move, String)> = legal
        .into_iter()
        .map(|m| {
            let notation = move_to_notation(board, &m);
            (m, notation)
        })
        .collect();

    if let Some((mv, _)) = rendered.iter().find(|(_, n)| n == text) {
        return Ok(*mv);
    }
    let bare = strip_annotations(text);
    rendered
        .iter()
        .find(|(_, n)| strip_annotations(n) == bare)
        .map(|(mv, _)| *mv)
        .ok_or_else(|| invalid(text, "no legal move has this notation"))
}

fn invalid(text: &str, reason: &str) -> ChessError {
    ChessError::InvalidMove {
        notation: text.to_string(),
        reason: reason.to_string(),
    }
}

fn strip_check(text: &str) -> &str {
    text.trim_end_matches(['+', '#'])
}

/// Check marks and the en passant suffix, so `exd6` finds `exd6e.p.+`.
fn strip_annotations(text: &str) -> &str {
    let text = strip_check(text);
    text.strip_suffix(EN_PASSANT_SUFFIX).unwrap_or(text)
}

fn parse_castling(text: &str) -> Option<CastlingSide> {
    match strip_check(text) {
        "0-0" | "O-O" => Some(CastlingSide::KingSide),
        "0-0-0" | "O-O-O" => Some(CastlingSide::QueenSide),
        _ => None,
    }
}

/// Split `text` into two squares and a suffix, e.g. `e7e8Q`.
fn parse_coordinates(text: &str, size: BoardSize) -> Option<(Square, Square, Suffix)> {
    let (from, rest) = split_square(text, size)?;
    let (to, rest) = split_square(rest, size)?;
    let suffix = match rest {
        "" => Suffix::None,
        EN_PASSANT_SUFFIX => Suffix::EnPassant,
        _ => {
            let mut chars = rest.chars();
            let kind = PieceKind::promotion_from_char(chars.next()?)?;
            if chars.next().is_some() {
                return None;
            }
            Suffix::Promotion(kind)
        }
    };
    Some((from, to, suffix))
}

/// Take one square (a file letter and its rank digits) off the front of `text`.
fn split_square(text: &str, size: BoardSize) -> Option<(Square, &str)> {
    let digits_end = text
        .char_indices()
        .skip(1)
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(text.len(), |(i, _)| i);
    let sq = Square::parse(text.get(..digits_end)?, size)?;
    Some((sq, &text[digits_end..]))
}

fn suffix_matches(mv: &Move, suffix: Suffix) -> bool {
    match (mv, suffix) {
        (Move::Regular { .. } | Move::Castling { .. }, Suffix::None) => true,
        (Move::EnPassant { .. }, Suffix::None | Suffix::EnPassant) => true,
        (Move::Promotion { kind, .. }, Suffix::Promotion(wanted)) => *kind == wanted,
        _ => false,
    }
}

// =========================================================================
// Tests
// =========================================================================
