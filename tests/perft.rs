//! Perft (PERFormance Test): exhaustive move-generation correctness suite.
//!
//! Each test verifies that the number of leaf nodes at a given depth matches
//! known-correct values for standard positions. If perft is wrong at any
//! depth, there is a bug in move generation, move application, or legality
//! filtering.
//!
//! Positions are loaded from board text, so castling and en passant rights
//! are whatever an empty history implies: nothing has moved yet.
//!
//! Reference: <https://www.chessprogramming.org/Perft_Results>

use chess_referee::engine::{Board, Color};

/// Recursive perft: count leaf nodes at `depth`.
fn perft(board: &Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.legal_moves(color);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for mv in moves {
        let mut child = board.clone();
        child.play(&mv).unwrap();
        nodes += perft(&child, !color, depth - 1);
    }
    nodes
}

// =====================================================================
// Position 1: Starting position
// =====================================================================

#[test]
fn perft_start_depth_1() {
    assert_eq!(perft(&Board::standard(), Color::White, 1), 20);
}

#[test]
fn perft_start_depth_2() {
    assert_eq!(perft(&Board::standard(), Color::White, 2), 400);
}

#[test]
fn perft_start_depth_3() {
    assert_eq!(perft(&Board::standard(), Color::White, 3), 8_902);
}

#[test]
fn perft_start_depth_4() {
    assert_eq!(perft(&Board::standard(), Color::White, 4), 197_281);
}

// =====================================================================
// Position 2: "Kiwipete" (castling both ways, pins, many captures)
// =====================================================================

fn kiwipete() -> Board {
    Board::from_text(
        "r...k..r\n\
         p.ppqpb.\n\
         bn..pnp.\n\
         ...PN...\n\
         .p..P...\n\
         ..N..Q.p\n\
         PPPBBPPP\n\
         R...K..R\n",
    )
    .unwrap()
}

#[test]
fn perft_kiwipete_depth_1() {
    assert_eq!(perft(&kiwipete(), Color::White, 1), 48);
}

// =====================================================================
// Position 3: rook endgame with en passant and discovered checks
// =====================================================================

fn position_3() -> Board {
    Board::from_text(
        "........\n\
         ..p.....\n\
         ...p....\n\
         KP.....r\n\
         .R...p.k\n\
         ........\n\
         ....P.P.\n\
         ........\n",
    )
    .unwrap()
}

#[test]
fn perft_pos3_depth_1() {
    assert_eq!(perft(&position_3(), Color::White, 1), 14);
}

#[test]
fn perft_pos3_depth_2() {
    assert_eq!(perft(&position_3(), Color::White, 2), 191);
}

#[test]
fn perft_pos3_depth_3() {
    assert_eq!(perft(&position_3(), Color::White, 3), 2_812);
}

// =====================================================================
// Position 5: promotions with capture, castling next to a knight
// =====================================================================

fn position_5() -> Board {
    Board::from_text(
        "rnbq.k.r\n\
         pp.Pbppp\n\
         ..p.....\n\
         ........\n\
         ..B.....\n\
         ........\n\
         PPP.NnPP\n\
         RNBQK..R\n",
    )
    .unwrap()
}

#[test]
fn perft_pos5_depth_1() {
    assert_eq!(perft(&position_5(), Color::White, 1), 44);
}
