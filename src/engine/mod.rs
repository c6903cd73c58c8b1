pub mod board;
pub mod game;
pub mod history;
pub mod movegen;
pub mod moves;
pub mod notation;
pub mod piece;
pub mod types;

pub use board::Board;
pub use game::{Game, MoveRecord};
pub use history::History;
pub use movegen::{legal_moves, legal_moves_from};
pub use moves::{CastlingSide, Move};
pub use notation::{move_to_notation, parse_move};
pub use piece::Piece;
pub use types::*;
