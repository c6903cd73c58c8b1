//! Stateful game controller wrapping Board.
//!
//! `Game` runs the state machine `Setup → Play → {WhiteWin, BlackWin, Draw}`.
//! During setup pieces are placed freely; once both sides have exactly one
//! king the game can start, after which every submitted move is resolved
//! against the legal move list of the side to move. It is the type front
//! ends and network peers talk to.

use tracing::{debug, info};

use crate::engine::board::Board;
use crate::engine::moves::Move;
use crate::engine::notation;
use crate::engine::piece::Piece;
use crate::engine::types::{BoardSize, ChessError, Color, GameState, PieceKind, Square};

// =========================================================================
// MoveRecord
// =========================================================================

/// A move as it was played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    /// Algebraic notation, computed before the move was applied.
    pub notation: String,
    pub state_after: GameState,
}

// =========================================================================
// Game
// =========================================================================

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    state: GameState,
    current_player: Color,
    move_history: Vec<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// An empty standard-size board in the setup state.
    pub fn new() -> Self {
        Self::with_size(BoardSize::STANDARD)
    }

    /// An empty board of the given size in the setup state.
    pub fn with_size(size: BoardSize) -> Self {
        Self {
            board: Board::empty(size),
            state: GameState::Setup,
            current_player: Color::White,
            move_history: Vec::new(),
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> BoardSize {
        self.board.size()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Side to move. White until the game starts.
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Rendered board text, highest rank first.
    pub fn board_text(&self) -> String {
        self.board.render()
    }

    /// Human-readable status line.
    pub fn status_text(&self) -> &'static str {
        match self.state {
            GameState::Setup => "Setting up the board, can't play yet.",
            GameState::Play => match self.current_player {
                Color::White => "White to play.",
                Color::Black => "Black to play.",
            },
            GameState::WhiteWin => "White has won!",
            GameState::BlackWin => "Black has won!",
            GameState::Draw => "It's a draw!",
        }
    }

    /// Completed moves with their notation.
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    /// Notation of every move played so far.
    pub fn move_list(&self) -> Vec<&str> {
        self.move_history
            .iter()
            .map(|r| r.notation.as_str())
            .collect()
    }

    /// Legal moves of the side to move; empty outside of play.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state != GameState::Play {
            return Vec::new();
        }
        self.board.legal_moves(self.current_player)
    }

    /// Squares the piece on `sq` may move to. Empty unless the game is in
    /// play and `sq` holds a piece of the side to move.
    pub fn legal_destinations(&self, sq: Square) -> Vec<Square> {
        if self.state != GameState::Play || !self.board.is_friendly(self.current_player, sq) {
            return Vec::new();
        }
        let mut destinations: Vec<Square> = Vec::new();
        for mv in self.legal_moves().iter().filter(|m| m.from() == sq) {
            if !destinations.contains(&mv.to()) {
                destinations.push(mv.to());
            }
        }
        destinations
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.board.in_check(color)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    // -----------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------

    /// Put the piece named by `symbol` (`K`, `q`, ...) on `sq`.
    pub fn place_piece(&mut self, sq: Square, symbol: char) -> Result<(), ChessError> {
        self.require(GameState::Setup)?;
        let (color, kind) = PieceKind::from_char(symbol).ok_or(ChessError::InvalidPiece(symbol))?;
        self.board.place(kind, color, sq)?;
        debug!(square = %sq, symbol = %symbol, "piece placed");
        Ok(())
    }

    /// Take the piece off `sq`.
    pub fn remove_piece(&mut self, sq: Square) -> Result<Piece, ChessError> {
        self.require(GameState::Setup)?;
        let piece = self.board.remove(sq)?;
        debug!(square = %sq, symbol = %piece.symbol(), "piece removed");
        Ok(piece)
    }

    /// Replace the board contents with the standard starting army.
    pub fn setup_standard_board(&mut self) -> Result<(), ChessError> {
        self.require(GameState::Setup)?;
        self.board.setup_standard()?;
        debug!("standard position set up");
        Ok(())
    }

    /// Replace the board with a placement in board-text form. The board
    /// size follows the text.
    pub fn load_placement(&mut self, text: &str) -> Result<(), ChessError> {
        self.require(GameState::Setup)?;
        self.board = Board::from_text(text)?;
        debug!(size = %self.board.size(), "placement loaded");
        Ok(())
    }

    /// Leave setup with White to move. Both sides need exactly one king.
    /// The position is not otherwise validated: a Black king left in check
    /// can be captured on White's first move.
    pub fn start_game(&mut self) -> Result<(), ChessError> {
        self.require(GameState::Setup)?;
        for color in [Color::White, Color::Black] {
            if self.board.find_king(color).is_none() {
                debug!(%color, "cannot start without a unique king");
                return Err(ChessError::MissingKing(color));
            }
        }
        self.state = GameState::Play;
        self.current_player = Color::White;
        info!(state = %self.state, "game started");
        Ok(())
    }

    // -----------------------------------------------------------------
    // Play
    // -----------------------------------------------------------------

    /// Play a move given as coordinates (`e2e4`, `e7e8Q`), castling tokens
    /// (`0-0`), or algebraic notation (`Nf3`). Returns the move's algebraic
    /// notation.
    pub fn make_move(&mut self, text: &str) -> Result<String, ChessError> {
        self.require(GameState::Play)?;
        let mv = notation::parse_move(&self.board, self.current_player, text).inspect_err(|e| {
            debug!(player = %self.current_player, input = text, "move rejected: {e}");
        })?;
        self.apply(mv)
    }

    /// Play the move of the piece on `from` to `to`. `promotion` must name
    /// the piece kind exactly when the move promotes.
    pub fn make_move_squares(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<String, ChessError> {
        self.require(GameState::Play)?;
        let found = self.legal_moves().into_iter().find(|m| {
            m.from() == from
                && m.to() == to
                && match m {
                    Move::Promotion { kind, .. } => promotion == Some(*kind),
                    _ => promotion.is_none(),
                }
        });
        match found {
            Some(mv) => self.apply(mv),
            None => {
                let notation = format!("{from}{to}");
                debug!(player = %self.current_player, input = %notation, "move rejected");
                let reason = match promotion {
                    Some(kind) => format!("no legal promotion to a {kind}"),
                    None => "not a legal move".into(),
                };
                Err(ChessError::InvalidMove { notation, reason })
            }
        }
    }

    fn apply(&mut self, mv: Move) -> Result<String, ChessError> {
        let notation = notation::move_to_notation(&self.board, &mv);
        self.board.play(&mv)?;

        let mover = self.current_player;
        self.current_player = !mover;
        self.state = self.evaluate();

        info!(
            player = %mover,
            notation = %notation,
            state = %self.state,
            "move played"
        );
        self.move_history.push(MoveRecord {
            mv,
            notation: notation.clone(),
            state_after: self.state,
        });
        Ok(notation)
    }

    /// State after a move: stalemate of the side to move first, then mate
    /// of either side.
    fn evaluate(&self) -> GameState {
        if self.board.in_stalemate(self.current_player) {
            GameState::Draw
        } else if self.board.in_checkmate(Color::Black) {
            GameState::WhiteWin
        } else if self.board.in_checkmate(Color::White) {
            GameState::BlackWin
        } else {
            GameState::Play
        }
    }

    fn require(&self, expected: GameState) -> Result<(), ChessError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ChessError::WrongState {
                expected,
                actual: self.state,
            })
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
