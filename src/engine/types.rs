use std::fmt;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Rank direction in which this side's pawns advance.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, in the order they are offered.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Uppercase letter used in algebraic notation.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Single uppercase letter for white, lowercase for black.
    pub fn to_char(self, color: Color) -> char {
        match color {
            Color::White => self.letter(),
            Color::Black => self.letter().to_ascii_lowercase(),
        }
    }

    /// Parse a piece character; the case decides the color.
    pub fn from_char(c: char) -> Option<(Color, PieceKind)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((color, kind))
    }

    /// Parse a promotion letter in either case.
    pub fn promotion_from_char(c: char) -> Option<PieceKind> {
        match PieceKind::from_char(c) {
            Some((_, kind)) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn"),
            PieceKind::Knight => write!(f, "knight"),
            PieceKind::Bishop => write!(f, "bishop"),
            PieceKind::Rook => write!(f, "rook"),
            PieceKind::Queen => write!(f, "queen"),
            PieceKind::King => write!(f, "king"),
        }
    }
}

// ---------------------------------------------------------------------------
// BoardSize
// ---------------------------------------------------------------------------

/// Rank and file counts of a board. Files are lettered, so at most 26.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardSize {
    ranks: u8,
    files: u8,
}

impl BoardSize {
    pub const STANDARD: BoardSize = BoardSize { ranks: 8, files: 8 };

    pub fn new(ranks: u8, files: u8) -> Result<Self, ChessError> {
        if !(1..=99).contains(&ranks) || !(1..=26).contains(&files) {
            return Err(ChessError::InvalidBoardSize { ranks, files });
        }
        Ok(BoardSize { ranks, files })
    }

    #[inline]
    pub const fn ranks(self) -> u8 {
        self.ranks
    }

    #[inline]
    pub const fn files(self) -> u8 {
        self.files
    }

    /// Number of cells on the board.
    #[inline]
    pub const fn cells(self) -> usize {
        self.ranks as usize * self.files as usize
    }

    /// Rank-major cell index of an on-board square.
    #[inline]
    pub fn index(self, sq: Square) -> Option<usize> {
        if sq.inside(self) {
            Some(sq.rank() as usize * self.files as usize + sq.file() as usize)
        } else {
            None
        }
    }

    /// Every square, starting at a1 and walking rank by rank.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        let files = self.files as i8;
        (0..self.ranks as i8).flat_map(move |rank| (0..files).map(move |file| Square::new(rank, file)))
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        BoardSize::STANDARD
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.ranks, self.files)
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A board coordinate. Off-board values are representable so that stepping
/// and ray casting can produce them; `inside` tells them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    rank: i8,
    file: i8,
}

impl Square {
    #[inline]
    pub const fn new(rank: i8, file: i8) -> Self {
        Square { rank, file }
    }

    #[inline]
    pub const fn rank(self) -> i8 {
        self.rank
    }

    #[inline]
    pub const fn file(self) -> i8 {
        self.file
    }

    /// The square `rank_diff` ranks and `file_diff` files away.
    #[inline]
    pub const fn offset(self, rank_diff: i8, file_diff: i8) -> Self {
        Square::new(self.rank + rank_diff, self.file + file_diff)
    }

    /// Whether both coordinates fall within `size`.
    #[inline]
    pub fn inside(self, size: BoardSize) -> bool {
        (0..size.ranks as i8).contains(&self.rank) && (0..size.files as i8).contains(&self.file)
    }

    /// File letter, `?` when the file has no letter.
    pub fn file_char(self) -> char {
        u8::try_from(self.file)
            .ok()
            .filter(|f| *f < 26)
            .map_or('?', |f| (b'a' + f) as char)
    }

    /// Rank as written in notation (1-based).
    pub fn rank_label(self) -> String {
        (self.rank as i16 + 1).to_string()
    }

    /// Algebraic notation like "e4".
    pub fn notation(self) -> String {
        format!("{}{}", self.file_char(), self.rank_label())
    }

    /// Parse algebraic notation for a board of the given size.
    ///
    /// The file is one lowercase letter and the rank a decimal number
    /// without leading zeros; anything else, or a square outside `size`,
    /// yields `None`.
    pub fn parse(text: &str, size: BoardSize) -> Option<Self> {
        let mut chars = text.chars();
        let file_ch = chars.next()?;
        if !file_ch.is_ascii_lowercase() {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || digits.len() > 2
        {
            return None;
        }
        let rank: i8 = digits.parse().ok()?;
        let sq = Square::new(rank - 1, (file_ch as u8 - b'a') as i8);
        sq.inside(size).then_some(sq)
    }

    /// Parse algebraic notation on the standard board.
    pub fn from_algebraic(text: &str) -> Option<Self> {
        Square::parse(text, BoardSize::STANDARD)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// Lifecycle of a game: board setup, play, then one absorbing result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    Setup,
    Play,
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameState {
    pub fn as_str(&self) -> &str {
        match self {
            GameState::Setup => "setup",
            GameState::Play => "play",
            GameState::WhiteWin => "white_win",
            GameState::BlackWin => "black_win",
            GameState::Draw => "draw",
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(
            self,
            GameState::WhiteWin | GameState::BlackWin | GameState::Draw
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChessError
// ---------------------------------------------------------------------------

/// Domain errors for the chess engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid move: {notation}: {reason}")]
    InvalidMove { notation: String, reason: String },

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid piece symbol: '{0}'")]
    InvalidPiece(char),

    #[error("no piece on {0}")]
    EmptySquare(String),

    #[error("invalid board size: {ranks}x{files}")]
    InvalidBoardSize { ranks: u8, files: u8 },

    #[error("invalid board text: {0}")]
    InvalidBoardText(String),

    #[error("{0} has no unique king")]
    MissingKing(Color),

    #[error("operation needs the {expected} state, game is in {actual}")]
    WrongState {
        expected: GameState,
        actual: GameState,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
