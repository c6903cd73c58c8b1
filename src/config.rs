use crate::engine::{BoardSize, ChessError};

/// Front-end configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Number of ranks on the board.
    pub ranks: u8,
    /// Number of files on the board.
    pub files: u8,
    /// Print the move list after every accepted move.
    pub show_moves: bool,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup; unset or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            ranks: lookup("CHESS_RANKS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.ranks),
            files: lookup("CHESS_FILES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.files),
            show_moves: lookup("CHESS_SHOW_MOVES")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes" | "on"))
                .unwrap_or(defaults.show_moves),
        }
    }

    /// Board dimensions, validated.
    pub fn board_size(&self) -> Result<BoardSize, ChessError> {
        BoardSize::new(self.ranks, self.files)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            ranks: 8,
            files: 8,
            show_moves: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ranks, 8);
        assert_eq!(config.files, 8);
        assert!(!config.show_moves);
        assert_eq!(config.board_size().unwrap(), BoardSize::STANDARD);
    }

    #[test]
    fn lookup_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("CHESS_RANKS", "10"),
            ("CHESS_FILES", " 8 "),
            ("CHESS_SHOW_MOVES", "true"),
        ]));
        assert_eq!(config.ranks, 10);
        assert_eq!(config.files, 8);
        assert!(config.show_moves);
        assert_eq!(config.board_size().unwrap(), BoardSize::new(10, 8).unwrap());
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("CHESS_RANKS", "many"),
            ("CHESS_SHOW_MOVES", "nope"),
        ]));
        assert_eq!(config.ranks, 8);
        assert!(!config.show_moves);
    }

    #[test]
    fn out_of_range_size_is_rejected() {
        let config = AppConfig::from_lookup(lookup(&[("CHESS_FILES", "30")]));
        assert!(config.board_size().is_err());
    }
}
