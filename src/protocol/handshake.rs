//! Commit-reveal coin flip deciding who plays White.
//!
//! The host draws a coin and a seed starting with that coin's digit, and
//! sends only the SHA-256 of the seed. The joiner answers with its own coin.
//! The host then reveals the seed and its coin, which the joiner checks
//! against the commitment. Equal coins make the host White.

use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::engine::Color;
use crate::protocol::ProtocolError;
use crate::protocol::messages::{ChoiceMessage, InitCommit, InitReveal, MessageType};

/// Random lowercase letters following the coin digit in a seed.
pub const SEED_LETTERS: usize = 10;

/// Uppercase hex SHA-256 of `seed`.
pub fn commitment_hash(seed: &str) -> String {
    Sha256::digest(seed.as_bytes())
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect()
}

/// Colors of (host, joiner) for the two coins.
pub fn sides(host_choice: i64, joiner_choice: i64) -> (Color, Color) {
    if host_choice == joiner_choice {
        (Color::White, Color::Black)
    } else {
        (Color::Black, Color::White)
    }
}

fn valid_choice(choice: i64) -> bool {
    matches!(choice, 0 | 1)
}

// ---------------------------------------------------------------------------
// Host side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HostHandshake {
    choice: i64,
    seed: String,
}

impl HostHandshake {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let choice: i64 = rng.gen_range(0..=1);
        let mut seed = choice.to_string();
        seed.extend((0..SEED_LETTERS).map(|_| rng.gen_range(b'a'..=b'z') as char));
        HostHandshake { choice, seed }
    }

    pub fn choice(&self) -> i64 {
        self.choice
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// First message: the commitment.
    pub fn commit(&self) -> InitCommit {
        InitCommit {
            message_type: MessageType::Init,
            hash: commitment_hash(&self.seed),
        }
    }

    /// Answer the joiner's coin with the reveal, and learn the host's color.
    pub fn reveal(&self, joiner: &ChoiceMessage) -> Result<(InitReveal, Color), ProtocolError> {
        if !valid_choice(joiner.choice) {
            warn!(choice = joiner.choice, "joiner sent an out-of-range choice");
            return Err(ProtocolError::OpponentCheated(format!(
                "choice {} is not 0 or 1",
                joiner.choice
            )));
        }
        let (host, _) = sides(self.choice, joiner.choice);
        debug!(host_choice = self.choice, joiner_choice = joiner.choice, %host, "handshake done");
        Ok((
            InitReveal {
                message_type: MessageType::Init,
                seed: self.seed.clone(),
                choice: self.choice,
            },
            host,
        ))
    }
}

// ---------------------------------------------------------------------------
// Joiner side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct JoinHandshake {
    committed_hash: String,
    choice: i64,
}

impl JoinHandshake {
    /// Receive the host's commitment and draw the joiner's coin.
    pub fn new<R: Rng>(rng: &mut R, commit: &InitCommit) -> Self {
        JoinHandshake {
            committed_hash: commit.hash.clone(),
            choice: rng.gen_range(0..=1),
        }
    }

    pub fn choice(&self) -> i64 {
        self.choice
    }

    pub fn choice_message(&self) -> ChoiceMessage {
        ChoiceMessage {
            choice: self.choice,
        }
    }

    /// Check the host's reveal against its commitment and learn the
    /// joiner's color.
    pub fn verify(&self, reveal: &InitReveal) -> Result<Color, ProtocolError> {
        let cheat = |reason: &str| -> Result<Color, ProtocolError> {
            warn!(reason, "host failed the handshake check");
            Err(ProtocolError::OpponentCheated(reason.to_string()))
        };
        if commitment_hash(&reveal.seed) != self.committed_hash {
            return cheat("seed does not match the committed hash");
        }
        if !valid_choice(reveal.choice) {
            return cheat("host choice is not 0 or 1");
        }
        if !reveal.seed.starts_with(&reveal.choice.to_string()) {
            return cheat("host choice differs from the one in the seed");
        }
        let (_, joiner) = sides(reveal.choice, self.choice);
        debug!(host_choice = reveal.choice, joiner_choice = self.choice, %joiner, "handshake done");
        Ok(joiner)
    }
}
