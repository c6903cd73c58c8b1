//! JSON message schema exchanged between peers.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::engine::{BoardSize, Move, Square};
use crate::protocol::ProtocolError;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Value of the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Init,
    Move,
    Response,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Init => write!(f, "init"),
            MessageType::Move => write!(f, "move"),
            MessageType::Response => write!(f, "response"),
        }
    }
}

/// Messages carrying a `type` discriminator.
pub trait Typed: Serialize + DeserializeOwned {
    const TYPE: MessageType;

    fn message_type(&self) -> MessageType;

    /// Parse a JSON line, rejecting a message of another type.
    fn decode(line: &str) -> Result<Self, ProtocolError> {
        let msg: Self = serde_json::from_str(line)?;
        if msg.message_type() != Self::TYPE {
            return Err(ProtocolError::UnexpectedType {
                expected: Self::TYPE,
                found: msg.message_type(),
            });
        }
        Ok(msg)
    }

    fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

macro_rules! typed {
    ($name:ident, $kind:expr) => {
        impl Typed for $name {
            const TYPE: MessageType = $kind;
            fn message_type(&self) -> MessageType {
                self.message_type
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Handshake
// ---------------------------------------------------------------------------

/// Host → joiner: digest of the secret seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitCommit {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub hash: String,
}

/// Joiner → host: the joiner's coin. Kept signed so an out-of-range value
/// still parses and can be reported as cheating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    pub choice: i64,
}

impl ChoiceMessage {
    pub fn decode(line: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(line)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Host → joiner: the seed behind the commitment and the host's coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitReveal {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub seed: String,
    pub choice: i64,
}

typed!(InitCommit, MessageType::Init);
typed!(InitReveal, MessageType::Init);

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

/// A move in coordinate form. `promotion` is empty unless the move promotes,
/// in which case it holds the uppercase piece letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub promotion: String,
}

typed!(MoveMessage, MessageType::Move);

impl MoveMessage {
    pub fn from_move(mv: &Move) -> Self {
        let promotion = match mv {
            Move::Promotion { kind, .. } => kind.letter().to_string(),
            _ => String::new(),
        };
        MoveMessage {
            message_type: MessageType::Move,
            from: mv.from().notation(),
            to: mv.to().notation(),
            promotion,
        }
    }

    /// Coordinate text the engine accepts, e.g. `e7e8Q`.
    pub fn to_coordinates(&self, size: BoardSize) -> Result<String, ProtocolError> {
        for square in [&self.from, &self.to] {
            if Square::parse(square, size).is_none() {
                return Err(ProtocolError::InvalidMove(format!("bad square '{square}'")));
            }
        }
        if self.promotion.chars().count() > 1 {
            return Err(ProtocolError::InvalidMove(format!(
                "bad promotion '{}'",
                self.promotion
            )));
        }
        Ok(format!("{}{}{}", self.from, self.to, self.promotion))
    }
}

/// Verdict on the opponent's last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveResponse {
    Ok,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub response: MoveResponse,
}

typed!(ResponseMessage, MessageType::Response);

impl ResponseMessage {
    pub fn new(accepted: bool) -> Self {
        ResponseMessage {
            message_type: MessageType::Response,
            response: if accepted {
                MoveResponse::Ok
            } else {
                MoveResponse::Invalid
            },
        }
    }

    pub fn accepted(&self) -> bool {
        self.response == MoveResponse::Ok
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
