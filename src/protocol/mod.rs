//! Peer protocol for two engines playing over a transport the caller owns.
//!
//! Sessions open with a commit-reveal handshake that assigns colors without
//! either side being able to choose; afterwards each side sends moves as
//! `MoveMessage` values and answers the opponent's moves with a
//! `ResponseMessage`. Everything here is plain values and checks; reading
//! and writing the JSON lines is left to the transport.

pub mod handshake;
pub mod messages;

pub use handshake::{HostHandshake, JoinHandshake, commitment_hash, sides};
pub use messages::{
    ChoiceMessage, InitCommit, InitReveal, MessageType, MoveMessage, MoveResponse,
    ResponseMessage, Typed,
};

/// Failures while talking to a peer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("opponent cheated: {0}")]
    OpponentCheated(String),

    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a {expected} message, got {found}")]
    UnexpectedType {
        expected: MessageType,
        found: MessageType,
    },

    #[error("invalid move message: {0}")]
    InvalidMove(String),
}
