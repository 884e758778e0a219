//! Error types.
//!
//! User-facing failures (bad URL, duplicate URL, network, parse) are already
//! rendered by the transition engine by the time they are returned, so callers
//! usually only care whether an error is fatal.

use thiserror::Error;

use crate::fsm::Machine;

/// Failure reported by one of the feed collaborators (transport or parser).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The transport could not deliver a payload.
    #[error("network error: {0}")]
    Network(String),

    /// The payload is not RSS or Atom markup.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A state machine was asked to take an edge it does not have.
///
/// This is a programming error, never a recoverable user-facing failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("invalid {machine} transition: {from} -> {to}")]
    InvalidEdge {
        machine: Machine,
        from: String,
        to: String,
    },
}

/// Outcome of a failed feed submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL already added: {0}")]
    DuplicateUrl(String),

    #[error(transparent)]
    Network(FeedError),

    #[error(transparent)]
    Parse(FeedError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl Error {
    /// Only broken state machines are fatal; everything else has been shown
    /// to the user and the application carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Transition(_))
    }
}

impl From<FeedError> for Error {
    fn from(e: FeedError) -> Self {
        match e {
            FeedError::Network(_) => Error::Network(e),
            FeedError::Parse(_) => Error::Parse(e),
        }
    }
}

/// Result type alias for submission operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_errors_map_to_matching_variant() {
        let net: Error = FeedError::Network("timeout".into()).into();
        let parse: Error = FeedError::Parse("no channel".into()).into();
        assert!(matches!(net, Error::Network(_)));
        assert!(matches!(parse, Error::Parse(_)));
    }

    #[test]
    fn only_transition_errors_are_fatal() {
        let edge = TransitionError::InvalidEdge {
            machine: Machine::Loading,
            from: "finished".into(),
            to: "failed".into(),
        };
        assert!(Error::from(edge).is_fatal());
        assert!(!Error::InvalidUrl("x".into()).is_fatal());
        assert!(!Error::DuplicateUrl("x".into()).is_fatal());
    }

    #[test]
    fn invalid_edge_display() {
        let edge = TransitionError::InvalidEdge {
            machine: Machine::Validation,
            from: "none".into(),
            to: "failed".into(),
        };
        assert_eq!(
            edge.to_string(),
            "invalid validation transition: none -> failed"
        );
    }
}
