//! Error types for the automaton engine.
//!
//! Every fallible operation reports its error synchronously at the API
//! boundary and leaves the caller's inputs unchanged. There are no retries
//! and no partial-success results.

use thiserror::Error;

/// Error type for automaton operations.
#[derive(Error, Debug)]
pub enum AutomatonError {
    /// An argument violated an operation's precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A DFS-based operation was invoked on an automaton without start states.
    #[error("automaton has no start state")]
    NoStartState,
    /// A deterministic-only operation was invoked on a non-deterministic automaton.
    #[error("automaton '{0}' is not deterministic")]
    NotDeterministic(String),
    /// A canonical signature string was malformed.
    #[error("malformed signature: {0}")]
    Signature(String),
    /// A text-format automaton description was malformed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// IO error while loading a text-format automaton.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for automaton operations.
pub type Result<T> = std::result::Result<T, AutomatonError>;
