//! Error types for regular-expression syntax and conversions.

use oxifa_core::AutomatonError;
use thiserror::Error;

/// Error type for regex parsing and construction.
#[derive(Error, Debug)]
pub enum RegexError {
    /// The input could not be parsed.
    #[error("parse error at position {position}: {message}")]
    Parse {
        /// 0-based character position in the (whitespace-stripped,
        /// dot-expanded) input.
        position: usize,
        /// What went wrong.
        message: String,
    },
    /// Two operands were built over different alphabets.
    #[error("operands use different alphabets: '{left}' vs '{right}'")]
    AlphabetMismatch {
        /// Alphabet of the left operand.
        left: String,
        /// Alphabet of the right operand.
        right: String,
    },
    /// A word literal used a symbol outside the alphabet.
    #[error("symbol '{0}' is not in the alphabet")]
    SymbolOutsideAlphabet(char),
    /// An underlying automaton operation failed.
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

/// Result type for regex operations.
pub type Result<T> = std::result::Result<T, RegexError>;
