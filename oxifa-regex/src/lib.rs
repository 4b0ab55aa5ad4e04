//! OxiFA Regex - regular-expression syntax for the oxifa automaton engine.
//!
//! This crate provides the regex half of the two conversion loops:
//!
//! - [`RegularExpression`]: an immutable syntax tree whose every node
//!   caches an equivalent automaton built compositionally from the core
//!   operations
//! - [`parse`] / [`parse_with_alphabet`]: the concrete-syntax parser
//! - [`GeneralizedAutomaton`]: regex-labelled edges and state elimination,
//!   converting any automaton back to a regex
//! - [`ext`]: intersection and complement of regexes via the automaton
//!   round trip
//!
//! The crate re-exports the `oxifa-core` surface, acting as the facade for
//! the whole library.
//!
//! # Examples
//!
//! ```
//! use oxifa_regex::parse;
//!
//! let re = parse("a(a+b)*+b(a+bb)*").unwrap();
//! assert!(re.accepts("aa"));
//! assert!(!re.accepts("bab"));
//! ```
//!
//! ```
//! use oxifa_regex::{ext, parse};
//!
//! let starts = parse("a(a+b)*").unwrap();
//! let ends = parse("(a+b)*a").unwrap();
//! let both = ext::intersect(&starts, &ends).unwrap();
//! assert!(both.similar(&parse("a+a(a+b)*a").unwrap()).unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod ext;
pub mod generalized;
pub mod parser;
pub mod syntax;

pub use error::{RegexError, Result};
pub use generalized::GeneralizedAutomaton;
pub use parser::{parse, parse_with_alphabet};
pub use syntax::RegularExpression;

// Facade re-exports of the core surface.
pub use oxifa_core::{
    sample, Alphabet, AutomatonError, Automaton, MinimizationAlgorithm, SampleAutomaton,
};
