//! OxiFA Core - finite automata over finite alphabets.
//!
//! This crate provides the algorithmic engine for regular languages:
//!
//! - The [`Automaton`] graph with its symbol-indexed transition map
//! - Closure under the regular operations (union, concatenation, star,
//!   reversal, complement, intersection, difference)
//! - Determinization by subset construction and minimization by both
//!   Hopcroft and Brzozowski
//! - Canonical DFS renaming, bit-exact signatures and language equivalence
//! - Exact isomorphism testing for small graphs
//! - Sample languages with oracle predicates, and a text-format loader
//!
//! # Examples
//!
//! ## Building and querying an automaton
//!
//! ```
//! use oxifa_core::{Alphabet, Automaton};
//!
//! let alphabet = Alphabet::new("ab").unwrap();
//! let mut a = Automaton::new("ends-with-b", alphabet);
//! let q0 = a.add_state("q0", true, false);
//! let q1 = a.add_state("q1", false, true);
//! a.add_edge(q0, q0, 'a');
//! a.add_edge(q0, q0, 'b');
//! a.add_edge(q0, q1, 'b');
//!
//! assert!(a.accepts("ab"));
//! assert!(!a.accepts("ba"));
//! ```
//!
//! ## Determinizing, minimizing, comparing
//!
//! ```
//! use oxifa_core::{sample, Alphabet};
//!
//! let alphabet = Alphabet::new("ab").unwrap();
//! let ends = sample::ends_with(&alphabet, "ab").unwrap().automaton;
//! let dfa = ends.make_deterministic();
//! assert!(dfa.is_deterministic());
//!
//! let minimal = ends.minimize().unwrap();
//! assert!(minimal.equivalent(&ends).unwrap());
//! ```
//!
//! ## Canonical signatures
//!
//! ```
//! use oxifa_core::{sample, Alphabet, Automaton};
//!
//! let alphabet = Alphabet::new("ab").unwrap();
//! let minimal = sample::ends_with(&alphabet, "ab")
//!     .unwrap()
//!     .automaton
//!     .minimize()
//!     .unwrap();
//! let signature = minimal.signature_dfs().unwrap();
//! let rebuilt = Automaton::from_signature(&signature).unwrap();
//! assert_eq!(rebuilt.signature_dfs().unwrap(), signature);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod alphabet;
pub mod automaton;
pub mod base62;
pub mod error;
mod loader;
pub mod sample;
pub mod state_set;

pub use alphabet::{Alphabet, Words};
pub use automaton::isomorphism::{random_permutation, Permutations};
pub use automaton::minimize::MinimizationAlgorithm;
pub use automaton::{AcceptedWords, Automaton, Edge, EdgeId, State, StateId};
pub use error::{AutomatonError, Result};
pub use sample::SampleAutomaton;
pub use state_set::StateSet;
