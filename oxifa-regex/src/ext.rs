//! Extended regular-expression operations.
//!
//! Intersection and complement are not native regex constructors; they are
//! computed by the automaton round trip: compile to automata, apply the
//! automaton operation, minimize, and convert back through state
//! elimination.

use crate::error::Result;
use crate::generalized::GeneralizedAutomaton;
use crate::syntax::RegularExpression;
use oxifa_core::Automaton;

pub use crate::parser::{parse, parse_with_alphabet};

/// A regex for the language of `automaton`, obtained by state elimination
/// on a generalized copy.
pub fn from_automaton(automaton: &Automaton) -> Result<RegularExpression> {
    GeneralizedAutomaton::copy_of(automaton)?.equivalent_re()
}

/// A regex for the intersection of two regex languages.
pub fn intersect(
    left: &RegularExpression,
    right: &RegularExpression,
) -> Result<RegularExpression> {
    let product = left
        .equivalent_automaton()
        .intersect(right.equivalent_automaton());
    from_automaton(&product.minimize()?)
}

/// A regex for the complement of a regex language.
pub fn complement(re: &RegularExpression) -> Result<RegularExpression> {
    from_automaton(&re.equivalent_automaton().complement()?)
}
