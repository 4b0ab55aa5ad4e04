//! Property-based test suites for oxifa-core.

mod alphabet_properties;
mod automaton_properties;

use oxifa_core::{Alphabet, Automaton};
use proptest::prelude::*;

/// Strategy for small pseudo-random automata over `ab`: up to five states
/// with random flags and up to twelve random edges.
pub fn automaton_strategy() -> impl Strategy<Value = Automaton> {
    let state_count = 1usize..=5;
    state_count.prop_flat_map(|n| {
        (
            proptest::collection::vec((any::<bool>(), any::<bool>()), n),
            proptest::collection::vec((0..n, 0..n, 0..2usize), 0..=12),
        )
            .prop_map(move |(flags, edges)| {
                let alphabet = Alphabet::new("ab").unwrap();
                let symbols = ['a', 'b'];
                let mut automaton = Automaton::new("random", alphabet);
                let ids: Vec<_> = flags
                    .iter()
                    .enumerate()
                    .map(|(i, &(start, is_final))| {
                        automaton.add_state(&format!("q{i}"), start, is_final)
                    })
                    .collect();
                for (from, to, symbol) in edges {
                    automaton.add_edge(ids[from], ids[to], symbols[symbol]);
                }
                automaton
            })
    })
}

/// Strategy for short words over `ab`.
pub fn word_strategy() -> impl Strategy<Value = String> {
    "[ab]{0,6}"
}
