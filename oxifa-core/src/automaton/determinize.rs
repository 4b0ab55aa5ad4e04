//! Determinization by subset construction.

use super::{Automaton, StateId};
use crate::base62::to_base62;
use crate::state_set::StateSet;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::debug;

impl Automaton {
    /// Whether the automaton is deterministic: exactly one start state and
    /// at most one successor per (state, symbol).
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        if self.start_states().len() != 1 {
            return false;
        }
        self.delta
            .values()
            .all(|by_source| by_source.values().all(|sinks| sinks.len() <= 1))
    }

    /// An equivalent deterministic automaton.
    ///
    /// Reduces first; an already deterministic reduction is returned as is.
    /// Otherwise the classic subset construction runs over canonical set
    /// names, with the reduction's states renamed to short Base62
    /// identifiers so the set names stay small. The empty subset is
    /// materialized like any other, so the result of a genuine subset
    /// construction is complete.
    #[must_use]
    pub fn make_deterministic(&self) -> Automaton {
        let reduced = self.reduce();
        if reduced.is_deterministic() {
            return reduced;
        }
        let mut source = reduced;
        let short_names: Vec<String> = (0..source.state_count()).map(to_base62).collect();
        // Renaming a freshly reduced automaton positionally cannot fail:
        // the Base62 names are pairwise distinct.
        source
            .rename_states(&short_names)
            .unwrap_or_else(|_| unreachable!("Base62 names are distinct"));

        let mut dfa = Automaton::new(format!("det({})", self.name), self.alphabet.clone());
        let mut by_canonical: FxHashMap<String, StateId> = FxHashMap::default();
        let mut queue: VecDeque<(StateId, StateSet)> = VecDeque::new();

        let start_set: StateSet = source.start_states().into_iter().collect();
        let start_name = start_set.canonical_name(&source);
        let start_final = start_set.iter().any(|id| source.state(id).is_final);
        let start_id = dfa.add_state(&start_name, true, start_final);
        by_canonical.insert(start_name, start_id);
        queue.push_back((start_id, start_set));

        let symbols: Vec<char> = source.alphabet().symbols().to_vec();
        while let Some((dfa_id, subset)) = queue.pop_front() {
            for &symbol in &symbols {
                let image = StateSet::from(source.delta_set(subset.members(), symbol));
                let image_name = image.canonical_name(&source);
                let target = match by_canonical.get(&image_name) {
                    Some(&existing) => existing,
                    None => {
                        let is_final = image.iter().any(|id| source.state(id).is_final);
                        let fresh = dfa.add_state(&image_name, false, is_final);
                        by_canonical.insert(image_name, fresh);
                        queue.push_back((fresh, image));
                        fresh
                    }
                };
                dfa.add_edge(dfa_id, target, symbol);
            }
        }
        debug!(
            source = source.state_count(),
            dfa = dfa.state_count(),
            "subset construction"
        );
        dfa
    }
}

#[cfg(test)]
mod tests {
    use crate::alphabet::Alphabet;
    use crate::automaton::Automaton;

    fn alphabet() -> Alphabet {
        Alphabet::new("ab").unwrap()
    }

    /// NFA for (a+b)*ab: nondeterministic on 'a' in the start state.
    fn nfa_ends_ab() -> Automaton {
        let mut a = Automaton::new("ends-ab", alphabet());
        let q0 = a.add_state("q0", true, false);
        let q1 = a.add_state("q1", false, false);
        let q2 = a.add_state("q2", false, true);
        a.add_edge(q0, q0, 'a');
        a.add_edge(q0, q0, 'b');
        a.add_edge(q0, q1, 'a');
        a.add_edge(q1, q2, 'b');
        a
    }

    #[test]
    fn detects_determinism() {
        let mut det = Automaton::new("det", alphabet());
        let p = det.add_state("p", true, false);
        let q = det.add_state("q", false, true);
        det.add_edge(p, q, 'a');
        assert!(det.is_deterministic());
        det.add_edge(p, p, 'a');
        assert!(!det.is_deterministic());
        assert!(!nfa_ends_ab().is_deterministic());
        // Two start states are not deterministic either.
        let mut two = Automaton::new("two", alphabet());
        two.add_state("p", true, false);
        two.add_state("q", true, true);
        assert!(!two.is_deterministic());
    }

    #[test]
    fn subset_construction_preserves_language() {
        let nfa = nfa_ends_ab();
        let dfa = nfa.make_deterministic();
        assert!(dfa.is_deterministic());
        for word in alphabet().words(6) {
            assert_eq!(dfa.accepts(&word), nfa.accepts(&word), "word {word:?}");
        }
    }

    #[test]
    fn deterministic_input_is_only_reduced() {
        let mut det = Automaton::new("det", alphabet());
        let p = det.add_state("p", true, true);
        det.add_edge(p, p, 'a');
        let out = det.make_deterministic();
        assert_eq!(out.state_count(), 1);
        assert!(out.state_id("p").is_some());
    }

    #[test]
    fn empty_subset_becomes_sink() {
        // Only 'a' moves anywhere; on 'b' the subset construction reaches
        // the empty set, which is materialized as a looping sink.
        let mut nfa = Automaton::new("a-only", alphabet());
        let q0 = nfa.add_state("q0", true, false);
        let q1 = nfa.add_state("q1", false, true);
        nfa.add_edge(q0, q1, 'a');
        nfa.add_edge(q0, q0, 'a');
        let dfa = nfa.make_deterministic();
        assert!(dfa.is_deterministic());
        assert!(dfa.state_id("empty").is_some());
        for id in dfa.state_ids_sorted() {
            for &c in ['a', 'b'].iter() {
                assert_eq!(dfa.delta(id, c).len(), 1);
            }
        }
        assert!(dfa.accepts("a"));
        assert!(dfa.accepts("aa"));
        assert!(!dfa.accepts("ab"));
    }
}
