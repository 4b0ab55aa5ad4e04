//! Closure of automata under the regular operations.
//!
//! Every operation builds a freshly owned result; the operands are never
//! mutated. Disjoint unions prefix state names with the owning automaton's
//! name so the two halves cannot collide.

use super::{Automaton, StateId};
use crate::state_set::StateSet;
use rustc_hash::FxHashMap;
use tracing::debug;

impl Automaton {
    /// Union: accepts the words of either operand.
    ///
    /// Disjoint union of the two graphs with names prefixed
    /// `automaton:state`; start and final flags are preserved on both
    /// halves.
    #[must_use]
    pub fn union(&self, other: &Automaton) -> Automaton {
        let mut out = Automaton::new(
            format!("({}+{})", self.name, other.name),
            self.alphabet.clone(),
        );
        let (left_prefix, right_prefix) = disjoint_prefixes(self, other);
        copy_into(&mut out, self, &left_prefix, true, true);
        copy_into(&mut out, other, &right_prefix, true, true);
        out
    }

    /// Concatenation: accepts `uv` where the left operand accepts `u` and
    /// the right operand accepts `v`.
    ///
    /// Disjoint union with final flags cleared on the left half and start
    /// flags cleared on the right half; every left final mirrors the
    /// out-edges of every right start. Nullable operands are handled by
    /// unioning with copies (no epsilon edges are introduced).
    #[must_use]
    pub fn concat(&self, other: &Automaton) -> Automaton {
        let mut out = Automaton::new(
            format!("({}.{})", self.name, other.name),
            self.alphabet.clone(),
        );
        let (left_prefix, right_prefix) = disjoint_prefixes(self, other);
        let left_map = copy_into(&mut out, self, &left_prefix, true, false);
        let right_map = copy_into(&mut out, other, &right_prefix, false, true);

        for &left_final in &self.final_states() {
            for &right_start in &other.start_states() {
                for edge_id in other.edges_out(right_start) {
                    let edge = other.edge(edge_id);
                    out.add_edge(left_map[&left_final], right_map[&edge.sink], edge.symbol);
                }
            }
        }

        let left_nullable = self.accepts("");
        let right_nullable = other.accepts("");
        let mut result = out;
        if left_nullable {
            result = result.union(other);
        }
        if right_nullable {
            result = result.union(self);
        }
        if left_nullable && right_nullable {
            let mut epsilon = Automaton::new("epsilon", self.alphabet.clone());
            epsilon.add_state("startfinal", true, true);
            result = result.union(&epsilon);
        }
        result
    }

    /// Kleene star: accepts every finite concatenation of accepted words,
    /// including the empty word.
    ///
    /// A fresh `startfinal` state replaces the old start/final flags; the
    /// old starts' out-edges and old finals' in-edges are mirrored onto it,
    /// and the result is reduced.
    #[must_use]
    pub fn star(&self) -> Automaton {
        let mut out = self.clone();
        out.set_name(format!("({})*", self.name));
        let old_starts: StateSet = out.start_states().into_iter().collect();
        let old_finals: StateSet = out.final_states().into_iter().collect();
        for id in old_starts.iter() {
            out.set_start(id, false);
        }
        for id in old_finals.iter() {
            out.set_final(id, false);
        }
        let hub = out.add_state_force_new("startfinal", true, true);

        // Three passes over the original edge set: start out-edges move to
        // the hub, final in-edges move to the hub, and edges from a start
        // to a final become hub self-loops.
        let snapshot: Vec<(StateId, StateId, char)> = self
            .edge_ids_sorted()
            .into_iter()
            .map(|id| {
                let edge = self.edge(id);
                (edge.source, edge.sink, edge.symbol)
            })
            .collect();
        for &(source, sink, symbol) in &snapshot {
            if old_starts.contains(source) {
                out.add_edge(hub, sink, symbol);
            }
            if old_finals.contains(sink) {
                out.add_edge(source, hub, symbol);
            }
            if old_starts.contains(source) && old_finals.contains(sink) {
                out.add_edge(hub, hub, symbol);
            }
        }
        out.reduce()
    }

    /// Reversal: every edge flipped, start and final flags swapped.
    #[must_use]
    pub fn reverse(&self) -> Automaton {
        let mut out = Automaton::new(format!("rev({})", self.name), self.alphabet.clone());
        let mut map: FxHashMap<StateId, StateId> = FxHashMap::default();
        for id in self.state_ids_sorted() {
            let state = self.state(id);
            let new_id = out.add_state(&state.name, state.is_final, state.start);
            map.insert(id, new_id);
        }
        for id in self.edge_ids_sorted() {
            let edge = self.edge(id);
            out.add_edge(map[&edge.sink], map[&edge.source], edge.symbol);
        }
        out
    }

    /// Reduction: keep only states that are reachable from some start state
    /// and co-reachable from some final state, and the edges between them.
    #[must_use]
    pub fn reduce(&self) -> Automaton {
        let forward = self.mark_forward();
        let backward = self.mark_backward();
        let mut out = Automaton::new(self.name.clone(), self.alphabet.clone());
        let mut map: FxHashMap<StateId, StateId> = FxHashMap::default();
        for id in self.state_ids_sorted() {
            if forward.contains(id) && backward.contains(id) {
                let state = self.state(id);
                let new_id = out.add_state(&state.name, state.start, state.is_final);
                map.insert(id, new_id);
            }
        }
        for id in self.edge_ids_sorted() {
            let edge = self.edge(id);
            if let (Some(&source), Some(&sink)) = (map.get(&edge.source), map.get(&edge.sink)) {
                out.add_edge(source, sink, edge.symbol);
            }
        }
        out
    }

    /// Completion: make `delta(state, symbol)` non-empty for every state
    /// and symbol.
    ///
    /// Reduces first; any missing transitions are redirected to a single
    /// fresh error state that loops on every symbol. An automaton with no
    /// states completes to a single looping start state (the completed
    /// empty-language automaton).
    #[must_use]
    pub fn complete(&self) -> Automaton {
        let mut out = self.reduce();
        let symbols: Vec<char> = out.alphabet.symbols().to_vec();
        if out.state_count() == 0 {
            let sink = out.add_state("error", true, false);
            for &symbol in &symbols {
                out.add_edge(sink, sink, symbol);
            }
            return out;
        }
        let mut missing: Vec<(StateId, char)> = Vec::new();
        for id in out.state_ids_sorted() {
            for &symbol in &symbols {
                if out.delta(id, symbol).is_empty() {
                    missing.push((id, symbol));
                }
            }
        }
        if missing.is_empty() {
            return out;
        }
        let sink = out.add_state_force_new("error", false, false);
        for &symbol in &symbols {
            out.add_edge(sink, sink, symbol);
        }
        for (id, symbol) in missing {
            out.add_edge(id, sink, symbol);
        }
        out
    }

    /// Complement: minimize, complete, then flip every final flag.
    pub fn complement(&self) -> crate::error::Result<Automaton> {
        let mut out = self.minimize()?.complete();
        for id in out.state_ids_sorted() {
            let flipped = !out.state(id).is_final;
            out.set_final(id, flipped);
        }
        out.set_name(format!("not({})", self.name));
        Ok(out)
    }

    /// Intersection by product construction.
    ///
    /// States are pairs: a pair is start iff both halves are start, final
    /// iff both are final, and moves on a symbol iff both halves do. No
    /// reduction is performed; callers may follow with minimization.
    #[must_use]
    pub fn intersect(&self, other: &Automaton) -> Automaton {
        let mut out = Automaton::new(
            format!("({}&{})", self.name, other.name),
            self.alphabet.clone(),
        );
        let mut pairs: FxHashMap<(StateId, StateId), StateId> = FxHashMap::default();
        for left_id in self.state_ids_sorted() {
            let left = self.state(left_id);
            for right_id in other.state_ids_sorted() {
                let right = other.state(right_id);
                let id = out.add_state_force_new(
                    &format!("{},{}", left.name, right.name),
                    left.start && right.start,
                    left.is_final && right.is_final,
                );
                pairs.insert((left_id, right_id), id);
            }
        }
        for left_edge_id in self.edge_ids_sorted() {
            let left_edge = self.edge(left_edge_id);
            for right_edge_id in other.edge_ids_sorted() {
                let right_edge = other.edge(right_edge_id);
                if left_edge.symbol == right_edge.symbol {
                    out.add_edge(
                        pairs[&(left_edge.source, right_edge.source)],
                        pairs[&(left_edge.sink, right_edge.sink)],
                        left_edge.symbol,
                    );
                }
            }
        }
        debug!(
            left = self.state_count(),
            right = other.state_count(),
            product = out.state_count(),
            "product construction"
        );
        out
    }

    /// Difference: words accepted by `self` but not by `other`.
    pub fn difference(&self, other: &Automaton) -> crate::error::Result<Automaton> {
        Ok(self.intersect(&other.complement()?))
    }

    fn mark_forward(&self) -> StateSet {
        let mut marked = StateSet::new();
        let mut stack: Vec<StateId> = self.start_states();
        while let Some(id) = stack.pop() {
            if !marked.insert(id) {
                continue;
            }
            for edge_id in &self.states[&id].edges_out {
                stack.push(self.edges[edge_id].sink);
            }
        }
        marked
    }

    fn mark_backward(&self) -> StateSet {
        let mut marked = StateSet::new();
        let mut stack: Vec<StateId> = self.final_states();
        while let Some(id) = stack.pop() {
            if !marked.insert(id) {
                continue;
            }
            for edge_id in &self.states[&id].edges_in {
                stack.push(self.edges[edge_id].source);
            }
        }
        marked
    }
}

/// Disjoint-union prefixes for the two operands. When both operands carry
/// the same automaton name the right prefix is uniquified with a trailing
/// `x` so the halves stay disjoint.
fn disjoint_prefixes(left: &Automaton, right: &Automaton) -> (String, String) {
    let left_prefix = left.name().to_string();
    let mut right_prefix = right.name().to_string();
    if right_prefix == left_prefix {
        right_prefix.push('x');
    }
    (left_prefix, right_prefix)
}

/// Copy `source` into `out` with every state name prefixed
/// `prefix:name`, optionally preserving start/final flags. Returns the
/// old-id to new-id mapping.
fn copy_into(
    out: &mut Automaton,
    source: &Automaton,
    prefix: &str,
    keep_start: bool,
    keep_final: bool,
) -> FxHashMap<StateId, StateId> {
    let mut map: FxHashMap<StateId, StateId> = FxHashMap::default();
    for id in source.state_ids_sorted() {
        let state = source.state(id);
        let new_id = out.add_state_force_new(
            &format!("{prefix}:{}", state.name),
            keep_start && state.start,
            keep_final && state.is_final,
        );
        map.insert(id, new_id);
    }
    for id in source.edge_ids_sorted() {
        let edge = source.edge(id);
        out.add_edge(map[&edge.source], map[&edge.sink], edge.symbol);
    }
    map
}

#[cfg(test)]
mod tests {
    use crate::alphabet::Alphabet;
    use crate::automaton::Automaton;

    fn alphabet() -> Alphabet {
        Alphabet::new("ab").unwrap()
    }

    /// Automaton accepting exactly `word`.
    fn only(word: &str) -> Automaton {
        let mut a = Automaton::new(format!("only-{word}"), alphabet());
        let mut prev = a.add_state("q0", true, word.is_empty());
        for (i, c) in word.chars().enumerate() {
            let next = a.add_state(&format!("q{}", i + 1), false, i + 1 == word.chars().count());
            a.add_edge(prev, next, c);
            prev = next;
        }
        a
    }

    #[test]
    fn union_accepts_either() {
        let u = only("ab").union(&only("ba"));
        assert!(u.accepts("ab"));
        assert!(u.accepts("ba"));
        assert!(!u.accepts("aa"));
        assert!(!u.accepts(""));
    }

    #[test]
    fn union_of_same_named_operands_stays_disjoint() {
        let a = only("a");
        let u = a.union(&a);
        assert_eq!(u.state_count(), 4);
        assert!(u.accepts("a"));
        assert!(!u.accepts("aa"));
    }

    #[test]
    fn concat_splices_words() {
        let c = only("a").concat(&only("b"));
        assert!(c.accepts("ab"));
        assert!(!c.accepts("a"));
        assert!(!c.accepts("b"));
        assert!(!c.accepts("ba"));
    }

    #[test]
    fn concat_with_nullable_operands() {
        let left = only("a").union(&only(""));
        let c = left.concat(&only("b"));
        assert!(c.accepts("ab"));
        assert!(c.accepts("b"));
        assert!(!c.accepts("a"));

        let right = only("b").union(&only(""));
        let c = only("a").concat(&right);
        assert!(c.accepts("ab"));
        assert!(c.accepts("a"));
        assert!(!c.accepts("b"));

        let both = left.concat(&right);
        assert!(both.accepts(""));
        assert!(both.accepts("a"));
        assert!(both.accepts("b"));
        assert!(both.accepts("ab"));
        assert!(!both.accepts("ba"));
    }

    #[test]
    fn star_accepts_repetitions() {
        let s = only("ab").star();
        assert!(s.accepts(""));
        assert!(s.accepts("ab"));
        assert!(s.accepts("abab"));
        assert!(s.accepts("ababab"));
        assert!(!s.accepts("a"));
        assert!(!s.accepts("aba"));
    }

    #[test]
    fn star_of_single_symbol() {
        let s = only("a").star();
        assert!(s.accepts(""));
        assert!(s.accepts("a"));
        assert!(s.accepts("aaaa"));
        assert!(!s.accepts("b"));
    }

    #[test]
    fn reverse_mirrors_language() {
        let r = only("ab").reverse();
        assert!(r.accepts("ba"));
        assert!(!r.accepts("ab"));
    }

    #[test]
    fn reduce_drops_unreachable_and_dead_states() {
        let mut a = only("ab");
        let orphan = a.add_state("orphan", false, false);
        let dead = a.add_state("dead", false, false);
        let q0 = a.state_id("q0").unwrap();
        a.add_edge(q0, dead, 'b');
        a.add_edge(orphan, q0, 'a');
        let reduced = a.reduce();
        assert_eq!(reduced.state_count(), 3);
        assert!(reduced.state_id("orphan").is_none());
        assert!(reduced.state_id("dead").is_none());
        assert!(reduced.accepts("ab"));
    }

    #[test]
    fn complete_adds_single_error_sink() {
        let completed = only("ab").complete();
        // q0, q1, q2 plus the error sink.
        assert_eq!(completed.state_count(), 4);
        for id in completed.state_ids_sorted() {
            for &c in ['a', 'b'].iter() {
                assert_eq!(completed.delta(id, c).len(), 1);
            }
        }
        assert!(completed.accepts("ab"));
        assert!(!completed.accepts("abb"));
    }

    #[test]
    fn complete_empty_automaton() {
        let completed = Automaton::new("none", alphabet()).complete();
        assert_eq!(completed.state_count(), 1);
        assert!(!completed.accepts(""));
        assert!(!completed.accepts("ab"));
    }

    #[test]
    fn complement_flips_membership() {
        let c = only("ab").complement().unwrap();
        assert!(!c.accepts("ab"));
        assert!(c.accepts(""));
        assert!(c.accepts("a"));
        assert!(c.accepts("ba"));
        assert!(c.accepts("abb"));
    }

    #[test]
    fn intersect_requires_both() {
        let ends_b = only("ab").union(&only("bb"));
        let starts_a = only("ab").union(&only("aa"));
        let i = ends_b.intersect(&starts_a);
        assert!(i.accepts("ab"));
        assert!(!i.accepts("bb"));
        assert!(!i.accepts("aa"));
    }

    #[test]
    fn difference_subtracts() {
        let either = only("ab").union(&only("ba"));
        let d = either.difference(&only("ba")).unwrap();
        assert!(d.accepts("ab"));
        assert!(!d.accepts("ba"));
    }
}
