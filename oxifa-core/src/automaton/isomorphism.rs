//! Exact isomorphism testing by lazy permutation enumeration.
//!
//! The check is exponential (O(n!)) and intended for small graphs; the
//! permutation iterator yields lazily so an early match short-circuits.
//! Callers are responsible for bounding input sizes.

use super::{Automaton, StateId};
use rustc_hash::{FxHashMap, FxHashSet};

/// Lazy iterator over all permutations of `0..n`, in lexicographic order
/// starting from the identity.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Option<Vec<usize>>,
}

impl Permutations {
    /// Enumerate the permutations of `0..n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            current: Some((0..n).collect()),
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        let mut successor = current.clone();
        if next_permutation(&mut successor) {
            self.current = Some(successor);
        }
        Some(current)
    }
}

/// Advance to the lexicographically next permutation in place. Returns
/// false when the input is already the last (descending) permutation.
fn next_permutation(permutation: &mut [usize]) -> bool {
    let n = permutation.len();
    if n < 2 {
        return false;
    }
    let Some(pivot) = (0..n - 1).rev().find(|&i| permutation[i] < permutation[i + 1]) else {
        return false;
    };
    let swap = (pivot + 1..n)
        .rev()
        .find(|&j| permutation[j] > permutation[pivot])
        .unwrap_or_else(|| unreachable!("pivot has a larger element to its right"));
    permutation.swap(pivot, swap);
    permutation[pivot + 1..].reverse();
    true
}

/// A uniformly random permutation of `0..n` (Fisher-Yates). Used by the
/// test suites only.
#[must_use]
pub fn random_permutation(n: usize) -> Vec<usize> {
    use rand::Rng;
    let mut rng = rand::rng();
    let mut permutation: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        permutation.swap(i, j);
    }
    permutation
}

impl Automaton {
    /// Whether the two automata are isomorphic: identical up to a renaming
    /// of states.
    ///
    /// Cheap preconditions (state, edge, start and final counts, alphabet)
    /// are checked first; then permutations are enumerated until one maps
    /// flags and the whole edge relation of `self` onto `other`.
    #[must_use]
    pub fn isomorphic(&self, other: &Automaton) -> bool {
        if self.state_count() != other.state_count()
            || self.edge_count() != other.edge_count()
            || self.start_states().len() != other.start_states().len()
            || self.final_states().len() != other.final_states().len()
            || self.alphabet() != other.alphabet()
        {
            return false;
        }
        let left_order = self.state_ids_sorted();
        let right_order = other.state_ids_sorted();
        let left_index: FxHashMap<StateId, usize> = left_order
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        let right_index: FxHashMap<StateId, usize> = right_order
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        let left_edges: Vec<(usize, char, usize)> = self
            .edges()
            .map(|(_, e)| (left_index[&e.source], e.symbol, left_index[&e.sink]))
            .collect();
        let right_edges: FxHashSet<(usize, char, usize)> = other
            .edges()
            .map(|(_, e)| (right_index[&e.source], e.symbol, right_index[&e.sink]))
            .collect();

        for permutation in Permutations::new(left_order.len()) {
            let flags_match = left_order.iter().enumerate().all(|(i, &left_id)| {
                let left = self.state(left_id);
                let right = other.state(right_order[permutation[i]]);
                left.start == right.start && left.is_final == right.is_final
            });
            if !flags_match {
                continue;
            }
            let edges_match = left_edges
                .iter()
                .all(|&(u, c, v)| right_edges.contains(&(permutation[u], c, permutation[v])));
            if edges_match {
                return true;
            }
        }
        false
    }
}
