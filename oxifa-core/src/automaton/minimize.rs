//! DFA minimization: Hopcroft's partition refinement and Brzozowski's
//! double reversal.
//!
//! Both algorithms produce a complete minimal DFA for the same language;
//! the test suites cross-check them against each other.

use super::{Automaton, StateId};
use crate::error::Result;
use crate::state_set::StateSet;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Selects the minimization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinimizationAlgorithm {
    /// Hopcroft's partition refinement. The default.
    #[default]
    Hopcroft,
    /// Brzozowski's double reversal. Slower in the worst case but much
    /// simpler; kept as a cross-check.
    Brzozowski,
}

impl Automaton {
    /// Minimize with the default algorithm (Hopcroft).
    pub fn minimize(&self) -> Result<Automaton> {
        self.minimize_hopcroft()
    }

    /// Minimize with an explicit algorithm.
    pub fn minimize_with(&self, algorithm: MinimizationAlgorithm) -> Result<Automaton> {
        match algorithm {
            MinimizationAlgorithm::Hopcroft => self.minimize_hopcroft(),
            MinimizationAlgorithm::Brzozowski => Ok(self.minimize_brzozowski()),
        }
    }

    /// Brzozowski minimization: reverse, determinize, reverse, determinize,
    /// complete.
    #[must_use]
    pub fn minimize_brzozowski(&self) -> Automaton {
        self.reverse()
            .make_deterministic()
            .reverse()
            .make_deterministic()
            .complete()
    }

    /// Hopcroft minimization.
    ///
    /// Pipeline: reduce + determinize, DFS-rename, complete. The partition
    /// starts as {final, non-final} and is refined with a waiting set of
    /// (symbol, splitter) pairs using the smaller-half rule. Partition
    /// classes are then merged into single states.
    pub fn minimize_hopcroft(&self) -> Result<Automaton> {
        let mut dfa = self.make_deterministic();
        dfa.rename_states_dfs()?;
        let dfa = dfa.complete();
        if dfa.state_count() < 2 {
            return Ok(dfa);
        }

        let symbols: Vec<char> = dfa.alphabet().symbols().to_vec();

        // Per-symbol predecessor index: preds[c][q] = { p | q in delta(p, c) }.
        let mut preds: FxHashMap<char, FxHashMap<StateId, FxHashSet<StateId>>> =
            FxHashMap::default();
        for (_, edge) in dfa.edges() {
            preds
                .entry(edge.symbol)
                .or_default()
                .entry(edge.sink)
                .or_default()
                .insert(edge.source);
        }

        let finals: StateSet = dfa.final_states().into_iter().collect();
        let non_finals: StateSet = dfa
            .states()
            .filter(|(_, s)| !s.is_final)
            .map(|(id, _)| id)
            .collect();

        let mut partition: Vec<StateSet> = Vec::new();
        let mut waiting: Vec<(char, StateSet)> = Vec::new();
        if finals.is_empty() || non_finals.is_empty() {
            partition.push(if finals.is_empty() { non_finals } else { finals });
        } else {
            let smaller = if finals.len() <= non_finals.len() {
                finals.clone()
            } else {
                non_finals.clone()
            };
            partition.push(finals);
            partition.push(non_finals);
            for &symbol in &symbols {
                waiting.push((symbol, smaller.clone()));
            }
        }

        while let Some((symbol, splitter)) = waiting.pop() {
            // States whose c-successor lies in the splitter.
            let movers: StateSet = splitter
                .iter()
                .filter_map(|id| preds.get(&symbol).and_then(|by_sink| by_sink.get(&id)))
                .flatten()
                .copied()
                .collect();
            if movers.is_empty() {
                continue;
            }

            let blocks = std::mem::take(&mut partition);
            let mut splits: Vec<(StateSet, StateSet, StateSet)> = Vec::new();
            for block in blocks {
                let inside = block.intersect(&movers);
                if inside.is_empty() || inside.len() == block.len() {
                    partition.push(block);
                    continue;
                }
                let outside = block.difference(&inside);
                partition.push(inside.clone());
                partition.push(outside.clone());
                splits.push((block, inside, outside));
            }

            for (original, inside, outside) in splits {
                for &other_symbol in &symbols {
                    let queued = waiting
                        .iter()
                        .position(|(c, set)| *c == other_symbol && set.equals(&original));
                    match queued {
                        Some(index) => {
                            waiting.remove(index);
                            waiting.push((other_symbol, inside.clone()));
                            waiting.push((other_symbol, outside.clone()));
                        }
                        None => {
                            let smaller = if inside.len() <= outside.len() {
                                inside.clone()
                            } else {
                                outside.clone()
                            };
                            waiting.push((other_symbol, smaller));
                        }
                    }
                }
            }
        }
        debug!(
            states = dfa.state_count(),
            classes = partition.len(),
            "partition refinement settled"
        );

        // Merge each class into a single state; transitions come from an
        // arbitrary representative (any member works in a refined partition).
        partition.sort_by_key(|class| class.canonical_name(&dfa));
        let mut class_of: FxHashMap<StateId, usize> = FxHashMap::default();
        for (index, class) in partition.iter().enumerate() {
            for member in class.iter() {
                class_of.insert(member, index);
            }
        }
        let mut out = Automaton::new(self.name().to_string(), self.alphabet().clone());
        let mut merged: Vec<StateId> = Vec::with_capacity(partition.len());
        for class in &partition {
            let name = class.canonical_name(&dfa);
            let start = class.iter().any(|id| dfa.state(id).start);
            let is_final = class.iter().any(|id| dfa.state(id).is_final);
            merged.push(out.add_state(&name, start, is_final));
        }
        for (index, class) in partition.iter().enumerate() {
            let representative = class
                .iter()
                .min_by_key(|id| &dfa.state(*id).name)
                .unwrap_or_else(|| unreachable!("partition classes are non-empty"));
            for &symbol in &symbols {
                if let Some(&target) = dfa.delta(representative, symbol).iter().next() {
                    out.add_edge(merged[index], merged[class_of[&target]], symbol);
                }
            }
        }
        Ok(out.complete())
    }
}
