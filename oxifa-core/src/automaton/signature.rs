//! DFS renaming and the canonical signature codec.
//!
//! The signature of a deterministic automaton is `T|F|S`: the transition
//! table in DFS order (fixed-width Base62 successor names, `-` for a
//! missing transition), the finality bitstring, and the alphabet's symbol
//! string. Equality of signatures on minimal DFAs equals equality of
//! languages.

use super::{Automaton, StateId};
use crate::alphabet::Alphabet;
use crate::base62::{digit_width, from_base62, to_base62_padded};
use crate::error::{AutomatonError, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

impl Automaton {
    /// Number the states by DFS from the start, visiting out-edges in
    /// ascending symbol order (ties broken by sink name). States the DFS
    /// never reaches are appended in name order.
    ///
    /// Errors when the automaton has no start state.
    pub fn number_states_dfs(&self) -> Result<Vec<StateId>> {
        let starts = self.start_states();
        if starts.is_empty() {
            return Err(AutomatonError::NoStartState);
        }
        let mut order: Vec<StateId> = Vec::with_capacity(self.state_count());
        let mut visited: FxHashSet<StateId> = FxHashSet::default();
        for &start in &starts {
            let mut stack = vec![start];
            while let Some(id) = stack.pop() {
                if !visited.insert(id) {
                    continue;
                }
                order.push(id);
                // Push children in reverse so the smallest symbol is
                // visited first.
                let children: SmallVec<[StateId; 8]> = self
                    .edges_out(id)
                    .into_iter()
                    .map(|edge_id| self.edge(edge_id).sink)
                    .collect();
                for &child in children.iter().rev() {
                    if !visited.contains(&child) {
                        stack.push(child);
                    }
                }
            }
        }
        for id in self.state_ids_sorted() {
            if !visited.contains(&id) {
                order.push(id);
            }
        }
        Ok(order)
    }

    /// Rename every state to its fixed-width Base62 DFS number.
    ///
    /// Yields a canonical numbering for any deterministic automaton
    /// reachable from its start. Errors when there is no start state.
    pub fn rename_states_dfs(&mut self) -> Result<()> {
        let order = self.number_states_dfs()?;
        let width = digit_width(self.state_count());
        let assignment: Vec<(StateId, String)> = order
            .into_iter()
            .enumerate()
            .map(|(index, id)| (id, to_base62_padded(index, width)))
            .collect();
        self.apply_names(&assignment)
    }

    /// The canonical signature, computed by renaming a copy via
    /// [`Automaton::rename_states_dfs`] and reading the table off the new
    /// names.
    ///
    /// Defined only for deterministic automata.
    pub fn signature_dfs(&self) -> Result<String> {
        if !self.is_deterministic() {
            return Err(AutomatonError::NotDeterministic(self.name.clone()));
        }
        let mut renamed = self.clone();
        renamed.rename_states_dfs()?;
        // Fixed-width names sort lexicographically in DFS order.
        let order = renamed.state_ids_sorted();
        let index: FxHashMap<StateId, usize> =
            order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Ok(renamed.signature_for_order(&order, &index))
    }

    /// The canonical signature computed from the DFS numbering alone,
    /// without materializing renamed states. Always equal to
    /// [`Automaton::signature_dfs`].
    pub fn signature_numbered_dfs(&self) -> Result<String> {
        if !self.is_deterministic() {
            return Err(AutomatonError::NotDeterministic(self.name.clone()));
        }
        let order = self.number_states_dfs()?;
        let index: FxHashMap<StateId, usize> =
            order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Ok(self.signature_for_order(&order, &index))
    }

    fn signature_for_order(
        &self,
        order: &[StateId],
        index: &FxHashMap<StateId, usize>,
    ) -> String {
        let width = digit_width(self.state_count());
        let mut transitions = String::new();
        let mut finality = String::new();
        for &id in order {
            for &symbol in self.alphabet.symbols() {
                let successors = self.delta(id, symbol);
                match successors.iter().next() {
                    Some(&target) => {
                        transitions.push_str(&to_base62_padded(index[&target], width));
                    }
                    None => transitions.push('-'),
                }
            }
            finality.push(if self.state(id).is_final { '1' } else { '0' });
        }
        format!("{}|{}|{}", transitions, finality, self.alphabet)
    }

    /// Rebuild an automaton from a signature produced by
    /// [`Automaton::signature_dfs`].
    ///
    /// Errors on a wrong part count, an empty part, a malformed finality or
    /// alphabet part, or a transitions part whose digits do not tile into
    /// exactly one slot per state and symbol.
    pub fn from_signature(signature: &str) -> Result<Automaton> {
        let parts: Vec<&str> = signature.split('|').collect();
        if parts.len() != 3 {
            return Err(AutomatonError::Signature(format!(
                "expected three '|'-separated parts, got {}",
                parts.len()
            )));
        }
        if parts.iter().any(|p| p.is_empty()) {
            return Err(AutomatonError::Signature("empty part".to_string()));
        }
        let (transitions, finality, symbols) = (parts[0], parts[1], parts[2]);

        if let Some(bad) = finality.chars().find(|c| *c != '0' && *c != '1') {
            return Err(AutomatonError::Signature(format!(
                "finality part contains '{bad}'"
            )));
        }
        let state_count = finality.chars().count();
        let alphabet = Alphabet::new(symbols)
            .map_err(|e| AutomatonError::Signature(format!("alphabet part: {e}")))?;
        let width = digit_width(state_count);

        let chars: Vec<char> = transitions.chars().collect();
        let slots = state_count * alphabet.len();
        let mut targets: Vec<Option<usize>> = Vec::with_capacity(slots);
        let mut cursor = 0;
        for _ in 0..slots {
            if cursor >= chars.len() {
                return Err(AutomatonError::Signature(
                    "transitions part too short".to_string(),
                ));
            }
            if chars[cursor] == '-' {
                targets.push(None);
                cursor += 1;
            } else {
                if cursor + width > chars.len() {
                    return Err(AutomatonError::Signature(
                        "transitions part too short".to_string(),
                    ));
                }
                let digits: String = chars[cursor..cursor + width].iter().collect();
                let target = from_base62(&digits)?;
                if target >= state_count {
                    return Err(AutomatonError::Signature(format!(
                        "state index {target} out of range"
                    )));
                }
                targets.push(Some(target));
                cursor += width;
            }
        }
        if cursor != chars.len() {
            return Err(AutomatonError::Signature(
                "transitions part too long".to_string(),
            ));
        }

        let mut out = Automaton::new("from-signature", alphabet.clone());
        let ids: Vec<StateId> = finality
            .chars()
            .enumerate()
            .map(|(i, flag)| {
                out.add_state(&to_base62_padded(i, width), i == 0, flag == '1')
            })
            .collect();
        for (slot, target) in targets.into_iter().enumerate() {
            if let Some(target) = target {
                let state = slot / alphabet.len();
                let symbol = alphabet.symbols()[slot % alphabet.len()];
                out.add_edge(ids[state], ids[target], symbol);
            }
        }
        Ok(out)
    }

    /// Language equivalence: equality of minimized signatures.
    pub fn equivalent(&self, other: &Automaton) -> Result<bool> {
        Ok(self.minimize()?.signature_dfs()? == other.minimize()?.signature_dfs()?)
    }
}
