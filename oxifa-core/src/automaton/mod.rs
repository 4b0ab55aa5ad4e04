//! The automaton graph and its transition-function index.
//!
//! An [`Automaton`] owns its states and edges exclusively; they are stored
//! in id-keyed maps and referenced through [`StateId`] / [`EdgeId`]
//! newtypes, with adjacency kept as id sets. Every mutation maintains the
//! structural invariants:
//!
//! - state names are unique within the automaton and indexed in the name
//!   map (the empty name is rewritten to the literal `empty`),
//! - every edge is registered in its source's out-set, its sink's in-set,
//!   and the symbol-indexed delta map,
//! - `add_state` / `add_edge` are idempotent on existing entities,
//! - `delete_state` removes all incident edges first.
//!
//! Operations that return a new automaton always produce a freshly owned
//! graph; no state or edge is ever shared between automata.

mod determinize;
pub mod isomorphism;
pub mod minimize;
mod ops;
mod signature;

use crate::alphabet::{Alphabet, Words};
use crate::error::{AutomatonError, Result};
use rustc_hash::{FxHashMap, FxHashSet};

/// Identifier of a state within its owning automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub u32);

/// Identifier of an edge within its owning automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

/// A graph vertex: named, flagged as start and/or final, with adjacency
/// kept as edge-id sets.
#[derive(Debug, Clone)]
pub struct State {
    /// Name, unique within the owning automaton.
    pub name: String,
    /// Whether this is a start state.
    pub start: bool,
    /// Whether this is a final (accepting) state.
    pub is_final: bool,
    pub(crate) edges_out: FxHashSet<EdgeId>,
    pub(crate) edges_in: FxHashSet<EdgeId>,
}

/// A labelled transition between two states of the same automaton.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Source state.
    pub source: StateId,
    /// Sink state.
    pub sink: StateId,
    /// Single-character label.
    pub symbol: char,
}

/// A finite automaton over a finite alphabet.
#[derive(Debug, Clone)]
pub struct Automaton {
    name: String,
    alphabet: Alphabet,
    states: FxHashMap<StateId, State>,
    edges: FxHashMap<EdgeId, Edge>,
    name_map: FxHashMap<String, StateId>,
    delta: FxHashMap<char, FxHashMap<StateId, FxHashSet<StateId>>>,
    next_state: u32,
    next_edge: u32,
}

impl Automaton {
    /// Create an empty automaton (no states, no edges).
    pub fn new(name: impl Into<String>, alphabet: Alphabet) -> Self {
        Self {
            name: name.into(),
            alphabet,
            states: FxHashMap::default(),
            edges: FxHashMap::default(),
            name_map: FxHashMap::default(),
            delta: FxHashMap::default(),
            next_state: 0,
            next_edge: 0,
        }
    }

    /// The automaton's name (used as a prefix in disjoint unions).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the automaton itself (not its states).
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The automaton's alphabet.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of states.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The state with the given id.
    ///
    /// Panics on an id that does not belong to this automaton; ids are only
    /// obtained from the automaton itself.
    #[must_use]
    pub fn state(&self, id: StateId) -> &State {
        &self.states[&id]
    }

    /// The edge with the given id.
    ///
    /// Panics on an id that does not belong to this automaton.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[&id]
    }

    /// Look up a state id by name.
    #[must_use]
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.name_map.get(name).copied()
    }

    /// Iterate over all states in unspecified order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states.iter().map(|(&id, s)| (id, s))
    }

    /// Iterate over all edges in unspecified order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().map(|(&id, e)| (id, e))
    }

    /// All state ids, sorted by state name. The stable order used wherever
    /// iteration must be deterministic.
    #[must_use]
    pub fn state_ids_sorted(&self) -> Vec<StateId> {
        let mut ids: Vec<StateId> = self.states.keys().copied().collect();
        ids.sort_unstable_by(|a, b| self.states[a].name.cmp(&self.states[b].name));
        ids
    }

    /// All edge ids, sorted by (source name, symbol, sink name).
    #[must_use]
    pub fn edge_ids_sorted(&self) -> Vec<EdgeId> {
        let mut ids: Vec<EdgeId> = self.edges.keys().copied().collect();
        ids.sort_unstable_by(|a, b| {
            let ea = &self.edges[a];
            let eb = &self.edges[b];
            let ka = (&self.states[&ea.source].name, ea.symbol, &self.states[&ea.sink].name);
            let kb = (&self.states[&eb.source].name, eb.symbol, &self.states[&eb.sink].name);
            ka.cmp(&kb)
        });
        ids
    }

    /// Out-edges of a state, sorted by (symbol, sink name).
    #[must_use]
    pub fn edges_out(&self, id: StateId) -> Vec<EdgeId> {
        let mut ids: Vec<EdgeId> = self.states[&id].edges_out.iter().copied().collect();
        ids.sort_unstable_by(|a, b| {
            let ea = &self.edges[a];
            let eb = &self.edges[b];
            (ea.symbol, &self.states[&ea.sink].name).cmp(&(eb.symbol, &self.states[&eb.sink].name))
        });
        ids
    }

    /// In-edges of a state, sorted by (symbol, source name).
    #[must_use]
    pub fn edges_in(&self, id: StateId) -> Vec<EdgeId> {
        let mut ids: Vec<EdgeId> = self.states[&id].edges_in.iter().copied().collect();
        ids.sort_unstable_by(|a, b| {
            let ea = &self.edges[a];
            let eb = &self.edges[b];
            (ea.symbol, &self.states[&ea.source].name)
                .cmp(&(eb.symbol, &self.states[&eb.source].name))
        });
        ids
    }

    /// Start states, sorted by name.
    #[must_use]
    pub fn start_states(&self) -> Vec<StateId> {
        let mut ids: Vec<StateId> = self
            .states
            .iter()
            .filter(|(_, s)| s.start)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable_by(|a, b| self.states[a].name.cmp(&self.states[b].name));
        ids
    }

    /// Final states, sorted by name.
    #[must_use]
    pub fn final_states(&self) -> Vec<StateId> {
        let mut ids: Vec<StateId> = self
            .states
            .iter()
            .filter(|(_, s)| s.is_final)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable_by(|a, b| self.states[a].name.cmp(&self.states[b].name));
        ids
    }

    /// Add a state, or return the existing state of the same name.
    ///
    /// The empty name is rewritten to the literal `empty`. When the name is
    /// already taken the existing state is returned unchanged; the `start`
    /// and `is_final` arguments apply only to a freshly created state.
    pub fn add_state(&mut self, name: &str, start: bool, is_final: bool) -> StateId {
        let name = normalize_name(name);
        if let Some(&id) = self.name_map.get(&name) {
            return id;
        }
        self.insert_state(name, start, is_final)
    }

    /// Add a state under a name guaranteed to be fresh: if the requested
    /// name is taken, `x` is appended until it is unique.
    pub fn add_state_force_new(&mut self, name: &str, start: bool, is_final: bool) -> StateId {
        let mut name = normalize_name(name);
        while self.name_map.contains_key(&name) {
            name.push('x');
        }
        self.insert_state(name, start, is_final)
    }

    fn insert_state(&mut self, name: String, start: bool, is_final: bool) -> StateId {
        let id = StateId(self.next_state);
        self.next_state += 1;
        self.name_map.insert(name.clone(), id);
        self.states.insert(
            id,
            State {
                name,
                start,
                is_final,
                edges_out: FxHashSet::default(),
                edges_in: FxHashSet::default(),
            },
        );
        id
    }

    /// Set or clear the start flag of a state.
    pub fn set_start(&mut self, id: StateId, start: bool) {
        if let Some(state) = self.states.get_mut(&id) {
            state.start = start;
        }
    }

    /// Set or clear the final flag of a state.
    pub fn set_final(&mut self, id: StateId, is_final: bool) {
        if let Some(state) = self.states.get_mut(&id) {
            state.is_final = is_final;
        }
    }

    /// Delete a state, removing all incident edges first.
    pub fn delete_state(&mut self, id: StateId) {
        let Some(state) = self.states.get(&id) else {
            return;
        };
        let incident: Vec<EdgeId> = state
            .edges_out
            .iter()
            .chain(state.edges_in.iter())
            .copied()
            .collect();
        for edge in incident {
            self.delete_edge(edge);
        }
        if let Some(state) = self.states.remove(&id) {
            self.name_map.remove(&state.name);
        }
    }

    /// Add an edge, or return the existing edge with the same
    /// (source, sink, symbol) triple.
    pub fn add_edge(&mut self, from: StateId, to: StateId, symbol: char) -> EdgeId {
        if let Some(existing) = self.get_edge(from, to, symbol) {
            return existing;
        }
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.edges.insert(
            id,
            Edge {
                source: from,
                sink: to,
                symbol,
            },
        );
        if let Some(state) = self.states.get_mut(&from) {
            state.edges_out.insert(id);
        }
        if let Some(state) = self.states.get_mut(&to) {
            state.edges_in.insert(id);
        }
        self.delta
            .entry(symbol)
            .or_default()
            .entry(from)
            .or_default()
            .insert(to);
        id
    }

    /// Find the edge with the given (source, sink, symbol) triple by
    /// scanning the source's out-edges.
    #[must_use]
    pub fn get_edge(&self, from: StateId, to: StateId, symbol: char) -> Option<EdgeId> {
        let state = self.states.get(&from)?;
        state.edges_out.iter().copied().find(|id| {
            let edge = &self.edges[id];
            edge.sink == to && edge.symbol == symbol
        })
    }

    /// Delete an edge, unregistering it from both adjacency sets and the
    /// delta map.
    pub fn delete_edge(&mut self, id: EdgeId) {
        let Some(edge) = self.edges.remove(&id) else {
            return;
        };
        if let Some(state) = self.states.get_mut(&edge.source) {
            state.edges_out.remove(&id);
        }
        if let Some(state) = self.states.get_mut(&edge.sink) {
            state.edges_in.remove(&id);
        }
        if let Some(by_source) = self.delta.get_mut(&edge.symbol) {
            if let Some(sinks) = by_source.get_mut(&edge.source) {
                sinks.remove(&edge.sink);
                if sinks.is_empty() {
                    by_source.remove(&edge.source);
                }
            }
            if by_source.is_empty() {
                self.delta.remove(&edge.symbol);
            }
        }
    }

    /// Image of a state under the transition relation for one symbol.
    #[must_use]
    pub fn delta(&self, state: StateId, symbol: char) -> FxHashSet<StateId> {
        self.delta
            .get(&symbol)
            .and_then(|by_source| by_source.get(&state))
            .cloned()
            .unwrap_or_default()
    }

    /// Image of a state under the transition relation over all alphabet
    /// symbols.
    #[must_use]
    pub fn delta_any(&self, state: StateId) -> FxHashSet<StateId> {
        let mut image = FxHashSet::default();
        for &symbol in self.alphabet.symbols() {
            image.extend(self.delta(state, symbol));
        }
        image
    }

    /// Image of a set of states under one symbol.
    #[must_use]
    pub fn delta_set(&self, states: &FxHashSet<StateId>, symbol: char) -> FxHashSet<StateId> {
        let mut image = FxHashSet::default();
        for &state in states {
            image.extend(self.delta(state, symbol));
        }
        image
    }

    /// Iterated transition over a word. Returns early with the empty set as
    /// soon as the frontier empties.
    #[must_use]
    pub fn delta_star(&self, states: &FxHashSet<StateId>, word: &str) -> FxHashSet<StateId> {
        let mut current = states.clone();
        for symbol in word.chars() {
            if current.is_empty() {
                return current;
            }
            current = self.delta_set(&current, symbol);
        }
        current
    }

    /// Whether the automaton accepts `word`. False on an automaton with no
    /// states.
    #[must_use]
    pub fn accepts(&self, word: &str) -> bool {
        if self.states.is_empty() {
            return false;
        }
        let starts: FxHashSet<StateId> = self.start_states().into_iter().collect();
        self.delta_star(&starts, word)
            .iter()
            .any(|id| self.states[id].is_final)
    }

    /// Rename all states positionally: the i-th state in name-sorted order
    /// receives `names[i]`.
    ///
    /// Errors when the name count differs from the state count or the new
    /// names are not pairwise distinct (after empty names are rewritten to
    /// `empty`).
    pub fn rename_states(&mut self, names: &[String]) -> Result<()> {
        let order = self.state_ids_sorted();
        let assignment: Vec<(StateId, String)> = order
            .into_iter()
            .zip(names.iter().map(|n| normalize_name(n)))
            .collect();
        if assignment.len() != self.states.len() || names.len() != self.states.len() {
            return Err(AutomatonError::InvalidArgument(format!(
                "rename_states: got {} names for {} states",
                names.len(),
                self.states.len()
            )));
        }
        self.apply_names(&assignment)
    }

    /// Apply a full name assignment. Shared by positional and DFS renaming.
    pub(crate) fn apply_names(&mut self, assignment: &[(StateId, String)]) -> Result<()> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for (_, name) in assignment {
            if !seen.insert(name.as_str()) {
                return Err(AutomatonError::InvalidArgument(format!(
                    "rename_states: duplicate name '{name}'"
                )));
            }
        }
        self.name_map.clear();
        for (id, name) in assignment {
            if let Some(state) = self.states.get_mut(id) {
                state.name.clone_from(name);
            }
            self.name_map.insert(name.clone(), *id);
        }
        Ok(())
    }

    /// Words of length at most `max_len` accepted by the automaton, in
    /// length-lexicographic order.
    #[must_use]
    pub fn accepted_words(&self, max_len: usize) -> AcceptedWords<'_> {
        AcceptedWords {
            automaton: self,
            words: self.alphabet.words(max_len),
        }
    }

    /// The first accepted word of length at most `max_len`, if any.
    #[must_use]
    pub fn first_accepted_word(&self, max_len: usize) -> Option<String> {
        self.accepted_words(max_len).next()
    }
}

/// Iterator over the accepted words of an automaton, shortest first.
#[derive(Debug)]
pub struct AcceptedWords<'a> {
    automaton: &'a Automaton,
    words: Words,
}

impl Iterator for AcceptedWords<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.words
            .by_ref()
            .find(|word| self.automaton.accepts(word))
    }
}

fn normalize_name(name: &str) -> String {
    if name.is_empty() {
        "empty".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> Alphabet {
        Alphabet::new("ab").unwrap()
    }

    /// q0 --a--> q1 --b--> q2(final), with q0 the start.
    fn chain_ab() -> Automaton {
        let mut a = Automaton::new("chain", alphabet());
        let q0 = a.add_state("q0", true, false);
        let q1 = a.add_state("q1", false, false);
        let q2 = a.add_state("q2", false, true);
        a.add_edge(q0, q1, 'a');
        a.add_edge(q1, q2, 'b');
        a
    }

    #[test]
    fn add_state_is_idempotent() {
        let mut a = Automaton::new("t", alphabet());
        let first = a.add_state("q", true, false);
        let second = a.add_state("q", false, true);
        assert_eq!(first, second);
        assert_eq!(a.state_count(), 1);
        // Flags of the existing state are untouched.
        assert!(a.state(first).start);
        assert!(!a.state(first).is_final);
    }

    #[test]
    fn force_new_appends_x() {
        let mut a = Automaton::new("t", alphabet());
        a.add_state("q", false, false);
        let fresh = a.add_state_force_new("q", false, false);
        assert_eq!(a.state(fresh).name, "qx");
        let fresher = a.add_state_force_new("q", false, false);
        assert_eq!(a.state(fresher).name, "qxx");
    }

    #[test]
    fn empty_name_becomes_empty() {
        let mut a = Automaton::new("t", alphabet());
        let id = a.add_state("", false, false);
        assert_eq!(a.state(id).name, "empty");
        assert_eq!(a.state_id("empty"), Some(id));
    }

    #[test]
    fn add_edge_dedupes() {
        let mut a = Automaton::new("t", alphabet());
        let p = a.add_state("p", true, false);
        let q = a.add_state("q", false, true);
        let first = a.add_edge(p, q, 'a');
        let second = a.add_edge(p, q, 'a');
        assert_eq!(first, second);
        assert_eq!(a.edge_count(), 1);
        assert_ne!(a.add_edge(p, q, 'b'), first);
    }

    #[test]
    fn delete_state_removes_incident_edges() {
        let mut a = chain_ab();
        let q1 = a.state_id("q1").unwrap();
        a.delete_state(q1);
        assert_eq!(a.state_count(), 2);
        assert_eq!(a.edge_count(), 0);
        let q0 = a.state_id("q0").unwrap();
        assert!(a.delta(q0, 'a').is_empty());
    }

    #[test]
    fn delta_star_walks_words() {
        let a = chain_ab();
        let q0 = a.state_id("q0").unwrap();
        let q2 = a.state_id("q2").unwrap();
        let start: FxHashSet<StateId> = [q0].into_iter().collect();
        assert_eq!(a.delta_star(&start, "ab"), [q2].into_iter().collect());
        assert!(a.delta_star(&start, "ba").is_empty());
        assert!(a.delta_star(&start, "abab").is_empty());
    }

    #[test]
    fn accepts_basics() {
        let a = chain_ab();
        assert!(a.accepts("ab"));
        assert!(!a.accepts("a"));
        assert!(!a.accepts(""));
        let empty = Automaton::new("none", alphabet());
        assert!(!empty.accepts(""));
    }

    #[test]
    fn rename_states_validates_count() {
        let mut a = chain_ab();
        assert!(a.rename_states(&["x".into()]).is_err());
        assert!(a
            .rename_states(&["x".into(), "y".into(), "x".into()])
            .is_err());
        a.rename_states(&["x".into(), "y".into(), "z".into()])
            .unwrap();
        assert!(a.state_id("x").is_some());
        assert!(a.state_id("q0").is_none());
        assert!(a.accepts("ab"));
    }

    #[test]
    fn accepted_words_in_order() {
        let a = chain_ab();
        let words: Vec<String> = a.accepted_words(4).collect();
        assert_eq!(words, vec!["ab"]);
        assert_eq!(a.first_accepted_word(4), Some("ab".to_string()));
        assert_eq!(a.first_accepted_word(1), None);
    }
}
