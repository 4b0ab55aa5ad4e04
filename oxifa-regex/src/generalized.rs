//! Generalized automata: regex-labelled edges and state elimination.
//!
//! A generalized automaton wraps a core automaton whose edges all carry the
//! same placeholder symbol; the real label of an edge is a regular
//! expression kept alongside. Because the placeholder makes "equal
//! endpoints" the identity of an edge, parallel labels collapse into one
//! edge by summing, so there is at most one generalized edge per ordered
//! endpoint pair.
//!
//! State elimination removes internal states one at a time, rerouting each
//! in/out pair around the removed state (with a starred self-loop in the
//! middle when one exists), until only the two boundary states remain. The
//! label of the surviving edge is a regex for the original automaton's
//! language.

use crate::error::Result;
use crate::syntax::RegularExpression;
use oxifa_core::{Automaton, EdgeId, StateId};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Placeholder symbol carried by every structural edge; the real label is
/// the regex kept next to the edge.
const PLACEHOLDER: char = '#';

/// An automaton whose edges are labelled with regular expressions.
#[derive(Debug)]
pub struct GeneralizedAutomaton {
    automaton: Automaton,
    labels: FxHashMap<EdgeId, RegularExpression>,
    start: StateId,
    finish: StateId,
}

impl GeneralizedAutomaton {
    /// Build a generalized automaton recognizing the same language as
    /// `source`.
    ///
    /// Two fresh boundary states are introduced: a unique start (start, not
    /// final) and a unique final (final, not start), distinct from all
    /// internal states. Every start state of `source` is wired from the
    /// boundary start with an epsilon label, every final state to the
    /// boundary final likewise, and every edge `u --c--> v` becomes an
    /// internal edge labelled with the one-symbol regex `c`.
    pub fn copy_of(source: &Automaton) -> Result<Self> {
        let alphabet = source.alphabet().clone();
        let mut automaton = Automaton::new(format!("gen({})", source.name()), alphabet.clone());
        let mut map: FxHashMap<StateId, StateId> = FxHashMap::default();
        for id in source.state_ids_sorted() {
            let copied = automaton.add_state_force_new(&source.state(id).name, false, false);
            map.insert(id, copied);
        }
        let start = automaton.add_state_force_new("start", true, false);
        let finish = automaton.add_state_force_new("final", false, true);

        let mut generalized = Self {
            automaton,
            labels: FxHashMap::default(),
            start,
            finish,
        };
        let epsilon = RegularExpression::epsilon(&alphabet);
        for id in source.start_states() {
            generalized.add_edge(start, map[&id], epsilon.clone())?;
        }
        for id in source.final_states() {
            generalized.add_edge(map[&id], finish, epsilon.clone())?;
        }
        for edge_id in source.edge_ids_sorted() {
            let edge = source.edge(edge_id);
            let label = RegularExpression::word(&edge.symbol.to_string(), &alphabet)?;
            generalized.add_edge(map[&edge.source], map[&edge.sink], label)?;
        }
        Ok(generalized)
    }

    /// The wrapped automaton.
    #[must_use]
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// The unique boundary start state.
    #[must_use]
    pub fn start_state(&self) -> StateId {
        self.start
    }

    /// The unique boundary final state.
    #[must_use]
    pub fn final_state(&self) -> StateId {
        self.finish
    }

    /// The regex label of an edge.
    #[must_use]
    pub fn label(&self, edge: EdgeId) -> Option<&RegularExpression> {
        self.labels.get(&edge)
    }

    /// Add a generalized edge. When an edge between the endpoints already
    /// exists the new label is summed into the stored one.
    pub fn add_edge(
        &mut self,
        from: StateId,
        to: StateId,
        label: RegularExpression,
    ) -> Result<()> {
        match self.automaton.get_edge(from, to, PLACEHOLDER) {
            Some(existing) => {
                let combined = RegularExpression::sum(&self.labels[&existing], &label)?;
                self.labels.insert(existing, combined);
            }
            None => {
                let edge = self.automaton.add_edge(from, to, PLACEHOLDER);
                self.labels.insert(edge, label);
            }
        }
        Ok(())
    }

    /// Eliminate all internal states and return a regex for the automaton's
    /// language.
    ///
    /// Each round removes one internal state, strictly decreasing the state
    /// count, so elimination always terminates. If no edge survives the
    /// language is empty; otherwise exactly one start-to-final edge remains
    /// and its label is the answer.
    pub fn equivalent_re(mut self) -> Result<RegularExpression> {
        let alphabet = self.automaton.alphabet().clone();
        while self.automaton.state_count() > 2 {
            let victim = self
                .automaton
                .state_ids_sorted()
                .into_iter()
                .find(|&id| id != self.start && id != self.finish)
                .unwrap_or_else(|| unreachable!("more than two states implies an internal one"));
            self.eliminate(victim)?;
        }
        match self.automaton.get_edge(self.start, self.finish, PLACEHOLDER) {
            Some(edge) => Ok(self.labels[&edge].clone()),
            None => Ok(RegularExpression::empty(&alphabet)),
        }
    }

    fn eliminate(&mut self, victim: StateId) -> Result<()> {
        debug!(state = %self.automaton.state(victim).name, "eliminating state");
        let self_loop = self
            .automaton
            .get_edge(victim, victim, PLACEHOLDER)
            .map(|edge| self.labels[&edge].clone());
        let incoming: Vec<(StateId, RegularExpression)> = self
            .automaton
            .edges_in(victim)
            .into_iter()
            .filter(|&edge| self.automaton.edge(edge).source != victim)
            .map(|edge| (self.automaton.edge(edge).source, self.labels[&edge].clone()))
            .collect();
        let outgoing: Vec<(StateId, RegularExpression)> = self
            .automaton
            .edges_out(victim)
            .into_iter()
            .filter(|&edge| self.automaton.edge(edge).sink != victim)
            .map(|edge| (self.automaton.edge(edge).sink, self.labels[&edge].clone()))
            .collect();

        for (source, into) in &incoming {
            for (sink, out_of) in &outgoing {
                let path = match &self_loop {
                    None => RegularExpression::concat(into, out_of)?,
                    Some(looped) => {
                        let starred = RegularExpression::star(looped)?;
                        let tail = RegularExpression::concat(&starred, out_of)?;
                        RegularExpression::concat(into, &tail)?
                    }
                };
                self.add_edge(*source, *sink, path)?;
            }
        }

        for edge in self
            .automaton
            .edges_in(victim)
            .into_iter()
            .chain(self.automaton.edges_out(victim))
        {
            self.labels.remove(&edge);
        }
        self.automaton.delete_state(victim);
        Ok(())
    }
}
