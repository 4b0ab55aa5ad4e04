//! Canonical naming and set algebra for sets of states.
//!
//! Subset construction and Hopcroft refinement identify a set of states by
//! its canonical name: the sorted member names joined with [`SET_SEPARATOR`].
//! Equality of subsets thereby reduces to equality of strings. The
//! [`StateSet`] value type carries the members and the set algebra; the
//! free [`canonical_name`] function implements the naming scheme for any
//! collection of names.

use crate::automaton::{Automaton, StateId};
use rustc_hash::FxHashSet;

/// Separator between member names in a canonical set name.
pub const SET_SEPARATOR: char = ',';

/// Canonical name of a collection of state names: sorted and joined with
/// [`SET_SEPARATOR`]. The empty collection yields the empty string.
#[must_use]
pub fn canonical_name<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let mut names: Vec<&str> = names.collect();
    names.sort_unstable();
    names.join(&SET_SEPARATOR.to_string())
}

/// A set of states of one automaton, keyed by id.
///
/// Wraps an `FxHashSet<StateId>` with the set algebra the partition and
/// subset passes need, plus canonical naming against the owning automaton.
#[derive(Debug, Clone, Default)]
pub struct StateSet {
    members: FxHashSet<StateId>,
}

impl StateSet {
    /// The empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of member states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add a state. Returns false when it was already a member.
    pub fn insert(&mut self, id: StateId) -> bool {
        self.members.insert(id)
    }

    /// Whether `id` is a member.
    #[must_use]
    pub fn contains(&self, id: StateId) -> bool {
        self.members.contains(&id)
    }

    /// Iterate over the members in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.members.iter().copied()
    }

    /// The members as a raw id set (for the delta primitives).
    #[must_use]
    pub fn members(&self) -> &FxHashSet<StateId> {
        &self.members
    }

    /// Union with another set.
    #[must_use]
    pub fn union(&self, other: &StateSet) -> StateSet {
        self.members.union(&other.members).copied().collect()
    }

    /// Intersection with another set.
    #[must_use]
    pub fn intersect(&self, other: &StateSet) -> StateSet {
        self.members.intersection(&other.members).copied().collect()
    }

    /// Difference `self \ other`.
    #[must_use]
    pub fn difference(&self, other: &StateSet) -> StateSet {
        self.members.difference(&other.members).copied().collect()
    }

    /// Whether every member of `self` is a member of `other`.
    #[must_use]
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.members.is_subset(&other.members)
    }

    /// Whether the two sets hold exactly the same members.
    #[must_use]
    pub fn equals(&self, other: &StateSet) -> bool {
        self.members.len() == other.members.len() && self.members.is_subset(&other.members)
    }

    /// Canonical name of the set within its owning automaton: the sorted
    /// member names joined with [`SET_SEPARATOR`].
    #[must_use]
    pub fn canonical_name(&self, automaton: &Automaton) -> String {
        canonical_name(self.members.iter().map(|&id| automaton.state(id).name.as_str()))
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl From<FxHashSet<StateId>> for StateSet {
    fn from(members: FxHashSet<StateId>) -> Self {
        Self { members }
    }
}
