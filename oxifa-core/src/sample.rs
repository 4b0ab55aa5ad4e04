//! Sample automata with language oracles.
//!
//! Each constructor returns a [`SampleAutomaton`]: the automaton together
//! with a boxed oracle predicate describing the intended language. The
//! oracle is a separate value rather than a field on the graph; the test
//! suites compare `automaton.accepts(word)` against `(oracle)(word)` over
//! enumerated words.

use crate::alphabet::Alphabet;
use crate::automaton::{Automaton, StateId};
use crate::error::{AutomatonError, Result};
use std::fmt;

/// An automaton paired with an oracle for its intended language.
pub struct SampleAutomaton {
    /// The constructed automaton.
    pub automaton: Automaton,
    /// Ground-truth membership predicate for the intended language.
    pub oracle: Box<dyn Fn(&str) -> bool>,
}

impl fmt::Debug for SampleAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleAutomaton")
            .field("automaton", &self.automaton.name())
            .finish_non_exhaustive()
    }
}

fn check_word(alphabet: &Alphabet, word: &str) -> Result<()> {
    match word.chars().find(|&c| !alphabet.contains(c)) {
        Some(bad) => Err(AutomatonError::InvalidArgument(format!(
            "word symbol '{bad}' is not in alphabet '{alphabet}'"
        ))),
        None => Ok(()),
    }
}

fn add_self_loops(automaton: &mut Automaton, id: StateId) {
    for &symbol in automaton.alphabet().symbols().to_vec().iter() {
        automaton.add_edge(id, id, symbol);
    }
}

/// Chain `q{offset}..` spelling `word` from `from`; returns the last state.
fn add_chain(automaton: &mut Automaton, from: StateId, word: &str) -> StateId {
    let mut previous = from;
    for (i, symbol) in word.chars().enumerate() {
        let next = automaton.add_state(&format!("q{}", i + 1), false, false);
        automaton.add_edge(previous, next, symbol);
        previous = next;
    }
    previous
}

/// Words ending with `word`.
pub fn ends_with(alphabet: &Alphabet, word: &str) -> Result<SampleAutomaton> {
    check_word(alphabet, word)?;
    let mut automaton = Automaton::new(format!("ends-with-{word}"), alphabet.clone());
    let q0 = automaton.add_state("q0", true, false);
    add_self_loops(&mut automaton, q0);
    let last = add_chain(&mut automaton, q0, word);
    automaton.set_final(last, true);
    let word = word.to_string();
    Ok(SampleAutomaton {
        automaton,
        oracle: Box::new(move |w| w.ends_with(&word)),
    })
}

/// Words starting with `word`.
pub fn starts_with(alphabet: &Alphabet, word: &str) -> Result<SampleAutomaton> {
    check_word(alphabet, word)?;
    let mut automaton = Automaton::new(format!("starts-with-{word}"), alphabet.clone());
    let q0 = automaton.add_state("q0", true, false);
    let last = add_chain(&mut automaton, q0, word);
    automaton.set_final(last, true);
    add_self_loops(&mut automaton, last);
    let word = word.to_string();
    Ok(SampleAutomaton {
        automaton,
        oracle: Box::new(move |w| w.starts_with(&word)),
    })
}

/// Words containing `word` as a (contiguous) subword.
pub fn subword(alphabet: &Alphabet, word: &str) -> Result<SampleAutomaton> {
    check_word(alphabet, word)?;
    let mut automaton = Automaton::new(format!("subword-{word}"), alphabet.clone());
    let q0 = automaton.add_state("q0", true, false);
    add_self_loops(&mut automaton, q0);
    let last = add_chain(&mut automaton, q0, word);
    automaton.set_final(last, true);
    add_self_loops(&mut automaton, last);
    let word = word.to_string();
    Ok(SampleAutomaton {
        automaton,
        oracle: Box::new(move |w| w.contains(&word)),
    })
}

/// Words with exactly `count` occurrences of `symbol`.
pub fn number_of_symbols(alphabet: &Alphabet, symbol: char, count: usize) -> Result<SampleAutomaton> {
    if !alphabet.contains(symbol) {
        return Err(AutomatonError::InvalidArgument(format!(
            "symbol '{symbol}' is not in alphabet '{alphabet}'"
        )));
    }
    let mut automaton = Automaton::new(format!("count-{symbol}-{count}"), alphabet.clone());
    let others: Vec<char> = alphabet
        .symbols()
        .iter()
        .copied()
        .filter(|&c| c != symbol)
        .collect();
    let mut previous: Option<StateId> = None;
    for i in 0..=count {
        let id = automaton.add_state(&format!("q{i}"), i == 0, i == count);
        for &other in &others {
            automaton.add_edge(id, id, other);
        }
        if let Some(previous) = previous {
            automaton.add_edge(previous, id, symbol);
        }
        previous = Some(id);
    }
    Ok(SampleAutomaton {
        automaton,
        oracle: Box::new(move |w| w.chars().filter(|&c| c == symbol).count() == count),
    })
}

/// Words whose length is congruent to `remainder` modulo `modulus`.
pub fn mod_length(alphabet: &Alphabet, modulus: usize, remainder: usize) -> Result<SampleAutomaton> {
    if modulus == 0 {
        return Err(AutomatonError::InvalidArgument(
            "mod_length: modulus must be positive".to_string(),
        ));
    }
    if remainder >= modulus {
        return Err(AutomatonError::InvalidArgument(format!(
            "mod_length: remainder {remainder} must be below modulus {modulus}"
        )));
    }
    let mut automaton = Automaton::new(format!("mod-{modulus}-{remainder}"), alphabet.clone());
    let ids: Vec<StateId> = (0..modulus)
        .map(|i| automaton.add_state(&format!("q{i}"), i == 0, i == remainder))
        .collect();
    for (i, &id) in ids.iter().enumerate() {
        let next = ids[(i + 1) % modulus];
        for &symbol in alphabet.symbols().to_vec().iter() {
            automaton.add_edge(id, next, symbol);
        }
    }
    Ok(SampleAutomaton {
        automaton,
        oracle: Box::new(move |w| w.chars().count() % modulus == remainder),
    })
}

/// Exactly the word `word`.
pub fn only_word(alphabet: &Alphabet, word: &str) -> Result<SampleAutomaton> {
    check_word(alphabet, word)?;
    let mut automaton = Automaton::new(format!("only-{word}"), alphabet.clone());
    let q0 = automaton.add_state("q0", true, word.is_empty());
    let last = add_chain(&mut automaton, q0, word);
    automaton.set_final(last, true);
    let word = word.to_string();
    Ok(SampleAutomaton {
        automaton,
        oracle: Box::new(move |w| w == word),
    })
}

/// Exactly the empty word.
pub fn only_empty_word(alphabet: &Alphabet) -> SampleAutomaton {
    let mut automaton = Automaton::new("only-empty", alphabet.clone());
    automaton.add_state("q0", true, true);
    SampleAutomaton {
        automaton,
        oracle: Box::new(|w| w.is_empty()),
    }
}

/// Every word over the alphabet.
pub fn all_words(alphabet: &Alphabet) -> SampleAutomaton {
    let mut automaton = Automaton::new("all-words", alphabet.clone());
    let q0 = automaton.add_state("q0", true, true);
    add_self_loops(&mut automaton, q0);
    SampleAutomaton {
        automaton,
        oracle: Box::new(|_| true),
    }
}

/// The empty language (an automaton with no states).
pub fn no_words(alphabet: &Alphabet) -> SampleAutomaton {
    SampleAutomaton {
        automaton: Automaton::new("no-words", alphabet.clone()),
        oracle: Box::new(|_| false),
    }
}

/// Words whose length lies in `[min_len, max_len]`.
pub fn length_range(alphabet: &Alphabet, min_len: usize, max_len: usize) -> Result<SampleAutomaton> {
    if min_len > max_len {
        return Err(AutomatonError::InvalidArgument(format!(
            "length_range: min {min_len} exceeds max {max_len}"
        )));
    }
    let mut automaton = Automaton::new(format!("length-{min_len}-{max_len}"), alphabet.clone());
    let ids: Vec<StateId> = (0..=max_len)
        .map(|i| automaton.add_state(&format!("q{i}"), i == 0, i >= min_len))
        .collect();
    for window in ids.windows(2) {
        for &symbol in alphabet.symbols().to_vec().iter() {
            automaton.add_edge(window[0], window[1], symbol);
        }
    }
    Ok(SampleAutomaton {
        automaton,
        oracle: Box::new(move |w| {
            let len = w.chars().count();
            min_len <= len && len <= max_len
        }),
    })
}

/// Words of length at least `min_len`.
pub fn min_length(alphabet: &Alphabet, min_len: usize) -> SampleAutomaton {
    let mut automaton = Automaton::new(format!("min-length-{min_len}"), alphabet.clone());
    let ids: Vec<StateId> = (0..=min_len)
        .map(|i| automaton.add_state(&format!("q{i}"), i == 0, i == min_len))
        .collect();
    for window in ids.windows(2) {
        for &symbol in alphabet.symbols().to_vec().iter() {
            automaton.add_edge(window[0], window[1], symbol);
        }
    }
    add_self_loops(&mut automaton, ids[min_len]);
    SampleAutomaton {
        automaton,
        oracle: Box::new(move |w| w.chars().count() >= min_len),
    }
}

/// Words of length at most `max_len`.
pub fn max_length(alphabet: &Alphabet, max_len: usize) -> SampleAutomaton {
    let mut automaton = Automaton::new(format!("max-length-{max_len}"), alphabet.clone());
    let ids: Vec<StateId> = (0..=max_len)
        .map(|i| automaton.add_state(&format!("q{i}"), i == 0, true))
        .collect();
    for window in ids.windows(2) {
        for &symbol in alphabet.symbols().to_vec().iter() {
            automaton.add_edge(window[0], window[1], symbol);
        }
    }
    SampleAutomaton {
        automaton,
        oracle: Box::new(move |w| w.chars().count() <= max_len),
    }
}

/// An automaton that deliberately contains states unreachable from the
/// start. The language is "non-empty words"; the graph is illustrative and
/// mainly exercises [`Automaton::reduce`].
pub fn not_reachable(alphabet: &Alphabet) -> SampleAutomaton {
    let mut automaton = Automaton::new("not-reachable", alphabet.clone());
    let q0 = automaton.add_state("q0", true, false);
    let q1 = automaton.add_state("q1", false, true);
    for &symbol in alphabet.symbols().to_vec().iter() {
        automaton.add_edge(q0, q1, symbol);
    }
    add_self_loops(&mut automaton, q1);
    let u0 = automaton.add_state("u0", false, false);
    let u1 = automaton.add_state("u1", false, false);
    for &symbol in alphabet.symbols().to_vec().iter() {
        automaton.add_edge(u0, u1, symbol);
    }
    SampleAutomaton {
        automaton,
        oracle: Box::new(|w| !w.is_empty()),
    }
}

/// Normalization fixture: a reachable accepting core plus a dead branch and
/// an unreachable feeder state. The language is "words starting with the
/// first alphabet symbol".
pub fn test_normalize(alphabet: &Alphabet) -> SampleAutomaton {
    let first = alphabet.symbols()[0];
    let last = *alphabet
        .symbols()
        .last()
        .unwrap_or_else(|| unreachable!("alphabets are non-empty"));
    let mut automaton = Automaton::new("normalize-fixture", alphabet.clone());
    let s = automaton.add_state("s", true, false);
    let t = automaton.add_state("t", false, true);
    let dead = automaton.add_state("dead", false, false);
    let orphan = automaton.add_state("orphan", false, false);
    automaton.add_edge(s, t, first);
    add_self_loops(&mut automaton, t);
    if last != first {
        automaton.add_edge(s, dead, last);
    }
    automaton.add_edge(dead, dead, first);
    automaton.add_edge(orphan, t, first);
    SampleAutomaton {
        automaton,
        oracle: Box::new(move |w| w.chars().next() == Some(first)),
    }
}

/// Minimization fixture: two interchangeable final states that a minimizer
/// must merge. The language is "non-empty words".
pub fn minimize1(alphabet: &Alphabet) -> SampleAutomaton {
    let mut automaton = Automaton::new("minimize-fixture", alphabet.clone());
    let s = automaton.add_state("s", true, false);
    let p = automaton.add_state("p", false, true);
    let q = automaton.add_state("q", false, true);
    for (i, &symbol) in alphabet.symbols().to_vec().iter().enumerate() {
        let (first_target, second_target) = if i % 2 == 0 { (p, q) } else { (q, p) };
        automaton.add_edge(s, first_target, symbol);
        automaton.add_edge(p, second_target, symbol);
        automaton.add_edge(q, first_target, symbol);
    }
    SampleAutomaton {
        automaton,
        oracle: Box::new(|w| !w.is_empty()),
    }
}
