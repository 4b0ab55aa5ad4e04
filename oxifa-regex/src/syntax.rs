//! The regular-expression tree.
//!
//! A [`RegularExpression`] is an immutable sum-of-variants tree: empty
//! language, word literal (the empty word is the epsilon language), star,
//! sum, and concatenation. Children are shared through `Rc`, so cloning is
//! cheap and trees are safely shareable as immutable values.
//!
//! Every node caches an equivalent automaton computed at construction:
//! word literals compile to straight-line automata, and compound nodes
//! combine their operands' automata with the corresponding automaton
//! operation, then minimize and DFS-rename the result. Concatenation with
//! an epsilon word returns the other operand unchanged.

use crate::error::{RegexError, Result};
use oxifa_core::{Alphabet, Automaton};
use std::fmt;
use std::rc::Rc;

/// An immutable regular expression with a cached equivalent automaton.
#[derive(Debug, Clone)]
pub struct RegularExpression {
    node: Rc<Node>,
}

#[derive(Debug)]
struct Node {
    kind: Kind,
    automaton: Automaton,
}

#[derive(Debug)]
enum Kind {
    /// The empty language.
    Empty,
    /// A word literal; the empty word denotes the epsilon language.
    Word(String),
    /// Kleene star.
    Star(RegularExpression),
    /// Sum (union) of two languages.
    Sum(RegularExpression, RegularExpression),
    /// Concatenation of two languages.
    Concat(RegularExpression, RegularExpression),
}

impl RegularExpression {
    fn wrap(kind: Kind, automaton: Automaton) -> Self {
        Self {
            node: Rc::new(Node { kind, automaton }),
        }
    }

    /// The regex denoting the empty language. Its cached automaton has no
    /// states.
    #[must_use]
    pub fn empty(alphabet: &Alphabet) -> Self {
        Self::wrap(Kind::Empty, Automaton::new("empty", alphabet.clone()))
    }

    /// The regex denoting exactly the empty word.
    #[must_use]
    pub fn epsilon(alphabet: &Alphabet) -> Self {
        let mut automaton = Automaton::new("epsilon", alphabet.clone());
        automaton.add_state("q0", true, true);
        Self::wrap(Kind::Word(String::new()), automaton)
    }

    /// The regex denoting exactly `word`. The empty word yields the epsilon
    /// language.
    ///
    /// Errors when the word uses a symbol outside the alphabet.
    pub fn word(word: &str, alphabet: &Alphabet) -> Result<Self> {
        if let Some(bad) = word.chars().find(|&c| !alphabet.contains(c)) {
            return Err(RegexError::SymbolOutsideAlphabet(bad));
        }
        if word.is_empty() {
            return Ok(Self::epsilon(alphabet));
        }
        let mut automaton = Automaton::new(format!("word-{word}"), alphabet.clone());
        let mut previous = automaton.add_state("q0", true, false);
        let length = word.chars().count();
        for (i, symbol) in word.chars().enumerate() {
            let next = automaton.add_state(&format!("q{}", i + 1), false, i + 1 == length);
            automaton.add_edge(previous, next, symbol);
            previous = next;
        }
        Ok(Self::wrap(Kind::Word(word.to_string()), automaton))
    }

    /// Kleene star of a regex.
    pub fn star(inner: &RegularExpression) -> Result<Self> {
        let automaton = normalized(inner.node.automaton.star())?;
        Ok(Self::wrap(Kind::Star(inner.clone()), automaton))
    }

    /// Sum of two regexes over the same alphabet.
    pub fn sum(left: &RegularExpression, right: &RegularExpression) -> Result<Self> {
        check_alphabets(left, right)?;
        let automaton = normalized(left.node.automaton.union(&right.node.automaton))?;
        Ok(Self::wrap(Kind::Sum(left.clone(), right.clone()), automaton))
    }

    /// Concatenation of two regexes over the same alphabet.
    ///
    /// Concatenation with an epsilon word is simplified away: the other
    /// operand is returned unchanged.
    pub fn concat(left: &RegularExpression, right: &RegularExpression) -> Result<Self> {
        if left.is_epsilon_word() {
            return Ok(right.clone());
        }
        if right.is_epsilon_word() {
            return Ok(left.clone());
        }
        check_alphabets(left, right)?;
        let automaton = normalized(left.node.automaton.concat(&right.node.automaton))?;
        Ok(Self::wrap(
            Kind::Concat(left.clone(), right.clone()),
            automaton,
        ))
    }

    /// Whether this node is the epsilon word literal.
    #[must_use]
    pub fn is_epsilon_word(&self) -> bool {
        matches!(&self.node.kind, Kind::Word(w) if w.is_empty())
    }

    /// Whether this node is the empty-language literal.
    #[must_use]
    pub fn is_empty_language(&self) -> bool {
        matches!(self.node.kind, Kind::Empty)
    }

    /// The cached equivalent automaton.
    #[must_use]
    pub fn equivalent_automaton(&self) -> &Automaton {
        &self.node.automaton
    }

    /// The alphabet this regex was built over.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        self.node.automaton.alphabet()
    }

    /// Whether the regex's language contains `word`, decided by the cached
    /// automaton.
    #[must_use]
    pub fn accepts(&self, word: &str) -> bool {
        self.node.automaton.accepts(word)
    }

    /// Language equality with another regex, decided by equivalence of the
    /// cached automata.
    pub fn similar(&self, other: &RegularExpression) -> Result<bool> {
        Ok(self.node.automaton.equivalent(&other.node.automaton)?)
    }
}

/// Minimize and DFS-rename the automaton cached on a compound node.
fn normalized(automaton: Automaton) -> Result<Automaton> {
    let mut minimal = automaton.minimize()?;
    minimal.rename_states_dfs()?;
    Ok(minimal)
}

fn check_alphabets(left: &RegularExpression, right: &RegularExpression) -> Result<()> {
    if left.alphabet() != right.alphabet() {
        return Err(RegexError::AlphabetMismatch {
            left: left.alphabet().to_string(),
            right: right.alphabet().to_string(),
        });
    }
    Ok(())
}

impl fmt::Display for RegularExpression {
    /// Concrete syntax: `0` for the empty language, `E` for the epsilon
    /// word, literals for words, `x*` for a starred single symbol,
    /// `(…)*` for a starred compound, infix `+` for sums, juxtaposition
    /// for concatenation with parentheses only around sum operands.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node.kind {
            Kind::Empty => write!(f, "0"),
            Kind::Word(w) if w.is_empty() => write!(f, "E"),
            Kind::Word(w) => write!(f, "{w}"),
            Kind::Star(inner) => match &inner.node.kind {
                Kind::Word(w) if w.chars().count() == 1 => write!(f, "{w}*"),
                _ => write!(f, "({inner})*"),
            },
            Kind::Sum(left, right) => write!(f, "{left}+{right}"),
            Kind::Concat(left, right) => {
                write_concat_operand(f, left)?;
                write_concat_operand(f, right)
            }
        }
    }
}

fn write_concat_operand(f: &mut fmt::Formatter<'_>, operand: &RegularExpression) -> fmt::Result {
    if matches!(operand.node.kind, Kind::Sum(_, _)) {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}
