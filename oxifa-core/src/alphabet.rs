//! Finite ordered alphabets and word enumeration.
//!
//! An alphabet is an ordered sequence of distinct single-character symbols,
//! immutable after construction. Iteration order matters: DFS renaming and
//! canonical signatures visit symbols in the alphabet's declared order.

use crate::error::{AutomatonError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A finite ordered set of single-character symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Create an alphabet from a symbol string.
    ///
    /// Errors on an empty string or a repeated symbol.
    pub fn new(symbols: &str) -> Result<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(AutomatonError::InvalidArgument(
                "alphabet must contain at least one symbol".to_string(),
            ));
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(AutomatonError::InvalidArgument(format!(
                    "duplicate symbol '{c}' in alphabet"
                )));
            }
        }
        Ok(Self { symbols })
    }

    /// The symbols in declared order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the alphabet has no symbols. Always false for a constructed
    /// alphabet; present for container-API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether `symbol` belongs to the alphabet.
    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Position of `symbol` in the declared order.
    #[must_use]
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&c| c == symbol)
    }

    /// The symbols as a string, in declared order.
    #[must_use]
    pub fn symbol_string(&self) -> String {
        self.symbols.iter().collect()
    }

    /// All words of length at most `max_len`, in length-lexicographic order
    /// starting with the empty word.
    #[must_use]
    pub fn words(&self, max_len: usize) -> Words {
        Words {
            symbols: self.symbols.clone(),
            current: Some(Vec::new()),
            max_len: Some(max_len),
        }
    }

    /// All words over the alphabet, in length-lexicographic order. The
    /// iterator is infinite.
    #[must_use]
    pub fn all_words(&self) -> Words {
        Words {
            symbols: self.symbols.clone(),
            current: Some(Vec::new()),
            max_len: None,
        }
    }

    /// A random word whose length is drawn uniformly from
    /// `[min_len, max_len]` and whose symbols are drawn uniformly from the
    /// alphabet.
    ///
    /// Errors when `min_len > max_len`.
    pub fn random_word(&self, min_len: usize, max_len: usize) -> Result<String> {
        if min_len > max_len {
            return Err(AutomatonError::InvalidArgument(format!(
                "random_word: min_len {min_len} exceeds max_len {max_len}"
            )));
        }
        let mut rng = rand::rng();
        let len = rng.random_range(min_len..=max_len);
        Ok((0..len)
            .map(|_| self.symbols[rng.random_range(0..self.symbols.len())])
            .collect())
    }
}

impl Default for Alphabet {
    /// The default two-symbol alphabet `ab`.
    fn default() -> Self {
        Self {
            symbols: vec!['a', 'b'],
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Length-lexicographic word enumeration over an alphabet.
///
/// Yields the empty word first, then all words of length 1 in symbol order,
/// then length 2, and so on. The word currently held is represented as a
/// vector of symbol indices advanced like an odometer.
#[derive(Debug, Clone)]
pub struct Words {
    symbols: Vec<char>,
    current: Option<Vec<usize>>,
    max_len: Option<usize>,
}

impl Iterator for Words {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let indices = self.current.take()?;
        let word: String = indices.iter().map(|&i| self.symbols[i]).collect();

        let k = self.symbols.len();
        let mut next = indices;
        let mut pos = next.len();
        while pos > 0 {
            pos -= 1;
            if next[pos] + 1 < k {
                next[pos] += 1;
                for slot in next.iter_mut().skip(pos + 1) {
                    *slot = 0;
                }
                self.current = Some(next);
                return Some(word);
            }
        }
        // Every position carried over: grow to the next length.
        let grown = next.len() + 1;
        if self.max_len.is_none_or(|m| grown <= m) {
            self.current = Some(vec![0; grown]);
        }
        Some(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_duplicates() {
        assert!(Alphabet::new("").is_err());
        assert!(Alphabet::new("aa").is_err());
        assert!(Alphabet::new("aba").is_err());
    }

    #[test]
    fn enumerates_length_lexicographically() {
        let alphabet = Alphabet::new("ab").unwrap();
        let first: Vec<String> = alphabet.all_words().take(15).collect();
        assert_eq!(
            first,
            vec![
                "", "a", "b", "aa", "ab", "ba", "bb", "aaa", "aab", "aba", "abb", "baa",
                "bab", "bba", "bbb"
            ]
        );
    }

    #[test]
    fn bounded_enumeration_stops() {
        let alphabet = Alphabet::new("ab").unwrap();
        let words: Vec<String> = alphabet.words(2).collect();
        assert_eq!(words.len(), 1 + 2 + 4);
        assert_eq!(words.last().unwrap(), "bb");
    }

    #[test]
    fn unary_alphabet_words() {
        let alphabet = Alphabet::new("x").unwrap();
        let words: Vec<String> = alphabet.words(3).collect();
        assert_eq!(words, vec!["", "x", "xx", "xxx"]);
    }

    #[test]
    fn random_word_has_requested_length() {
        let alphabet = Alphabet::new("ab").unwrap();
        let word = alphabet.random_word(60, 60).unwrap();
        assert_eq!(word.chars().count(), 60);
        assert!(word.chars().all(|c| alphabet.contains(c)));
    }

    #[test]
    fn random_word_rejects_inverted_bounds() {
        let alphabet = Alphabet::new("ab").unwrap();
        assert!(alphabet.random_word(3, 2).is_err());
    }
}
