//! Text-format automaton loader.
//!
//! Newline-separated description, `\r\n` tolerated:
//!
//! - `from-sym[,sym…]-to` adds one edge per listed symbol,
//! - a line starting with `-` begins a new layout row (consumed; layout is
//!   out of the core),
//! - `final:s1,s2,…` marks states final,
//! - a state may carry an inline position `name(x,y)`, which is parsed and
//!   discarded,
//! - the first state mentioned becomes the start state.

use crate::alphabet::Alphabet;
use crate::automaton::{Automaton, StateId};
use crate::error::{AutomatonError, Result};
use std::path::Path;

impl Automaton {
    /// Parse a text-format automaton description.
    pub fn parse_text(name: impl Into<String>, input: &str, alphabet: &Alphabet) -> Result<Self> {
        let mut automaton = Automaton::new(name, alphabet.clone());
        let mut first: Option<StateId> = None;

        for (index, raw) in input.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.trim_end_matches('\r').trim();
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix("final:") {
                for entry in rest.split(',') {
                    let state_name = strip_position(entry.trim(), line_number)?;
                    if state_name.is_empty() {
                        return Err(AutomatonError::Parse {
                            line: line_number,
                            message: "empty state name in final list".to_string(),
                        });
                    }
                    let id = automaton.add_state(state_name, false, false);
                    automaton.set_final(id, true);
                    first.get_or_insert(id);
                }
                continue;
            }
            if line.starts_with('-') {
                // Layout row marker.
                continue;
            }

            let parts: Vec<&str> = line.split('-').collect();
            if parts.len() != 3 {
                return Err(AutomatonError::Parse {
                    line: line_number,
                    message: format!("expected 'from-symbols-to', got '{line}'"),
                });
            }
            let from_name = strip_position(parts[0].trim(), line_number)?;
            let to_name = strip_position(parts[2].trim(), line_number)?;
            let from = automaton.add_state(from_name, false, false);
            first.get_or_insert(from);
            let to = automaton.add_state(to_name, false, false);
            for symbol_text in parts[1].split(',') {
                let symbol_text = symbol_text.trim();
                let mut chars = symbol_text.chars();
                let symbol = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => {
                        return Err(AutomatonError::Parse {
                            line: line_number,
                            message: format!("'{symbol_text}' is not a single symbol"),
                        })
                    }
                };
                if !alphabet.contains(symbol) {
                    return Err(AutomatonError::Parse {
                        line: line_number,
                        message: format!("symbol '{symbol}' is not in alphabet '{alphabet}'"),
                    });
                }
                automaton.add_edge(from, to, symbol);
            }
        }

        if let Some(start) = first {
            automaton.set_start(start, true);
        }
        Ok(automaton)
    }

    /// Load a text-format automaton from a file. The file stem becomes the
    /// automaton's name; IO errors are surfaced as-is.
    pub fn load_text(path: impl AsRef<Path>, alphabet: &Alphabet) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("loaded")
            .to_string();
        Self::parse_text(name, &input, alphabet)
    }
}

/// Strip a trailing `(x,y)` position from a state token, validating the
/// coordinates as unsigned integers.
fn strip_position(token: &str, line_number: usize) -> Result<&str> {
    let Some(open) = token.find('(') else {
        return Ok(token);
    };
    let rest = &token[open..];
    let valid = rest.ends_with(')') && {
        let inner = &rest[1..rest.len() - 1];
        match inner.split_once(',') {
            Some((x, y)) => {
                !x.is_empty()
                    && !y.is_empty()
                    && x.chars().all(|c| c.is_ascii_digit())
                    && y.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        }
    };
    if !valid {
        return Err(AutomatonError::Parse {
            line: line_number,
            message: format!("malformed position in '{token}'"),
        });
    }
    Ok(&token[..open])
}
