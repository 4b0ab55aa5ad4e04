//! Property-based tests for regex construction and the conversion loops
//!
//! Checked on pseudo-random regexes over `ab`:
//! - Constructor semantics (sum, concat, star) at the word level
//! - Parser round trips through `Display`
//! - Automaton-to-regex round trips through state elimination
//! - Extended intersection against word-level semantics

use super::{build, regex_shape_strategy, word_strategy};
use oxifa_regex::{ext, parse, RegularExpression};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn sum_accepts_either(
        left in regex_shape_strategy(),
        right in regex_shape_strategy(),
        word in word_strategy(),
    ) {
        let left = build(&left);
        let right = build(&right);
        let sum = RegularExpression::sum(&left, &right).unwrap();
        prop_assert_eq!(
            sum.accepts(&word),
            left.accepts(&word) || right.accepts(&word)
        );
    }

    #[test]
    fn concat_accepts_splits(
        left in regex_shape_strategy(),
        right in regex_shape_strategy(),
        word in word_strategy(),
    ) {
        let left = build(&left);
        let right = build(&right);
        let concat = RegularExpression::concat(&left, &right).unwrap();
        let chars: Vec<char> = word.chars().collect();
        let expected = (0..=chars.len()).any(|split| {
            let prefix: String = chars[..split].iter().collect();
            let suffix: String = chars[split..].iter().collect();
            left.accepts(&prefix) && right.accepts(&suffix)
        });
        prop_assert_eq!(concat.accepts(&word), expected);
    }

    #[test]
    fn star_accepts_epsilon_and_repetitions(shape in regex_shape_strategy()) {
        let re = build(&shape);
        let star = RegularExpression::star(&re).unwrap();
        prop_assert!(star.accepts(""));
        if let Some(word) = re.equivalent_automaton().first_accepted_word(3) {
            prop_assert!(star.accepts(&word));
            let doubled = format!("{}{}", word, word);
            prop_assert!(star.accepts(&doubled));
        }
    }

    #[test]
    fn display_reparses_to_the_same_language(shape in regex_shape_strategy()) {
        let re = build(&shape);
        let reparsed = parse(&re.to_string()).unwrap();
        prop_assert!(re.similar(&reparsed).unwrap());
    }

    #[test]
    fn state_elimination_round_trips(shape in regex_shape_strategy()) {
        let re = build(&shape);
        let minimal = re.equivalent_automaton().minimize().unwrap();
        let recovered = ext::from_automaton(&minimal).unwrap();
        prop_assert!(recovered.similar(&re).unwrap());
    }

    #[test]
    fn extended_intersection_matches_word_semantics(
        left in regex_shape_strategy(),
        right in regex_shape_strategy(),
        word in word_strategy(),
    ) {
        let left = build(&left);
        let right = build(&right);
        let both = ext::intersect(&left, &right).unwrap();
        prop_assert_eq!(
            both.accepts(&word),
            left.accepts(&word) && right.accepts(&word)
        );
    }
}
