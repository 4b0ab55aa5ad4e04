//! Property-based tests for the automaton engine
//!
//! Universally quantified invariants checked on pseudo-random automata:
//! - Determinization, minimization and reduction preserve the language
//! - Hopcroft and Brzozowski minimize to equivalent automata
//! - Boolean closure operations match word-level semantics
//! - Signatures round-trip on minimal DFAs
//! - Renaming states yields an isomorphic automaton

use super::{automaton_strategy, word_strategy};
use oxifa_core::{random_permutation, Automaton, MinimizationAlgorithm};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn determinization_preserves_language(
        automaton in automaton_strategy(),
        word in word_strategy(),
    ) {
        let dfa = automaton.make_deterministic();
        prop_assert!(dfa.is_deterministic());
        prop_assert_eq!(dfa.accepts(&word), automaton.accepts(&word));
    }

    #[test]
    fn minimization_preserves_language(
        automaton in automaton_strategy(),
        word in word_strategy(),
    ) {
        let minimal = automaton.minimize().unwrap();
        prop_assert_eq!(minimal.accepts(&word), automaton.accepts(&word));
    }

    #[test]
    fn reduction_preserves_language(
        automaton in automaton_strategy(),
        word in word_strategy(),
    ) {
        prop_assert_eq!(automaton.reduce().accepts(&word), automaton.accepts(&word));
    }

    #[test]
    fn hopcroft_equals_brzozowski(automaton in automaton_strategy()) {
        let hopcroft = automaton.minimize_with(MinimizationAlgorithm::Hopcroft).unwrap();
        let brzozowski = automaton.minimize_with(MinimizationAlgorithm::Brzozowski).unwrap();
        prop_assert!(hopcroft.equivalent(&brzozowski).unwrap());
        prop_assert_eq!(hopcroft.state_count(), brzozowski.state_count());
    }

    #[test]
    fn boolean_closure_matches_word_semantics(
        left in automaton_strategy(),
        right in automaton_strategy(),
        word in word_strategy(),
    ) {
        let in_left = left.accepts(&word);
        let in_right = right.accepts(&word);
        prop_assert_eq!(left.union(&right).accepts(&word), in_left || in_right);
        prop_assert_eq!(left.intersect(&right).accepts(&word), in_left && in_right);
        prop_assert_eq!(left.difference(&right).unwrap().accepts(&word), in_left && !in_right);
        prop_assert_eq!(left.complement().unwrap().accepts(&word), !in_left);
    }

    #[test]
    fn concat_matches_split_semantics(
        left in automaton_strategy(),
        right in automaton_strategy(),
        word in word_strategy(),
    ) {
        let chars: Vec<char> = word.chars().collect();
        let expected = (0..=chars.len()).any(|split| {
            let prefix: String = chars[..split].iter().collect();
            let suffix: String = chars[split..].iter().collect();
            left.accepts(&prefix) && right.accepts(&suffix)
        });
        prop_assert_eq!(left.concat(&right).accepts(&word), expected);
    }

    #[test]
    fn star_accepts_concatenated_accepted_words(automaton in automaton_strategy()) {
        let star = automaton.star();
        prop_assert!(star.accepts(""));
        let accepted: Vec<String> = automaton.accepted_words(3).take(3).collect();
        for first in &accepted {
            for second in &accepted {
                let combined = format!("{}{}", first, second);
                prop_assert!(star.accepts(&combined));
            }
        }
    }

    #[test]
    fn signature_round_trips_on_minimal_dfas(automaton in automaton_strategy()) {
        let minimal = automaton.minimize().unwrap();
        let signature = minimal.signature_dfs().unwrap();
        prop_assert_eq!(&signature, &minimal.signature_numbered_dfs().unwrap());
        let rebuilt = Automaton::from_signature(&signature).unwrap();
        prop_assert_eq!(rebuilt.signature_dfs().unwrap(), signature);
    }

    #[test]
    fn equivalence_is_reflexive_and_respects_minimization(automaton in automaton_strategy()) {
        prop_assert!(automaton.equivalent(&automaton).unwrap());
        prop_assert!(automaton.minimize().unwrap().equivalent(&automaton).unwrap());
    }

    #[test]
    fn renaming_yields_isomorphic_automaton(automaton in automaton_strategy()) {
        let n = automaton.state_count();
        let old_names: Vec<String> = automaton
            .state_ids_sorted()
            .into_iter()
            .map(|id| automaton.state(id).name.clone())
            .collect();
        let permutation = random_permutation(n);
        let shuffled: Vec<String> = permutation.iter().map(|&i| old_names[i].clone()).collect();
        let mut renamed = automaton.clone();
        renamed.rename_states(&shuffled).unwrap();
        prop_assert!(automaton.isomorphic(&renamed));
    }
}
