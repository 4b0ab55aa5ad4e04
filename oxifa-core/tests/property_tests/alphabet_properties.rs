//! Property-based tests for alphabets, word enumeration and Base62.

use oxifa_core::base62::{from_base62, to_base62, to_base62_padded};
use oxifa_core::Alphabet;
use proptest::prelude::*;

proptest! {
    #[test]
    fn base62_round_trips(n in 0usize..1_000_000) {
        prop_assert_eq!(from_base62(&to_base62(n)).unwrap(), n);
    }

    #[test]
    fn padded_encoding_preserves_value(n in 0usize..10_000, extra in 0usize..4) {
        let width = to_base62(n).len() + extra;
        let padded = to_base62_padded(n, width);
        prop_assert_eq!(padded.len(), width);
        prop_assert_eq!(from_base62(&padded).unwrap(), n);
    }

    #[test]
    fn words_are_length_lexicographic(max_len in 0usize..5) {
        let alphabet = Alphabet::new("ab").unwrap();
        let words: Vec<String> = alphabet.words(max_len).collect();
        for pair in words.windows(2) {
            let earlier = &pair[0];
            let later = &pair[1];
            let ordered = earlier.len() < later.len()
                || (earlier.len() == later.len() && earlier < later);
            prop_assert!(ordered, "{earlier:?} before {later:?}");
        }
        prop_assert_eq!(words.len(), (0..=max_len as u32).map(|k| 2usize.pow(k)).sum::<usize>());
    }

    #[test]
    fn random_words_respect_bounds(min_len in 0usize..5, extra in 0usize..5) {
        let alphabet = Alphabet::new("ab").unwrap();
        let word = alphabet.random_word(min_len, min_len + extra).unwrap();
        let len = word.chars().count();
        prop_assert!(len >= min_len && len <= min_len + extra);
        prop_assert!(word.chars().all(|c| alphabet.contains(c)));
    }
}
