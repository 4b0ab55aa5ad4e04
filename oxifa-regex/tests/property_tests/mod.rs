//! Property-based test suites for oxifa-regex.

mod regex_properties;

use oxifa_regex::{Alphabet, RegularExpression};
use proptest::prelude::*;

/// Shape of a pseudo-random regex; built into a [`RegularExpression`] by
/// [`build`].
#[derive(Debug, Clone)]
pub enum RegexShape {
    Empty,
    Word(String),
    Star(Box<RegexShape>),
    Sum(Box<RegexShape>, Box<RegexShape>),
    Concat(Box<RegexShape>, Box<RegexShape>),
}

/// Strategy for small pseudo-random regexes over `ab`.
pub fn regex_shape_strategy() -> impl Strategy<Value = RegexShape> {
    let leaf = prop_oneof![
        1 => Just(RegexShape::Empty),
        4 => "[ab]{0,2}".prop_map(RegexShape::Word),
    ];
    leaf.prop_recursive(3, 6, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|r| RegexShape::Star(Box::new(r))),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| RegexShape::Sum(Box::new(l), Box::new(r))),
            (inner.clone(), inner)
                .prop_map(|(l, r)| RegexShape::Concat(Box::new(l), Box::new(r))),
        ]
    })
}

/// Build the regex described by a shape over the default `ab` alphabet.
pub fn build(shape: &RegexShape) -> RegularExpression {
    let alphabet = Alphabet::new("ab").unwrap();
    build_over(shape, &alphabet)
}

fn build_over(shape: &RegexShape, alphabet: &Alphabet) -> RegularExpression {
    match shape {
        RegexShape::Empty => RegularExpression::empty(alphabet),
        RegexShape::Word(w) => RegularExpression::word(w, alphabet).unwrap(),
        RegexShape::Star(inner) => {
            RegularExpression::star(&build_over(inner, alphabet)).unwrap()
        }
        RegexShape::Sum(l, r) => {
            RegularExpression::sum(&build_over(l, alphabet), &build_over(r, alphabet)).unwrap()
        }
        RegexShape::Concat(l, r) => {
            RegularExpression::concat(&build_over(l, alphabet), &build_over(r, alphabet)).unwrap()
        }
    }
}

/// Strategy for short words over `ab`.
pub fn word_strategy() -> impl Strategy<Value = String> {
    "[ab]{0,5}"
}
