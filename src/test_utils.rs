//! Shared unit test utilities.
//!
//! Provides random syntax trees and a way to print them back as patterns.

use proptest::prelude::*;

use super::regex::Hir;

/// Random trees over the alphabet `{a, b, c}`.
pub fn arb_hir() -> impl Strategy<Value = Hir> {
    let leaf = prop_oneof![Just('a'), Just('b'), Just('c')].prop_map(Hir::Char);

    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(left, right)| Hir::concat(left, right)),
            (inner.clone(), inner.clone()).prop_map(|(left, right)| Hir::alternation(left, right)),
            inner.clone().prop_map(Hir::option),
            inner.prop_map(Hir::closure),
        ]
    })
}

/// Print a tree as a pattern with as few parentheses as possible.
///
/// The output is accepted both by our parser and by the `regex` crate, and
/// denotes the same langage in both.
pub fn to_pattern(hir: &Hir) -> String {
    match hir {
        Hir::Char(c) => c.to_string(),
        Hir::Concat(left, right) => format!("{}{}", group_alternation(left), group_alternation(right)),
        Hir::Alternation(left, right) => format!("{}|{}", to_pattern(left), to_pattern(right)),
        Hir::Option(child) => format!("{}?", group(child)),
        Hir::Closure(child) => format!("{}*", group(child)),
    }
}

fn group(hir: &Hir) -> String {
    match hir {
        Hir::Char(c) => c.to_string(),
        _ => format!("({})", to_pattern(hir)),
    }
}

fn group_alternation(hir: &Hir) -> String {
    match hir {
        Hir::Alternation(..) => format!("({})", to_pattern(hir)),
        _ => to_pattern(hir),
    }
}
