//! Common assertion helpers for test output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for the success marker
pub fn success_marker() -> impl Predicate<str> {
    predicates::str::contains("✓")
}

/// Creates a predicate that checks for the error line
pub fn error_line() -> impl Predicate<str> {
    predicates::str::contains("✕ Error:")
}

/// Creates a predicate that checks `first` is printed before `second`
pub fn in_order(first: &'static str, second: &'static str) -> impl Predicate<str> {
    predicate::function(move |output: &str| match (output.find(first), output.find(second)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    })
}
