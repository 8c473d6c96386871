//! Fuzz target for question ordering.
//!
//! The order key must be total: never NaN, and either the unparseable
//! marker or a non-negative number.

#![no_main]

use arbitrary::Arbitrary;
use arbitrate::questions::UNPARSEABLE_ORDER;
use arbitrate::{compare_questions, question_order};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct QuestionPair {
    first: String,
    second: String,
}

fuzz_target!(|input: QuestionPair| {
    let order = question_order(&input.first);
    assert!(!order.is_nan());
    assert!(order == UNPARSEABLE_ORDER || order >= 0.0);

    assert_eq!(
        compare_questions(&input.first, &input.second),
        compare_questions(&input.second, &input.first).reverse()
    );
});
