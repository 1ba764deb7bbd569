//! Proptest Strategies for Call-Order Testing
//!
//! Strategies that generate call traces over the steps of a sequence.
//! A trace is a list of step positions in the order the code under test
//! would make the calls.
//!
//! ```rust,ignore
//! proptest! {
//!     #[test]
//!     fn prop_only_registration_order_passes(trace in shuffled_trace(5)) {
//!         let seq = MockSequence::new();
//!         let mocks = register_steps(&seq, 5);
//!         let in_order = trace.iter().enumerate().all(|(i, step)| i == *step);
//!         let outcome = trace.iter().all(|step| mocks[*step].call(*step).is_ok());
//!         prop_assert_eq!(outcome, in_order);
//!     }
//! }
//! ```

use proptest::prelude::*;

/// Largest sequence length the strategies generate
pub const MAX_SEQUENCE_LENGTH: usize = 12;

/// Generate a sequence length in `1..=MAX_SEQUENCE_LENGTH`
pub fn sequence_length() -> impl Strategy<Value = usize> {
    1..=MAX_SEQUENCE_LENGTH
}

/// Generate a permutation of the positions `0..len`
///
/// Exactly one of the generated traces follows registration order.
pub fn shuffled_trace(len: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..len).collect::<Vec<_>>()).prop_shuffle()
}

/// Generate `rounds` in-order passes over `0..len`, as a cyclic sequence
/// expects them
pub fn cyclic_trace(
    len: usize,
    rounds: std::ops::Range<usize>,
) -> impl Strategy<Value = Vec<usize>> {
    rounds.prop_map(move |rounds| (0..rounds).flat_map(|_| 0..len).collect())
}

/// Generate a length together with a permutation of its positions
pub fn any_trace() -> impl Strategy<Value = (usize, Vec<usize>)> {
    sequence_length().prop_flat_map(|len| (Just(len), shuffled_trace(len)))
}
