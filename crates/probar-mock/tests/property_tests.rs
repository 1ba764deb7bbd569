//! Property-based tests for probar-mock.
//!
//! Uses proptest to check ordering invariants over arbitrary call traces.

use probar_mock::prelude::*;
use proptest::prelude::*;

/// One strict mock per step, each registered once on `seq`, answering its
/// own position
fn register_steps(seq: &MockSequence, len: usize) -> Vec<Mock<usize, usize>> {
    (0..len)
        .map(|step| {
            let mock: Mock<usize, usize> = Mock::strict(format!("step{step}"));
            mock.in_sequence(seq).setup_eq(step).returns(step);
            mock
        })
        .collect()
}

fn permutation(max: usize) -> impl Strategy<Value = Vec<usize>> {
    (1..=max).prop_flat_map(|len| Just((0..len).collect::<Vec<_>>()).prop_shuffle())
}

proptest! {
    /// A trace passes completely iff it is registration order.
    #[test]
    fn prop_only_registration_order_passes(trace in permutation(8)) {
        let seq = MockSequence::new();
        let mocks = register_steps(&seq, trace.len());

        let in_order = trace.iter().enumerate().all(|(i, step)| i == *step);
        let passed = trace.iter().all(|step| mocks[*step].call(*step).is_ok());
        prop_assert_eq!(passed, in_order);
    }

    /// Before the first failure, the cursor equals the number of answered calls.
    #[test]
    fn prop_cursor_counts_answered_calls(trace in permutation(8)) {
        let seq = MockSequence::new();
        let mocks = register_steps(&seq, trace.len());

        let mut answered = 0;
        for step in &trace {
            if mocks[*step].call(*step).is_err() {
                break;
            }
            answered += 1;
            prop_assert_eq!(seq.cursor(), answered);
        }
        prop_assert_eq!(seq.cursor(), answered);
    }

    /// A failed call never changes the cursor.
    #[test]
    fn prop_rejected_calls_are_side_effect_free(
        len in 2usize..8,
        prefix in 0usize..8,
        probe in 0usize..8,
    ) {
        let seq = MockSequence::new();
        let mocks = register_steps(&seq, len);
        let prefix = prefix.min(len);
        for step in 0..prefix {
            mocks[step].call(step).unwrap();
        }

        let probe = probe % len;
        let before = seq.cursor();
        let outcome = mocks[probe].call(probe);
        prop_assert_eq!(outcome.is_ok(), probe == prefix);
        if outcome.is_err() {
            prop_assert_eq!(seq.cursor(), before);
        }
    }

    /// A cyclic sequence accepts any number of in-order rounds.
    #[test]
    fn prop_cyclic_rounds_repeat(len in 1usize..6, rounds in 1usize..5) {
        let seq = MockSequence::cyclic();
        let mocks = register_steps(&seq, len);
        for _ in 0..rounds {
            for step in 0..len {
                prop_assert_eq!(mocks[step].call(step).unwrap(), step);
            }
            prop_assert_eq!(seq.cursor(), 0);
        }
    }

    /// A joint setup answers only when it is next on every sequence, and
    /// moves every cursor exactly once.
    #[test]
    fn prop_joint_setup_waits_for_every_sequence(
        lead in proptest::collection::vec(0usize..4, 1..4),
    ) {
        // `lead[i]` steps of a private filler mock come first on sequence i.
        let sequences: Vec<MockSequence> = lead.iter().map(|_| MockSequence::new()).collect();
        let fillers: Vec<Mock<usize, ()>> = sequences
            .iter()
            .zip(&lead)
            .enumerate()
            .map(|(i, (seq, count))| {
                let filler: Mock<usize, ()> = Mock::strict(format!("filler{i}"));
                for step in 0..*count {
                    filler.in_sequence(seq).setup_eq(step).returns(());
                }
                filler
            })
            .collect();

        let joint: Mock<(), ()> = Mock::strict("joint");
        let refs: Vec<&MockSequence> = sequences.iter().collect();
        joint.in_sequences(&refs).unwrap().setup(|_| true).returns(());

        for (filler, count) in fillers.iter().zip(&lead) {
            for step in 0..*count {
                prop_assert!(joint.call(()).is_err());
                prop_assert!(filler.call(step).is_ok());
            }
        }
        prop_assert!(joint.call(()).is_ok());
        for (seq, count) in sequences.iter().zip(&lead) {
            prop_assert_eq!(seq.cursor(), count + 1);
        }
        prop_assert!(joint.call(()).is_err());
    }
}
