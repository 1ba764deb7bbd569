//! Call-order scenarios across several mocks and sequences.
//!
//! Every mock here is strict: a call no setup accepts is an error, which
//! is how out-of-order calls surface.

use probar_mock::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn foo(name: &str) -> Mock<i32, i32> {
    Mock::strict(name)
}

mod joint_sequences {
    use super::*;

    fn three_mocks_three_sequences() -> (Mock<i32, i32>, Mock<i32, i32>, Mock<i32, i32>) {
        let (a, b, c) = (foo("a"), foo("b"), foo("c"));
        let s1 = MockSequence::named("seq1");
        let s2 = MockSequence::named("seq2");
        let s3 = MockSequence::named("seq3");

        a.in_sequences(&[&s1, &s2])
            .unwrap()
            .setup_eq(100)
            .returns(101);
        b.in_sequences(&[&s2, &s3])
            .unwrap()
            .setup_eq(200)
            .returns(201);
        c.in_sequences(&[&s1, &s3])
            .unwrap()
            .setup_eq(300)
            .returns(301);
        (a, b, c)
    }

    #[test]
    fn right_order_succeeds() {
        init_tracing();
        let (a, b, c) = three_mocks_three_sequences();
        assert_eq!(a.call(100).unwrap(), 101);
        assert_eq!(b.call(200).unwrap(), 201);
        assert_eq!(c.call(300).unwrap(), 301);
    }

    #[test]
    fn skipping_a_step_fails() {
        init_tracing();
        let (a, _b, c) = three_mocks_three_sequences();
        a.call(100).unwrap();

        let err = c.call(300).unwrap_err();
        assert!(err.is_ordering_violation());
        // seq1 is ready for c, seq3 still waits for b.
        let msg = err.to_string();
        assert!(msg.contains("seq1 at 1, expects 1"), "{msg}");
        assert!(msg.contains("seq3 at 0, expects 1"), "{msg}");
    }

    #[test]
    fn joint_match_advances_every_sequence_once() {
        let a = foo("a");
        let (s1, s2) = (MockSequence::new(), MockSequence::new());
        a.in_sequences(&[&s1, &s2]).unwrap().setup_eq(1).returns(1);

        a.call(1).unwrap();
        assert_eq!((s1.cursor(), s2.cursor()), (1, 1));
        assert!(s1.is_complete() && s2.is_complete());
    }

    #[test]
    fn sequences_of_different_lengths_stay_independent() {
        let (a, b) = (foo("a"), foo("b"));
        let long = MockSequence::named("long");
        let short = MockSequence::named("short");

        a.in_sequence(&long).setup_eq(1).returns(1);
        a.in_sequence(&long).setup_eq(2).returns(2);
        b.in_sequences(&[&long, &short])
            .unwrap()
            .setup_eq(3)
            .returns(3);

        assert!(b.call(3).is_err());
        a.call(1).unwrap();
        a.call(2).unwrap();
        assert_eq!(b.call(3).unwrap(), 3);
        assert_eq!((long.cursor(), short.cursor()), (3, 1));
    }

    #[test]
    fn optional_list_with_gap_reports_index() {
        let a = foo("a");
        let s1 = MockSequence::new();
        let lookup = |name: &str| (name == "s1").then_some(&s1);

        let err = a
            .in_optional_sequences(&[lookup("s1"), lookup("missing")])
            .unwrap_err();
        assert!(matches!(err, MockError::MissingSequence { index: 1 }));
        assert!(err.is_configuration_error());
        assert!(s1.is_empty());
        assert_eq!(a.setup_count(), 0);
    }

    #[test]
    fn try_in_sequence_rejects_absent_sequence_before_any_call() {
        let a = foo("a");
        let err = a.try_in_sequence(None).unwrap_err();
        assert!(matches!(err, MockError::MissingSequence { index: 0 }));
        assert_eq!(a.call_count(), 0);
    }
}

mod single_sequence {
    use super::*;

    #[test]
    fn non_cyclic_sequence_runs_once() {
        let (a, b) = (foo("a"), foo("b"));
        let seq = MockSequence::new();
        a.in_sequence(&seq).setup_eq(100).returns(101);
        b.in_sequence(&seq).setup_eq(200).returns(201);

        assert_eq!(a.call(100).unwrap(), 101);
        assert_eq!(b.call(200).unwrap(), 201);

        assert!(a.call(100).unwrap_err().is_ordering_violation());
        assert!(b.call(200).unwrap_err().is_ordering_violation());
        seq.verify_complete().unwrap();
    }

    #[test]
    fn cyclic_sequence_repeats() {
        let (a, b) = (foo("a"), foo("b"));
        let seq = MockSequence::cyclic();
        a.in_sequence(&seq).setup_eq(100).returns(101);
        b.in_sequence(&seq).setup_eq(200).returns(201);

        for _ in 0..3 {
            assert_eq!(a.call(100).unwrap(), 101);
            assert_eq!(b.call(200).unwrap(), 201);
        }
        assert!(b.call(200).is_err());
    }

    #[test]
    fn same_mock_same_arguments_answer_in_registration_order() {
        let a = foo("a");
        let seq = MockSequence::new();
        a.in_sequence(&seq).setup_eq(100).returns(101);
        a.in_sequence(&seq).setup_eq(100).returns(102);
        a.in_sequence(&seq).setup_eq(200).returns(201);
        a.in_sequence(&seq).setup_eq(100).returns(103);

        assert_eq!(a.call(100).unwrap(), 101);
        assert_eq!(a.call(100).unwrap(), 102);
        assert_eq!(a.call(200).unwrap(), 201);
        assert_eq!(a.call(100).unwrap(), 103);
        a.verify_all().unwrap();
    }

    #[test]
    fn same_mock_right_order_then_nothing_left() {
        let a = foo("a");
        let seq = MockSequence::new();
        a.in_sequence(&seq).setup_eq(100).returns(101);
        a.in_sequence(&seq).setup_eq(200).returns(201);

        assert_eq!(a.call(100).unwrap(), 101);
        assert_eq!(a.call(200).unwrap(), 201);
        assert!(a.call(100).is_err());
        assert!(a.call(200).is_err());
    }

    #[test]
    fn same_mock_wrong_order_fails() {
        let a = foo("a");
        let seq = MockSequence::new();
        a.in_sequence(&seq).setup_eq(100).returns(101);
        a.in_sequence(&seq).setup_eq(200).returns(201);

        let err = a.call(200).unwrap_err();
        assert!(err.is_ordering_violation());
        assert_eq!(seq.cursor(), 0);
    }

    #[test]
    fn single_form_through_joint_api_behaves_the_same() {
        let (a, b) = (foo("a"), foo("b"));
        let seq = MockSequence::new();
        a.in_sequences(&[&seq]).unwrap().setup_eq(1).returns(1);
        b.in_sequences(&[&seq]).unwrap().setup_eq(2).returns(2);

        assert!(b.call(2).is_err());
        a.call(1).unwrap();
        b.call(2).unwrap();
    }

    #[test]
    fn cyclic_flag_set_after_registration_takes_effect() {
        let a = foo("a");
        let seq = MockSequence::new();
        a.in_sequence(&seq).setup_eq(1).returns(1);
        a.in_sequence(&seq).setup_eq(2).returns(2);
        seq.set_cyclic(true);

        for _ in 0..2 {
            a.call(1).unwrap();
            a.call(2).unwrap();
        }
    }

    #[test]
    fn finished_sequence_made_cyclic_runs_again() {
        let a = foo("a");
        let seq = MockSequence::new();
        a.in_sequence(&seq).setup_eq(1).returns(1);
        a.in_sequence(&seq).setup_eq(2).returns(2);
        a.call(1).unwrap();
        a.call(2).unwrap();
        assert!(a.call(1).is_err());

        seq.set_cyclic(true);
        assert_eq!(a.call(1).unwrap(), 1);
        assert_eq!(a.call(2).unwrap(), 2);
    }

    #[test]
    fn incomplete_sequence_is_reported() {
        let a = foo("a");
        let seq = MockSequence::named("checkout");
        a.in_sequence(&seq).setup_eq(1).returns(1);
        a.in_sequence(&seq).setup_eq(2).returns(2);
        a.call(1).unwrap();

        let err = seq.verify_complete().unwrap_err();
        assert_eq!(
            err.to_string(),
            "sequence 'checkout' incomplete: stopped at step 1 of 2"
        );
        assert!(a.verify_all().is_err());
    }
}

mod mixed_setups {
    use super::*;

    #[test]
    fn unordered_setups_coexist_with_ordered_ones() {
        let a = foo("a");
        let seq = MockSequence::new();
        a.setup(|x| *x < 0).returns(-1);
        a.in_sequence(&seq).setup_eq(1).returns(1);
        a.in_sequence(&seq).setup_eq(2).returns(2);

        assert_eq!(a.call(-5).unwrap(), -1);
        assert!(a.call(2).is_err());
        assert_eq!(a.call(-5).unwrap(), -1);
        assert_eq!(a.call(1).unwrap(), 1);
        assert_eq!(a.call(2).unwrap(), 2);
    }

    #[test]
    fn loose_mock_falls_back_when_out_of_order() {
        let a: Mock<i32, i32> = Mock::loose("a");
        let seq = MockSequence::new();
        a.in_sequence(&seq).setup_eq(1).returns(10);
        a.in_sequence(&seq).setup_eq(2).returns(20);

        assert_eq!(a.call(2).unwrap(), 0);
        assert_eq!(seq.cursor(), 0);
        assert_eq!(a.call(1).unwrap(), 10);
        assert_eq!(a.call(2).unwrap(), 20);
    }

    #[test]
    fn invocation_log_names_answering_setups() {
        let a = foo("a");
        let seq = MockSequence::new();
        let first = a.in_sequence(&seq).setup_eq(1).returns(1);
        let second = a.in_sequence(&seq).setup_eq(2).returns(2);

        a.call(1).unwrap();
        a.call(1).unwrap_err();
        a.call(2).unwrap();

        let answered: Vec<_> = a.invocations().into_iter().map(|i| i.setup).collect();
        assert_eq!(answered, vec![Some(first), None, Some(second)]);
        assert_eq!(a.hits(first), 1);
        assert_eq!(a.hits(second), 1);
    }
}
