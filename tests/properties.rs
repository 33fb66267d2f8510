//! Property-based tests for the undo-redo cursor.

use proptest::prelude::*;
use tally::{Decimal, Operator, Session, Status};

prop_compose! {
    fn arbitrary_operator()(variant in 0..3u8) -> Operator {
        match variant {
            0 => Operator::Add,
            1 => Operator::Subtract,
            _ => Operator::Multiply,
        }
    }
}

prop_compose! {
    fn arbitrary_operand()(n in -100i64..100, scale in 0u32..3) -> Decimal {
        Decimal::new(n, scale)
    }
}

fn run(seed: Decimal, ops: &[(Operator, Decimal)]) -> Session {
    let mut session = Session::new();
    session.set_operand(seed);
    for &(operator, operand) in ops {
        session.set_operator(operator);
        session.set_operand(operand);
        session.calculate().unwrap();
    }
    session
}

proptest! {
    #[test]
    fn undo_then_redo_restores_last_result(
        seed in arbitrary_operand(),
        ops in prop::collection::vec((arbitrary_operator(), arbitrary_operand()), 2..10),
    ) {
        let mut session = run(seed, &ops);
        let n = session.len();
        let last = session.accumulated();
        for _ in 0..n - 1 {
            prop_assert_eq!(session.undo().status, Status::Moved);
        }
        prop_assert_eq!(session.head(), Some(0));
        for _ in 0..n - 1 {
            prop_assert_eq!(session.redo().status, Status::Moved);
        }
        prop_assert_eq!(session.accumulated(), last);
    }

    #[test]
    fn boundaries_are_idempotent(
        seed in arbitrary_operand(),
        ops in prop::collection::vec((arbitrary_operator(), arbitrary_operand()), 1..8),
        repeats in 1..5usize,
    ) {
        let mut session = run(seed, &ops);
        for _ in 0..ops.len() {
            session.undo();
        }
        let bottom = session.peek();
        let cursor = session.cursor();
        let status = session.undo().status;
        prop_assert!(status.is_noop());
        for _ in 0..repeats {
            prop_assert_eq!(session.undo().status, status);
            prop_assert_eq!(session.peek(), bottom);
            prop_assert_eq!(session.cursor(), cursor);
        }

        session.go_to(session.len() - 1);
        let top = session.peek();
        let status = session.redo().status;
        prop_assert!(status.is_noop());
        for _ in 0..repeats {
            prop_assert_eq!(session.redo().status, status);
            prop_assert_eq!(session.peek(), top);
        }
    }

    #[test]
    fn branch_cut_keeps_prefix(
        seed in arbitrary_operand(),
        ops in prop::collection::vec((arbitrary_operator(), arbitrary_operand()), 2..10),
        back in 1..9usize,
        operand in arbitrary_operand(),
    ) {
        let mut session = run(seed, &ops);
        let before = session.entries().copied().collect::<Vec<_>>();
        let back = back.min(before.len() - 1);
        for _ in 0..back {
            session.undo();
        }
        let head = session.head().unwrap();
        session.set_operand(operand);
        session.calculate().unwrap();

        let after = session.entries().copied().collect::<Vec<_>>();
        prop_assert_eq!(after.len(), head + 2);
        prop_assert_eq!(&after[..=head], &before[..=head]);
        prop_assert_eq!(session.head(), Some(head + 1));
        prop_assert!(session.redo().status.is_noop());
        prop_assert!(!session.can_redo());
    }
}
