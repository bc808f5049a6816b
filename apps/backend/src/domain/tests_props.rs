#![cfg(test)]

use proptest::prelude::*;

use crate::domain::engine::{apply_move, compute_new_number, MoveOutcome};
use crate::domain::state::{GameSession, Phase, Seat};

proptest! {
    /// The integer rounding agrees with the floating-point reference
    /// (f64::round is half-away-from-zero) across the range a real game
    /// can reach.
    #[test]
    fn rounding_matches_f64_reference(last in -1_000_000i64..=1_000_000, op in -1_000_000i64..=1_000_000) {
        let got = compute_new_number(last, op).unwrap();
        let want = ((last + op) as f64 / 3.0).round() as i64;
        prop_assert_eq!(got, want);
    }

    /// Deterministic and pure: same inputs, same output.
    #[test]
    fn rounding_is_deterministic(last in any::<i32>(), op in any::<i32>()) {
        let a = compute_new_number(last as i64, op as i64).unwrap();
        let b = compute_new_number(last as i64, op as i64).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Over any sequence of accepted moves: the turn alternates after every
    /// non-winning move, `operations` grows by exactly one per accepted
    /// move, and nothing is accepted after a win.
    #[test]
    fn alternation_and_operation_count(seed in 2i64..=56, ops in proptest::collection::vec(-50i64..=50, 1..40)) {
        let mut session = GameSession::start(Seat::A, seed);
        session.join(Seat::B).unwrap();

        let mut accepted = 0usize;
        for op in ops {
            let mover = session.moving_player;
            match apply_move(&mut session, mover, op) {
                Ok(MoveOutcome::Continue { next, .. }) => {
                    accepted += 1;
                    prop_assert_eq!(next, mover.other());
                    prop_assert_eq!(session.moving_player, mover.other());
                }
                Ok(MoveOutcome::Win { winner }) => {
                    accepted += 1;
                    prop_assert_eq!(winner, mover);
                    prop_assert_eq!(session.phase, Phase::Won { winner: mover });
                    // Terminal: a further submission from either seat fails.
                    prop_assert!(apply_move(&mut session, mover, op).is_err());
                    prop_assert!(apply_move(&mut session, mover.other(), op).is_err());
                    break;
                }
                Err(_) => unreachable!("in-range operator from the turn owner is always accepted"),
            }
        }
        prop_assert_eq!(session.operations.len(), accepted);
    }
}
