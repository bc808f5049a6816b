//! The turn engine: pure move arithmetic and state transitions.
//!
//! No I/O happens here; the transport edge applies the returned
//! [`MoveOutcome`] to its notification fan-out.

use crate::domain::errors::DomainError;
use crate::domain::state::{GameSession, Phase, Seat};

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The new number was handed to the opponent, who moves next.
    Continue { new_number: i64, next: Seat },
    /// The move produced 1; the acting seat wins. The winning number is
    /// not pushed to any sequence.
    Win { winner: Seat },
}

/// `round((last + operator) / 3)` in integer arithmetic.
///
/// Rounding is half-away-from-zero, though with an odd divisor no exact
/// .5 tie can occur, so the mode is unobservable. Addition is checked:
/// an operator large enough to overflow is rejected rather than wrapped.
pub fn compute_new_number(last: i64, operator: i64) -> Result<i64, DomainError> {
    let sum = last
        .checked_add(operator)
        .ok_or_else(|| DomainError::InvalidOperator("operator overflows turn arithmetic".into()))?;
    let quotient = sum / 3;
    let remainder = sum % 3;
    // |remainder| is 0, 1 or 2; only 2 is past the halfway point.
    let adjust = match remainder {
        2 => 1,
        -2 => -1,
        _ => 0,
    };
    Ok(quotient + adjust)
}

/// Applies one move by `seat` against the session.
///
/// The operator is recorded only once the move is accepted: rejected
/// submissions leave `operations` untouched, so its length always equals
/// the number of accepted moves, including the winning one. The acting
/// player's own sequence never receives the new number; only the opponent
/// does, which is what drives the alternation.
pub fn apply_move(
    session: &mut GameSession,
    seat: Seat,
    operator: i64,
) -> Result<MoveOutcome, DomainError> {
    if let Phase::Won { winner } = session.phase {
        return Err(DomainError::GameOver { winner });
    }
    if session.phase != Phase::Active {
        return Err(DomainError::PhaseMismatch);
    }
    if seat != session.moving_player {
        return Err(DomainError::OutOfTurn);
    }

    let (acting, _) = session.players_for(seat).ok_or(DomainError::NotSeated)?;
    let last = *acting
        .numbers
        .last()
        .ok_or(DomainError::PhaseMismatch)?;
    let new_number = compute_new_number(last, operator)?;

    session.operations.push(operator);

    if new_number == 1 {
        session.phase = Phase::Won { winner: seat };
        return Ok(MoveOutcome::Win { winner: seat });
    }

    let (_, other) = session
        .players_for(seat)
        .ok_or(DomainError::NotSeated)?;
    other.numbers.push(new_number);
    let next = seat.other();
    session.moving_player = next;
    Ok(MoveOutcome::Continue { new_number, next })
}
