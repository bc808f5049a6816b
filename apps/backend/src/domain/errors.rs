use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::state::Seat;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Move submitted by a seat that does not own the turn.
    OutOfTurn,
    /// Move submitted by a connection holding neither seat.
    NotSeated,
    /// Move submitted before any session exists.
    NoSession,
    /// Operator failed boundary validation (non-integer, non-finite,
    /// or large enough to overflow the turn arithmetic).
    InvalidOperator(String),
    /// Move submitted after the game was already decided.
    GameOver { winner: Seat },
    /// Second player attempting to join an already-full session.
    AlreadyJoined,
    /// Operation invoked in a phase that does not permit it.
    PhaseMismatch,
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::OutOfTurn => write!(f, "out of turn"),
            DomainError::NotSeated => write!(f, "no seat held"),
            DomainError::NoSession => write!(f, "no session running"),
            DomainError::InvalidOperator(s) => write!(f, "invalid operator: {s}"),
            DomainError::GameOver { winner } => {
                write!(f, "game over, Player {} already won", winner.display_number())
            }
            DomainError::AlreadyJoined => write!(f, "second seat already joined"),
            DomainError::PhaseMismatch => write!(f, "phase mismatch"),
        }
    }
}

impl Error for DomainError {}
