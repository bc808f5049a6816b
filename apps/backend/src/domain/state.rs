use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::errors::DomainError;

/// One of the two fixed player identities in the session.
///
/// Seat order is meaningful: the registry always fills `A` before `B`,
/// `A` becomes player one, and `B` receives the seeded start number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    A,
    B,
}

// On the wire a seat is its fixed index: `A` = 0, `B` = 1.
impl Serialize for Seat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for Seat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Seat::A),
            1 => Ok(Seat::B),
            other => Err(de::Error::custom(format!("invalid seat index: {other}"))),
        }
    }
}

impl Seat {
    /// Stable wire index: `A` = 0, `B` = 1.
    pub fn index(self) -> u8 {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }

    pub fn other(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    /// 1-based label used in player-facing notices ("Player 1", "Player 2").
    pub fn display_number(self) -> u8 {
        self.index() + 1
    }
}

/// Session progression phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Player one is seated; waiting for an opponent.
    Waiting,
    /// Both seats taken; moves are being exchanged.
    Active,
    /// A move reduced the number to 1.
    Won { winner: Seat },
}

/// One side of the game.
///
/// `numbers` is the ordered history of values *given to* this player,
/// oldest first. A player always computes their move from the last entry
/// of their own sequence; the result lands in the opponent's sequence.
#[derive(Debug, Clone)]
pub struct Player {
    /// `None` for player two until an opponent joins.
    pub id: Option<Seat>,
    pub numbers: Vec<i64>,
}

/// The single shared game instance: both players, turn ownership, and the
/// submission-ordered history of operators.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub player_one: Player,
    pub player_two: Player,
    pub moving_player: Seat,
    pub operations: Vec<i64>,
    pub phase: Phase,
}

impl GameSession {
    /// Creates a fresh session for the first seated player.
    ///
    /// Player two is not yet identified but is seeded with the start
    /// number so the first move (theirs, after joining) has something to
    /// compute from.
    pub fn start(seat_a: Seat, seed: i64) -> Self {
        Self {
            player_one: Player {
                id: Some(seat_a),
                numbers: Vec::new(),
            },
            player_two: Player {
                id: None,
                numbers: vec![seed],
            },
            moving_player: seat_a,
            operations: Vec::new(),
            phase: Phase::Waiting,
        }
    }

    /// Seats the second player and hands them the first move.
    pub fn join(&mut self, seat_b: Seat) -> Result<(), DomainError> {
        if self.phase != Phase::Waiting {
            return Err(DomainError::PhaseMismatch);
        }
        if self.player_two.id.is_some() {
            return Err(DomainError::AlreadyJoined);
        }
        self.player_two.id = Some(seat_b);
        self.moving_player = seat_b;
        self.phase = Phase::Active;
        Ok(())
    }

    /// Returns `(acting, other)` for the given seat, or `None` if the seat
    /// belongs to neither player.
    pub fn players_for(&mut self, seat: Seat) -> Option<(&mut Player, &mut Player)> {
        if self.player_one.id == Some(seat) {
            Some((&mut self.player_one, &mut self.player_two))
        } else if self.player_two.id == Some(seat) {
            Some((&mut self.player_two, &mut self.player_one))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_seeds_player_two_only() {
        let session = GameSession::start(Seat::A, 42);
        assert_eq!(session.player_one.id, Some(Seat::A));
        assert!(session.player_one.numbers.is_empty());
        assert_eq!(session.player_two.id, None);
        assert_eq!(session.player_two.numbers, vec![42]);
        assert_eq!(session.moving_player, Seat::A);
        assert!(session.operations.is_empty());
        assert_eq!(session.phase, Phase::Waiting);
    }

    #[test]
    fn join_hands_first_move_to_second_player() {
        let mut session = GameSession::start(Seat::A, 10);
        session.join(Seat::B).unwrap();
        assert_eq!(session.player_two.id, Some(Seat::B));
        assert_eq!(session.moving_player, Seat::B);
        assert_eq!(session.phase, Phase::Active);
    }

    #[test]
    fn join_twice_is_rejected() {
        let mut session = GameSession::start(Seat::A, 10);
        session.join(Seat::B).unwrap();
        assert_eq!(session.join(Seat::B), Err(DomainError::PhaseMismatch));
    }

    #[test]
    fn seat_arithmetic() {
        assert_eq!(Seat::A.other(), Seat::B);
        assert_eq!(Seat::B.other(), Seat::A);
        assert_eq!(Seat::A.index(), 0);
        assert_eq!(Seat::B.display_number(), 2);
    }
}
