//! Serializable copies of session state for broadcast to clients.

use serde::{Deserialize, Serialize};

use crate::domain::state::{GameSession, Phase, Seat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: Option<Seat>,
    pub numbers: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PhaseSnapshot {
    Waiting,
    Active,
    Won { winner: Seat },
}

/// Full shared state as clients see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player_one: PlayerSnapshot,
    pub player_two: PlayerSnapshot,
    pub moving_player: Seat,
    pub operations: Vec<i64>,
    #[serde(flatten)]
    pub state: PhaseSnapshot,
}

impl From<&GameSession> for GameSnapshot {
    fn from(session: &GameSession) -> Self {
        Self {
            player_one: PlayerSnapshot {
                id: session.player_one.id,
                numbers: session.player_one.numbers.clone(),
            },
            player_two: PlayerSnapshot {
                id: session.player_two.id,
                numbers: session.player_two.numbers.clone(),
            },
            moving_player: session.moving_player,
            operations: session.operations.clone(),
            state: match session.phase {
                Phase::Waiting => PhaseSnapshot::Waiting,
                Phase::Active => PhaseSnapshot::Active,
                Phase::Won { winner } => PhaseSnapshot::Won { winner },
            },
        }
    }
}

impl GameSession {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}
