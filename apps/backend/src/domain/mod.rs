//! Domain layer: pure game logic types and helpers.

pub mod engine;
pub mod errors;
pub mod rng;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod tests_props;

pub use engine::{apply_move, compute_new_number, MoveOutcome};
pub use errors::DomainError;
pub use snapshot::GameSnapshot;
pub use state::{GameSession, Phase, Player, Seat};
