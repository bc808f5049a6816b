#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod health;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod ws;

// Re-exports for public API
pub use config::GameConfig;
pub use domain::{DomainError, GameSession, GameSnapshot, MoveOutcome, Seat};
pub use error::AppError;
pub use middleware::cors::cors_middleware;
pub use services::{ConnectOutcome, DisconnectOutcome, SessionManager};
pub use state::AppState;
