//! Service layer: stateful coordination on top of the pure domain.

pub mod seats;
pub mod session_manager;

pub use session_manager::{ConnectOutcome, DisconnectOutcome, SessionManager};
