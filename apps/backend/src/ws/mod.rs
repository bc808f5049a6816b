//! WebSocket edge: per-connection actors, message protocol, and the
//! connection hub used for notification fan-out.

pub mod hub;
pub mod protocol;
pub mod session;
