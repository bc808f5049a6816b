//! JSON message catalog for the WebSocket channel.

use serde::{Deserialize, Serialize};

use crate::domain::{GameSnapshot, Seat};

/// Fixed waiting-banner texts shown to clients.
pub mod notices {
    /// Seated alone, opponent not yet joined.
    pub const WAITING: &str = "Waiting for other player join...";
    /// Both seats taken; this connection never gets one.
    pub const BLOCKED: &str = "Please wait, game already running";
    /// It is the opponent's turn.
    pub const OTHER_MOVING: &str = "Wait, other Player is moving";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    /// The acting player's chosen operator for this turn. Kept as a raw
    /// JSON number so non-integer submissions can be rejected with a
    /// notice instead of failing the whole frame parse.
    SubmitMove { operator: serde_json::Number },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    /// Result of seat allocation; `None` is the "no seat" sentinel.
    SeatAssignment { seat: Option<Seat> },

    /// Full shared state, sent on activation and after every move.
    GameState { game: GameSnapshot },

    /// Free-text status/result notice.
    Info { text: String },

    /// Turn/seat status banner from the fixed catalog (or empty to clear).
    Waiting { text: String },
}

impl ServerMsg {
    pub fn info(text: impl Into<String>) -> Self {
        ServerMsg::Info { text: text.into() }
    }

    pub fn waiting(text: impl Into<String>) -> Self {
        ServerMsg::Waiting { text: text.into() }
    }
}

/// Boundary validation for a submitted operator: must be a finite integer
/// that fits i64. Floats, NaN and bignums never reach the turn engine.
pub fn parse_operator(raw: &serde_json::Number) -> Option<i64> {
    raw.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_move_parses_integer_operator() {
        let msg: ClientMsg =
            serde_json::from_str(r#"{"type":"submit_move","operator":-3}"#).unwrap();
        let ClientMsg::SubmitMove { operator } = msg;
        assert_eq!(parse_operator(&operator), Some(-3));
    }

    #[test]
    fn fractional_operator_is_rejected_at_the_boundary() {
        let msg: ClientMsg =
            serde_json::from_str(r#"{"type":"submit_move","operator":1.5}"#).unwrap();
        let ClientMsg::SubmitMove { operator } = msg;
        assert_eq!(parse_operator(&operator), None);
    }

    #[test]
    fn seat_assignment_uses_null_sentinel() {
        let rejected = serde_json::to_value(ServerMsg::SeatAssignment { seat: None }).unwrap();
        assert_eq!(rejected["type"], "seat_assignment");
        assert!(rejected["seat"].is_null());

        let seated = serde_json::to_value(ServerMsg::SeatAssignment {
            seat: Some(Seat::B),
        })
        .unwrap();
        assert_eq!(seated["seat"], 1);
    }

    #[test]
    fn waiting_catalog_is_verbatim() {
        assert_eq!(notices::WAITING, "Waiting for other player join...");
        assert_eq!(notices::BLOCKED, "Please wait, game already running");
        assert_eq!(notices::OTHER_MOVING, "Wait, other Player is moving");
    }
}
