//! The session manager: single owner of the seat registry and the one
//! global [`GameSession`], constructed once at startup and shared through
//! `AppState`.
//!
//! Every public operation takes one exclusive lock over registry and
//! session together. `connect`, `submit_move` and `disconnect` are each a
//! multi-step read-modify-write over shared fields (turn owner, number
//! sequences, seat occupancy) and must never interleave.

use parking_lot::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::domain::engine::{apply_move, MoveOutcome};
use crate::domain::rng::random_in_range;
use crate::domain::{DomainError, GameSession, GameSnapshot, Phase, Seat};
use crate::services::seats::SeatRegistry;

/// Result of seating (or refusing) a new connection.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectOutcome {
    /// Both seats were already held. The connection keeps its transport
    /// channel but never a seat.
    Rejected,
    /// Seated alone; a fresh session is waiting for an opponent.
    Seated { seat: Seat },
    /// Seating this connection filled the second seat; play begins.
    Started { seat: Seat, snapshot: GameSnapshot },
}

/// Result of a connection going away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// The connection held no seat; nothing changed.
    NotSeated,
    /// The seat was freed. `reset` carries the surviving player's
    /// connection when an in-progress session was discarded, so the
    /// caller can tell them to wait for a new opponent.
    Freed { seat: Seat, reset: Option<Uuid> },
}

struct Inner {
    registry: SeatRegistry,
    session: Option<GameSession>,
}

pub struct SessionManager {
    inner: Mutex<Inner>,
    config: GameConfig,
}

impl SessionManager {
    pub fn new(config: GameConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                registry: SeatRegistry::new(),
                session: None,
            }),
            config,
        }
    }

    fn seed(&self) -> i64 {
        random_in_range(self.config.max_number, self.config.min_number)
    }

    /// Seats an incoming connection, starting or activating the session.
    ///
    /// Claiming SeatA always (re)initializes the session, discarding any
    /// prior one. Claiming SeatB joins the waiting session; if none is
    /// live (the previous one was reset or already won), a fresh session
    /// is started for the SeatA occupant and joined immediately.
    pub fn connect(&self, conn_id: Uuid) -> ConnectOutcome {
        let mut inner = self.inner.lock();

        let Some(seat) = inner.registry.assign(conn_id) else {
            debug!(%conn_id, "both seats occupied, connection rejected");
            return ConnectOutcome::Rejected;
        };

        match seat {
            Seat::A => {
                let mut session = GameSession::start(Seat::A, self.seed());
                if inner.registry.occupant(Seat::B).is_some() {
                    // Reconnection into a freed SeatA while SeatB stayed:
                    // the held seat joins the fresh session right away.
                    session
                        .join(Seat::B)
                        .expect("fresh session always accepts the second seat");
                    let snapshot = session.snapshot();
                    inner.session = Some(session);
                    info!(%conn_id, seat = ?seat, "first seat reclaimed, session restarted");
                    ConnectOutcome::Started { seat, snapshot }
                } else {
                    inner.session = Some(session);
                    info!(%conn_id, seat = ?seat, "first player seated, waiting for opponent");
                    ConnectOutcome::Seated { seat }
                }
            }
            Seat::B => {
                let joinable = matches!(
                    inner.session.as_ref().map(|s| s.phase),
                    Some(Phase::Waiting)
                );
                if !joinable {
                    // No live waiting session (reset after a disconnect, or
                    // left over in Won). Start over for the SeatA occupant.
                    inner.session = Some(GameSession::start(Seat::A, self.seed()));
                }
                let session = inner
                    .session
                    .as_mut()
                    .expect("session populated above");
                session
                    .join(Seat::B)
                    .expect("waiting session always accepts the second seat");
                let snapshot = session.snapshot();
                info!(%conn_id, seat = ?seat, "second player seated, session active");
                ConnectOutcome::Started { seat, snapshot }
            }
        }
    }

    /// Applies one move from the given connection.
    pub fn submit_move(
        &self,
        conn_id: Uuid,
        operator: i64,
    ) -> Result<(MoveOutcome, GameSnapshot), DomainError> {
        let mut inner = self.inner.lock();

        let seat = inner
            .registry
            .seat_of(conn_id)
            .ok_or(DomainError::NotSeated)?;
        let session = inner.session.as_mut().ok_or(DomainError::NoSession)?;

        let outcome = apply_move(session, seat, operator)?;
        let snapshot = session.snapshot();
        match outcome {
            MoveOutcome::Continue { new_number, next } => {
                debug!(%conn_id, seat = ?seat, operator, new_number, next = ?next, "move applied");
            }
            MoveOutcome::Win { winner } => {
                info!(%conn_id, operator, winner = ?winner, "game won");
            }
        }
        Ok((outcome, snapshot))
    }

    /// Frees the seat held by a departing connection.
    ///
    /// Disconnect policy: any disconnect by a seated player discards the
    /// session (a mid-game departure must not leave the turn owner
    /// pointing at a freed seat). When an Active session is torn down
    /// with the other player still seated, `reset` names that player's
    /// connection so the caller can notify them.
    pub fn disconnect(&self, conn_id: Uuid) -> DisconnectOutcome {
        let mut inner = self.inner.lock();

        let Some(seat) = inner.registry.release_conn(conn_id) else {
            return DisconnectOutcome::NotSeated;
        };

        let was_active = matches!(
            inner.session.as_ref().map(|s| s.phase),
            Some(Phase::Active)
        );
        let survivor = inner.registry.occupant(seat.other());
        inner.session = None;

        let reset = if was_active { survivor } else { None };
        info!(%conn_id, seat = ?seat, reset = reset.is_some(), "player disconnected, seat freed");
        DisconnectOutcome::Freed { seat, reset }
    }

    /// Current session snapshot, if any.
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.inner.lock().session.as_ref().map(GameSession::snapshot)
    }

    /// Seat currently held by the connection, if any.
    pub fn seat_of(&self, conn_id: Uuid) -> Option<Seat> {
        self.inner.lock().registry.seat_of(conn_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(GameConfig::default())
    }

    #[test]
    fn first_two_connections_get_seats_third_is_rejected() {
        let mgr = manager();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        assert_eq!(mgr.connect(a), ConnectOutcome::Seated { seat: Seat::A });
        match mgr.connect(b) {
            ConnectOutcome::Started { seat, snapshot } => {
                assert_eq!(seat, Seat::B);
                assert_eq!(snapshot.moving_player, Seat::B);
                let seed = snapshot.player_two.numbers[0];
                assert!((2..=56).contains(&seed));
            }
            other => panic!("expected Started, got {other:?}"),
        }
        assert_eq!(mgr.connect(c), ConnectOutcome::Rejected);
        // Both seats remain occupied by the original holders.
        assert_eq!(mgr.seat_of(a), Some(Seat::A));
        assert_eq!(mgr.seat_of(b), Some(Seat::B));
        assert_eq!(mgr.seat_of(c), None);
    }

    #[test]
    fn unseated_connection_cannot_move() {
        let mgr = manager();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        mgr.connect(a);
        mgr.connect(b);
        mgr.connect(c);
        assert_eq!(mgr.submit_move(c, 1), Err(DomainError::NotSeated));
    }

    #[test]
    fn move_before_any_session_is_rejected() {
        let mgr = manager();
        assert_eq!(
            mgr.submit_move(Uuid::new_v4(), 1),
            Err(DomainError::NotSeated)
        );
    }

    #[test]
    fn disconnect_of_unseated_connection_is_a_noop() {
        let mgr = manager();
        assert_eq!(
            mgr.disconnect(Uuid::new_v4()),
            DisconnectOutcome::NotSeated
        );
    }

    #[test]
    fn active_disconnect_resets_the_session() {
        let mgr = manager();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        mgr.connect(a);
        mgr.connect(b);
        assert!(mgr.snapshot().is_some());

        // The reset names the surviving connection so it can be notified.
        assert_eq!(
            mgr.disconnect(a),
            DisconnectOutcome::Freed {
                seat: Seat::A,
                reset: Some(b)
            }
        );
        assert!(mgr.snapshot().is_none());
        // SeatB keeps its seat; the freed SeatA can be reclaimed and play
        // restarts from a fresh session.
        let newcomer = Uuid::new_v4();
        match mgr.connect(newcomer) {
            ConnectOutcome::Started { seat, snapshot } => {
                assert_eq!(seat, Seat::A);
                assert!(snapshot.operations.is_empty());
                assert_eq!(snapshot.moving_player, Seat::B);
            }
            other => panic!("expected Started, got {other:?}"),
        }
    }

    #[test]
    fn lone_waiting_player_leaving_clears_everything() {
        let mgr = manager();
        let a = Uuid::new_v4();
        mgr.connect(a);
        assert_eq!(
            mgr.disconnect(a),
            DisconnectOutcome::Freed {
                seat: Seat::A,
                reset: None
            }
        );
        assert!(mgr.snapshot().is_none());
    }

    #[test]
    fn second_seat_rejoining_after_reset_starts_fresh() {
        let mgr = manager();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        mgr.connect(a);
        mgr.connect(b);
        mgr.disconnect(b);
        // SeatA still held, session gone. A new SeatB occupant restarts.
        match mgr.connect(Uuid::new_v4()) {
            ConnectOutcome::Started { seat, snapshot } => {
                assert_eq!(seat, Seat::B);
                assert!(snapshot.operations.is_empty());
            }
            other => panic!("expected Started, got {other:?}"),
        }
    }
}
