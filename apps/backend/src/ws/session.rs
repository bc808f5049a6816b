use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::engine::MoveOutcome;
use crate::domain::DomainError;
use crate::services::{ConnectOutcome, DisconnectOutcome, SessionManager};
use crate::state::AppState;
use crate::ws::hub::{Outbound, WsRegistry};
use crate::ws::protocol::{notices, parse_operator, ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = Uuid::new_v4();
    let session = WsSession::new(
        conn_id,
        app_state.session_manager(),
        app_state.ws_registry(),
    );
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    sessions: Arc<SessionManager>,
    registry: Arc<WsRegistry>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, sessions: Arc<SessionManager>, registry: Arc<WsRegistry>) -> Self {
        Self {
            conn_id,
            sessions,
            registry,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    /// Seat allocation choreography. The seat assignment always goes out
    /// first, null sentinel included, before any banner or snapshot.
    fn handle_connect(&self, ctx: &mut ws::WebsocketContext<Self>) {
        match self.sessions.connect(self.conn_id) {
            ConnectOutcome::Rejected => {
                Self::send_json(ctx, &ServerMsg::SeatAssignment { seat: None });
                Self::send_json(ctx, &ServerMsg::waiting(notices::BLOCKED));
            }
            ConnectOutcome::Seated { seat } => {
                Self::send_json(ctx, &ServerMsg::SeatAssignment { seat: Some(seat) });
                Self::send_json(ctx, &ServerMsg::waiting(notices::WAITING));
            }
            ConnectOutcome::Started { seat, snapshot } => {
                Self::send_json(ctx, &ServerMsg::SeatAssignment { seat: Some(seat) });
                let state_msg = ServerMsg::GameState {
                    game: snapshot.clone(),
                };
                Self::send_json(ctx, &state_msg);
                if seat == snapshot.moving_player {
                    // Normal join: this connection moves first, the
                    // earlier-seated player waits.
                    self.registry
                        .broadcast_except(self.conn_id, &ServerMsg::waiting(notices::OTHER_MOVING));
                } else {
                    // Reclaimed first seat into a restarted session: the
                    // remaining player needs the fresh snapshot and the
                    // newcomer waits for them.
                    self.registry.broadcast_except(self.conn_id, &state_msg);
                    Self::send_json(ctx, &ServerMsg::waiting(notices::OTHER_MOVING));
                }
            }
        }
    }

    fn handle_submit_move(&self, operator: i64, ctx: &mut ws::WebsocketContext<Self>) {
        debug!(conn_id = %self.conn_id, operator, "[WS SESSION] move submitted");
        match self.sessions.submit_move(self.conn_id, operator) {
            Ok((MoveOutcome::Continue { new_number, .. }, snapshot)) => {
                Self::send_json(ctx, &ServerMsg::waiting(notices::OTHER_MOVING));
                Self::send_json(
                    ctx,
                    &ServerMsg::info(format!(
                        "your move: {operator} --> new number: {new_number}"
                    )),
                );
                self.registry
                    .broadcast_except(self.conn_id, &ServerMsg::GameState { game: snapshot });
            }
            Ok((MoveOutcome::Win { winner }, _)) => {
                self.registry.broadcast_all(&ServerMsg::info(format!(
                    "Player {} is the winner",
                    winner.display_number()
                )));
                self.registry
                    .broadcast_except(self.conn_id, &ServerMsg::waiting(""));
            }
            Err(err) => self.reject_move(err, ctx),
        }
    }

    /// Rejected moves are terminal to this request only: the sender gets a
    /// notice, nobody else sees anything, the session is untouched.
    fn reject_move(&self, err: DomainError, ctx: &mut ws::WebsocketContext<Self>) {
        debug!(conn_id = %self.conn_id, error = %err, "[WS SESSION] move rejected");
        let msg = match err {
            DomainError::OutOfTurn => ServerMsg::waiting(notices::OTHER_MOVING),
            DomainError::NotSeated => ServerMsg::waiting(notices::BLOCKED),
            other => ServerMsg::info(other.to_string()),
        };
        Self::send_json(ctx, &msg);
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.registry
            .register(self.conn_id, ctx.address().recipient::<Outbound>());
        self.start_heartbeat(ctx);
        self.handle_connect(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.registry.unregister(self.conn_id);
        match self.sessions.disconnect(self.conn_id) {
            DisconnectOutcome::Freed { seat, reset } => {
                info!(
                    conn_id = %self.conn_id,
                    seat = ?seat,
                    reset = reset.is_some(),
                    "[WS SESSION] stopped, seat freed"
                );
                if let Some(survivor) = reset {
                    self.registry.send_to(
                        survivor,
                        &ServerMsg::info(format!(
                            "Player {} left the game",
                            seat.display_number()
                        )),
                    );
                    self.registry
                        .send_to(survivor, &ServerMsg::waiting(notices::WAITING));
                }
            }
            DisconnectOutcome::NotSeated => {
                info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
            }
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                let Ok(cmd) = parsed else {
                    Self::send_json(ctx, &ServerMsg::info("malformed message"));
                    return;
                };

                match cmd {
                    ClientMsg::SubmitMove { operator } => match parse_operator(&operator) {
                        Some(operator) => self.handle_submit_move(operator, ctx),
                        None => self.reject_move(
                            DomainError::InvalidOperator(format!(
                                "operator must be an integer, got {operator}"
                            )),
                            ctx,
                        ),
                    },
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_json(ctx, &ServerMsg::info("binary frames not supported"));
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
