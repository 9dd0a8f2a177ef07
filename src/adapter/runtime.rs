//! Adapter runtime integration.
//!
//! Bridges the sync game loop with the async TCP server. The loop owns
//! `GameState`; server tasks only parse and route, so there is exactly one
//! writer of core state.

use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::adapter::protocol::{PlaceResult, ServerMessage, StateBody};
use crate::adapter::server::{run_server, ServerConfig};
use crate::core::{score, GameState};

/// Command delivered to the game loop.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub command: ClientCommand,
}

/// Command payload.
#[derive(Debug, Clone)]
pub enum ClientCommand {
    Start,
    Select(Option<String>),
    Place { muscle: String, nerve: String },
    QueryState,
    QueryScore,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClient { client_id: usize, line: String },
    Broadcast { line: String },
}

/// Apply one remote command to the game state and build the reply.
///
/// This is the whole command surface of the adapter; it runs on the game
/// loop thread.
pub fn apply_command(state: &mut GameState, cmd: &InboundCommand) -> ServerMessage {
    match &cmd.command {
        ClientCommand::Start => {
            state.start();
            ServerMessage::Ack {
                seq: cmd.seq,
                place: None,
            }
        }
        ClientCommand::Select(muscle) => {
            if state.select(muscle.as_deref()) {
                ServerMessage::Ack {
                    seq: cmd.seq,
                    place: None,
                }
            } else {
                ServerMessage::Error {
                    seq: cmd.seq,
                    code: "not_found".to_string(),
                    message: "muscle is not pending (already placed or unknown id)".to_string(),
                }
            }
        }
        ClientCommand::Place { muscle, nerve } => match state.place_named(muscle, nerve) {
            Ok(outcome) => ServerMessage::Ack {
                seq: cmd.seq,
                place: Some(PlaceResult::new(muscle, &outcome)),
            },
            Err(err) => ServerMessage::Error {
                seq: cmd.seq,
                code: err.code().to_string(),
                message: err.message().to_string(),
            },
        },
        ClientCommand::QueryState => ServerMessage::State {
            seq: cmd.seq,
            state: StateBody::from_snapshot(&state.snapshot()),
        },
        ClientCommand::QueryScore => ServerMessage::Score {
            seq: cmd.seq,
            score: score(state.placements()).into(),
        },
    }
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns None if `NERVE_SORT_DISABLED` is set.
    pub fn start_from_env() -> Option<Self> {
        if ServerConfig::is_disabled() {
            return None;
        }

        let config = ServerConfig::from_env();
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();

        let rt = Runtime::new().ok()?;
        rt.spawn(async move {
            let _ = run_server(config, cmd_tx, out_rx, None).await;
        });

        Some(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
        })
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GamePhase, CATALOG_LEN};

    fn cmd(command: ClientCommand) -> InboundCommand {
        InboundCommand {
            client_id: 0,
            seq: 11,
            command,
        }
    }

    #[test]
    fn start_command_starts_a_session() {
        let mut state = GameState::new(3);
        let reply = apply_command(&mut state, &cmd(ClientCommand::Start));
        assert!(matches!(reply, ServerMessage::Ack { seq: 11, .. }));
        assert_eq!(state.phase(), GamePhase::InProgress);
    }

    #[test]
    fn place_command_reports_outcome() {
        let mut state = GameState::new(3);
        state.start();

        let reply = apply_command(
            &mut state,
            &cmd(ClientCommand::Place {
                muscle: "fcu".to_string(),
                nerve: "ulnar".to_string(),
            }),
        );

        match reply {
            ServerMessage::Ack {
                seq: 11,
                place: Some(result),
            } => {
                assert!(result.correct);
                assert_eq!(result.nerve, "ulnar");
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn place_errors_carry_stable_codes() {
        let mut state = GameState::new(3);

        let reply = apply_command(
            &mut state,
            &cmd(ClientCommand::Place {
                muscle: "fcu".to_string(),
                nerve: "ulnar".to_string(),
            }),
        );
        match reply {
            ServerMessage::Error { code, .. } => assert_eq!(code, "not_playing"),
            other => panic!("unexpected reply: {:?}", other),
        }

        state.start();
        let reply = apply_command(
            &mut state,
            &cmd(ClientCommand::Place {
                muscle: "fcu".to_string(),
                nerve: "sciatic".to_string(),
            }),
        );
        match reply {
            ServerMessage::Error { code, .. } => assert_eq!(code, "unknown_nerve"),
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn query_state_reflects_pending() {
        let mut state = GameState::new(3);
        state.start();

        let reply = apply_command(&mut state, &cmd(ClientCommand::QueryState));
        match reply {
            ServerMessage::State { state: body, .. } => {
                assert_eq!(body.phase, "in_progress");
                assert_eq!(body.pending.len(), CATALOG_LEN);
                assert!(body.placements.is_empty());
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn query_score_mid_game() {
        let mut state = GameState::new(3);
        state.start();
        state.place_named("fcu", "ulnar").unwrap();
        state.place_named("fds", "radial").unwrap();

        let reply = apply_command(&mut state, &cmd(ClientCommand::QueryScore));
        match reply {
            ServerMessage::Score { score: body, .. } => {
                assert_eq!(body.correct, 1);
                assert_eq!(body.total, 2);
                assert_eq!(body.percent, 50);
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn select_unknown_muscle_errors() {
        let mut state = GameState::new(3);
        state.start();
        let reply = apply_command(
            &mut state,
            &cmd(ClientCommand::Select(Some("biceps".to_string()))),
        );
        assert!(matches!(reply, ServerMessage::Error { .. }));
    }
}
