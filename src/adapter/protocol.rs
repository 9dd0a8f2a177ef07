//! Protocol module - JSON message types for the remote adapter
//!
//! Line-delimited JSON. Every client message carries a `seq`; every reply
//! echoes the `seq` it answers. Clients must send `hello` before anything
//! else.

use serde::{Deserialize, Serialize};

use crate::core::{GameSnapshot, PlaceOutcome, ScoreSummary};
use crate::types::GamePhase;

pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Client -> server messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Hello {
        seq: u64,
        client: ClientInfo,
    },
    Command {
        seq: u64,
        #[serde(flatten)]
        op: CommandOp,
    },
    Query {
        seq: u64,
        target: QueryTarget,
    },
}

impl ClientMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ClientMessage::Hello { seq, .. }
            | ClientMessage::Command { seq, .. }
            | ClientMessage::Query { seq, .. } => *seq,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

/// Command payload, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CommandOp {
    Start,
    Select {
        #[serde(default)]
        muscle: Option<String>,
    },
    Place {
        muscle: String,
        nerve: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryTarget {
    State,
    Score,
}

/// Server -> client messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol_version: String,
        catalog_len: usize,
    },
    Ack {
        seq: u64,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        place: Option<PlaceResult>,
    },
    Error {
        seq: u64,
        code: String,
        message: String,
    },
    State {
        seq: u64,
        state: StateBody,
    },
    Score {
        seq: u64,
        score: ScoreBody,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub muscle: String,
    pub correct: bool,
    /// The muscle's true nerve.
    pub nerve: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subdivision: Option<String>,
}

impl PlaceResult {
    pub fn new(muscle: &str, outcome: &PlaceOutcome) -> Self {
        Self {
            muscle: muscle.to_string(),
            correct: outcome.correct,
            nerve: outcome.nerve.as_str().to_string(),
            subdivision: outcome.subdivision.map(|s| s.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementBody {
    pub muscle: String,
    pub placed_in: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateBody {
    pub phase: String,
    pub session_id: u32,
    pub pending: Vec<String>,
    pub placements: Vec<PlacementBody>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub selection: Option<String>,
}

impl StateBody {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        Self {
            phase: phase_str(snapshot.phase).to_string(),
            session_id: snapshot.session_id,
            pending: snapshot.pending_ids.iter().map(|s| s.to_string()).collect(),
            placements: snapshot
                .placements
                .iter()
                .map(|p| PlacementBody {
                    muscle: p.id.to_string(),
                    placed_in: p.placed_in.as_str().to_string(),
                    correct: p.correct,
                })
                .collect(),
            selection: snapshot.selection.map(|s| s.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBody {
    pub correct: u32,
    pub total: u32,
    pub percent: u32,
    pub tier: String,
    pub subtitle: String,
}

impl From<ScoreSummary> for ScoreBody {
    fn from(value: ScoreSummary) -> Self {
        Self {
            correct: value.correct,
            total: value.total,
            percent: value.percent,
            tier: value.tier.label.to_string(),
            subtitle: value.tier.subtitle.to_string(),
        }
    }
}

pub fn phase_str(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::NotStarted => "not_started",
        GamePhase::InProgress => "in_progress",
        GamePhase::Complete => "complete",
    }
}

/// Best-effort `seq` recovery from a line that failed to parse, so the
/// error reply can still reference it.
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest
        .as_bytes()
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hello() {
        let line = r#"{"type":"hello","seq":1,"client":{"name":"bot","version":"0.1"}}"#;
        let msg: ClientMessage = serde_json::from_str(line).unwrap();
        assert_eq!(msg.seq(), 1);
        assert!(matches!(msg, ClientMessage::Hello { .. }));
    }

    #[test]
    fn parse_place_command() {
        let line = r#"{"type":"command","seq":7,"op":"place","muscle":"fpl","nerve":"median"}"#;
        let msg: ClientMessage = serde_json::from_str(line).unwrap();
        match msg {
            ClientMessage::Command {
                seq,
                op: CommandOp::Place { muscle, nerve },
            } => {
                assert_eq!(seq, 7);
                assert_eq!(muscle, "fpl");
                assert_eq!(nerve, "median");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn parse_select_without_muscle_clears() {
        let line = r#"{"type":"command","seq":2,"op":"select"}"#;
        let msg: ClientMessage = serde_json::from_str(line).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Command {
                seq: 2,
                op: CommandOp::Select { muscle: None }
            }
        );
    }

    #[test]
    fn parse_query() {
        let line = r#"{"type":"query","seq":3,"target":"score"}"#;
        let msg: ClientMessage = serde_json::from_str(line).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Query {
                seq: 3,
                target: QueryTarget::Score
            }
        );
    }

    #[test]
    fn serialize_error_reply() {
        let msg = ServerMessage::Error {
            seq: 9,
            code: "not_found".to_string(),
            message: "muscle is not pending (already placed or unknown id)".to_string(),
        };
        let line = serde_json::to_string(&msg).unwrap();
        assert!(line.contains(r#""type":"error""#));
        assert!(line.contains(r#""seq":9"#));
        assert!(line.contains("not_found"));
    }

    #[test]
    fn ack_omits_empty_place_result() {
        let msg = ServerMessage::Ack { seq: 4, place: None };
        let line = serde_json::to_string(&msg).unwrap();
        assert!(!line.contains("place"));
    }

    #[test]
    fn server_message_round_trip() {
        let msg = ServerMessage::Score {
            seq: 5,
            score: ScoreBody {
                correct: 7,
                total: 8,
                percent: 88,
                tier: "Ready for the OR".to_string(),
                subtitle: "The attending might actually let you close.".to_string(),
            },
        };
        let line = serde_json::to_string(&msg).unwrap();
        let parsed: ServerMessage = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn seq_recovery_from_malformed_line() {
        assert_eq!(
            extract_seq_best_effort(r#"{"type":"command","seq": 41,"op":"bogus"}"#),
            Some(41)
        );
        assert_eq!(extract_seq_best_effort("not json at all"), None);
    }
}
