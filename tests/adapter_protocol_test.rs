//! Wire-format tests for the adapter protocol

use nerve_sort::adapter::{ClientMessage, CommandOp, QueryTarget, ServerMessage};
use nerve_sort::adapter::protocol::{PlacementBody, ScoreBody, StateBody};
use nerve_sort::core::GameState;
use nerve_sort::types::Nerve;

#[test]
fn client_messages_parse_from_documented_lines() {
    let lines = [
        r#"{"type":"hello","seq":1,"client":{"name":"bot","version":"1.0"}}"#,
        r#"{"type":"command","seq":2,"op":"start"}"#,
        r#"{"type":"command","seq":3,"op":"select","muscle":"fpl"}"#,
        r#"{"type":"command","seq":4,"op":"select"}"#,
        r#"{"type":"command","seq":5,"op":"place","muscle":"fpl","nerve":"median"}"#,
        r#"{"type":"query","seq":6,"target":"state"}"#,
        r#"{"type":"query","seq":7,"target":"score"}"#,
    ];

    for (i, line) in lines.iter().enumerate() {
        let msg: ClientMessage = serde_json::from_str(line)
            .unwrap_or_else(|e| panic!("line {} failed to parse: {}", i, e));
        assert_eq!(msg.seq(), (i + 1) as u64);
    }
}

#[test]
fn select_none_round_trips() {
    let msg = ClientMessage::Command {
        seq: 4,
        op: CommandOp::Select { muscle: None },
    };
    let line = serde_json::to_string(&msg).unwrap();
    let parsed: ClientMessage = serde_json::from_str(&line).unwrap();
    assert_eq!(parsed, msg);
}

#[test]
fn unknown_type_is_rejected() {
    let result = serde_json::from_str::<ClientMessage>(r#"{"type":"reboot","seq":1}"#);
    assert!(result.is_err());
}

#[test]
fn unknown_op_is_rejected() {
    let result =
        serde_json::from_str::<ClientMessage>(r#"{"type":"command","seq":1,"op":"undo"}"#);
    assert!(result.is_err());
}

#[test]
fn query_target_is_closed() {
    let result =
        serde_json::from_str::<ClientMessage>(r#"{"type":"query","seq":1,"target":"tiers"}"#);
    assert!(result.is_err());
    let msg: ClientMessage =
        serde_json::from_str(r#"{"type":"query","seq":1,"target":"state"}"#).unwrap();
    assert_eq!(
        msg,
        ClientMessage::Query {
            seq: 1,
            target: QueryTarget::State
        }
    );
}

#[test]
fn state_body_mirrors_snapshot() {
    let mut state = GameState::new(2);
    state.start();
    state.place("fcu", Nerve::Ulnar).unwrap();
    state.select(Some(state.pending()[0].id));

    let body = StateBody::from_snapshot(&state.snapshot());
    assert_eq!(body.phase, "in_progress");
    assert_eq!(body.pending.len(), 28);
    assert_eq!(
        body.placements,
        vec![PlacementBody {
            muscle: "fcu".to_string(),
            placed_in: "ulnar".to_string(),
            correct: true,
        }]
    );
    assert!(body.selection.is_some());

    // And it serializes round-trip inside a server message.
    let msg = ServerMessage::State { seq: 8, state: body };
    let line = serde_json::to_string(&msg).unwrap();
    let parsed: ServerMessage = serde_json::from_str(&line).unwrap();
    assert_eq!(parsed, msg);
}

#[test]
fn score_body_carries_tier_text() {
    let mut state = GameState::new(2);
    state.start();
    state.place("fcu", Nerve::Ulnar).unwrap();

    let body = ScoreBody::from(nerve_sort::core::score(state.placements()));
    assert_eq!(body.percent, 100);
    assert_eq!(body.tier, "Certified Hand Nerd");
    assert!(!body.subtitle.is_empty());
}
