//! Read-only snapshot of the observable session state, consumed by
//! renderers and the adapter. `snapshot_into` reuses the caller's buffers.

use arrayvec::ArrayVec;

use crate::core::game_state::Placement;
use crate::types::{GamePhase, Nerve, CATALOG_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSnapshot {
    pub id: &'static str,
    pub name: &'static str,
    pub placed_in: Nerve,
    pub correct: bool,
}

impl From<&Placement> for PlacementSnapshot {
    fn from(value: &Placement) -> Self {
        Self {
            id: value.muscle.id,
            name: value.muscle.name,
            placed_in: value.placed_in,
            correct: value.correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub session_id: u32,
    pub seed: u32,
    pub selection: Option<&'static str>,
    /// Pending ids in deck order.
    pub pending_ids: ArrayVec<&'static str, CATALOG_LEN>,
    /// In placement order.
    pub placements: ArrayVec<PlacementSnapshot, CATALOG_LEN>,
    /// Cards placed per column, indexed Median/Ulnar/Radial.
    pub placed_counts: [usize; 3],
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.session_id = 0;
        self.seed = 0;
        self.selection = None;
        self.pending_ids.clear();
        self.placements.clear();
        self.placed_counts = [0; 3];
    }

    pub fn finished(&self) -> bool {
        self.phase == GamePhase::Complete
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: GamePhase::NotStarted,
            session_id: 0,
            seed: 0,
            selection: None,
            pending_ids: ArrayVec::new(),
            placements: ArrayVec::new(),
            placed_counts: [0; 3],
        }
    }
}
