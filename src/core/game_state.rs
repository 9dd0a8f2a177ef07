//! Game state module - manages the complete quiz session state
//!
//! This module ties together the catalog, RNG and scoring: it owns the
//! authoritative session state and handles phase transitions, placement
//! validation, correctness evaluation and card selection.

use arrayvec::ArrayVec;

use crate::core::catalog::Muscle;
use crate::core::rng::{shuffled_catalog, SimpleRng};
use crate::types::{GamePhase, Nerve, Subdivision, CATALOG_LEN};

/// An immutable record of one user assignment of a muscle to a nerve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub muscle: Muscle,
    pub placed_in: Nerve,
    pub correct: bool,
}

/// Immediate feedback returned by a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOutcome {
    pub correct: bool,
    /// The muscle's true nerve, so the caller needs no second lookup.
    pub nerve: Nerve,
    pub subdivision: Option<Subdivision>,
}

/// Signaled conditions for rejected placements. All are local and
/// recoverable; callers may silently ignore them (stale gestures).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// The id is not in the pending deck (already placed, or unknown).
    NotFound,
    /// The category identifier is outside the fixed nerve set.
    UnknownNerve,
    /// The session is not in the InProgress phase.
    NotPlaying,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotFound => "not_found",
            PlaceError::UnknownNerve => "unknown_nerve",
            PlaceError::NotPlaying => "not_playing",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotFound => "muscle is not pending (already placed or unknown id)",
            PlaceError::UnknownNerve => "no such nerve",
            PlaceError::NotPlaying => "no session in progress",
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    phase: GamePhase,
    /// Cards not yet placed, in shuffle order. Removal preserves the
    /// order of the remainder.
    pending: ArrayVec<Muscle, CATALOG_LEN>,
    /// Append-only, in placement order (not catalog order).
    placements: ArrayVec<Placement, CATALOG_LEN>,
    /// Card selected for a tap-to-place flow. UI coordination only.
    selection: Option<&'static str>,
    /// Monotonic session id (increments on every start).
    session_id: u32,
    rng: SimpleRng,
}

impl GameState {
    /// Create a new, not-yet-started session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            pending: ArrayVec::new(),
            placements: ArrayVec::new(),
            selection: None,
            session_id: 0,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn pending(&self) -> &[Muscle] {
        &self.pending
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn selection(&self) -> Option<&'static str> {
        self.selection
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    /// Current RNG state (for restarting with the same deck order)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// The currently selected pending card, if any.
    pub fn selected_muscle(&self) -> Option<&Muscle> {
        let id = self.selection?;
        self.pending.iter().find(|m| m.id == id)
    }

    /// (Re)start the session: shuffle a fresh deck, discard placements
    /// and selection. Valid from every phase; always succeeds.
    pub fn start(&mut self) {
        self.pending = shuffled_catalog(&mut self.rng);
        self.placements.clear();
        self.selection = None;
        self.session_id = self.session_id.wrapping_add(1);
        self.phase = GamePhase::InProgress;
    }

    /// Place a pending card into a nerve column.
    ///
    /// On success the card moves from `pending` to `placements` with its
    /// correctness computed once; the phase flips to `Complete` when the
    /// last card is placed. Rejected calls leave the state untouched.
    pub fn place(&mut self, muscle_id: &str, nerve: Nerve) -> Result<PlaceOutcome, PlaceError> {
        if self.phase != GamePhase::InProgress {
            return Err(PlaceError::NotPlaying);
        }

        let index = self
            .pending
            .iter()
            .position(|m| m.id == muscle_id)
            .ok_or(PlaceError::NotFound)?;

        // ArrayVec::remove shifts the tail down, preserving deck order.
        let muscle = self.pending.remove(index);
        let correct = muscle.nerve == nerve;
        self.placements.push(Placement {
            muscle,
            placed_in: nerve,
            correct,
        });

        if self.selection == Some(muscle.id) {
            self.selection = None;
        }

        if self.pending.is_empty() {
            self.phase = GamePhase::Complete;
        }

        Ok(PlaceOutcome {
            correct,
            nerve: muscle.nerve,
            subdivision: muscle.subdivision,
        })
    }

    /// String-boundary variant of [`place`](Self::place), used by the
    /// adapter. Unknown nerve names are rejected before any lookup.
    pub fn place_named(
        &mut self,
        muscle_id: &str,
        nerve: &str,
    ) -> Result<PlaceOutcome, PlaceError> {
        if self.phase != GamePhase::InProgress {
            return Err(PlaceError::NotPlaying);
        }
        let nerve = Nerve::from_str(nerve).ok_or(PlaceError::UnknownNerve)?;
        self.place(muscle_id, nerve)
    }

    /// Set or clear the tap-to-place selection.
    ///
    /// A non-null id must currently be pending; otherwise the call is a
    /// no-op and returns false. Carries no correctness logic.
    pub fn select(&mut self, muscle_id: Option<&str>) -> bool {
        match muscle_id {
            None => {
                self.selection = None;
                true
            }
            Some(id) => match self.pending.iter().find(|m| m.id == id) {
                Some(m) => {
                    self.selection = Some(m.id);
                    true
                }
                None => false,
            },
        }
    }

    pub fn snapshot_into(&self, out: &mut crate::core::snapshot::GameSnapshot) {
        use crate::core::snapshot::PlacementSnapshot;

        out.phase = self.phase;
        out.session_id = self.session_id;
        out.seed = self.rng.state();
        out.selection = self.selection;

        out.pending_ids.clear();
        out.pending_ids.extend(self.pending.iter().map(|m| m.id));

        out.placements.clear();
        out.placements
            .extend(self.placements.iter().map(PlacementSnapshot::from));

        out.placed_counts = [0; 3];
        for p in self.placements.iter() {
            let slot = match p.placed_in {
                Nerve::Median => 0,
                Nerve::Ulnar => 1,
                Nerve::Radial => 2,
            };
            out.placed_counts[slot] += 1;
        }
    }

    pub fn snapshot(&self) -> crate::core::snapshot::GameSnapshot {
        let mut s = crate::core::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
