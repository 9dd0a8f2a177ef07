//! Tap-to-place flow: pairs the stored selection with a placement, and
//! cycles the selection through the pending deck for keyboard front-ends.

use crate::core::{GameState, PlaceError, PlaceOutcome};
use crate::types::Nerve;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapPlaceError {
    NoSelection,
    NotFound,
    NotPlaying,
}

impl From<PlaceError> for TapPlaceError {
    fn from(value: PlaceError) -> Self {
        match value {
            PlaceError::NotFound => TapPlaceError::NotFound,
            PlaceError::NotPlaying => TapPlaceError::NotPlaying,
            // Unreachable from the typed path; kept total for the adapter.
            PlaceError::UnknownNerve => TapPlaceError::NotFound,
        }
    }
}

/// Place the currently selected card into `nerve`.
pub fn place_selected(state: &mut GameState, nerve: Nerve) -> Result<PlaceOutcome, TapPlaceError> {
    let Some(id) = state.selection() else {
        return Err(TapPlaceError::NoSelection);
    };

    Ok(state.place(id, nerve)?)
}

/// Move the selection to the next pending card (wrapping). Selects the
/// first card when nothing is selected. Returns false on an empty deck.
pub fn select_next(state: &mut GameState) -> bool {
    step_selection(state, 1)
}

/// Move the selection to the previous pending card (wrapping).
pub fn select_prev(state: &mut GameState) -> bool {
    step_selection(state, -1)
}

fn step_selection(state: &mut GameState, dir: isize) -> bool {
    let len = state.pending().len();
    if len == 0 {
        return false;
    }

    let current = state
        .selection()
        .and_then(|id| state.pending().iter().position(|m| m.id == id));

    let index = match current {
        Some(i) => (i as isize + dir).rem_euclid(len as isize) as usize,
        None if dir >= 0 => 0,
        None => len - 1,
    };

    let id = state.pending()[index].id;
    state.select(Some(id))
}
