//! Placement helpers layered over the core command surface.

pub mod place;

pub use place::{place_selected, select_next, select_prev, TapPlaceError};
