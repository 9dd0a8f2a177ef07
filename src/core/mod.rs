//! Core game logic: catalog data, shuffler, placement engine, scoring.

pub mod catalog;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use catalog::{find_muscle, nerve_info, Muscle, NerveInfo, CATALOG, NERVE_INFO};
pub use game_state::{GameState, PlaceError, PlaceOutcome, Placement};
pub use rng::{entropy_seed, shuffled_catalog, SimpleRng};
pub use scoring::{
    percent_round_half_up, score, share_line, tier_for_percent, ScoreSummary, ScoreTier, TIERS,
};
pub use snapshot::{GameSnapshot, PlacementSnapshot};
