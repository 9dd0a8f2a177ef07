//! Scoring module - aggregate score and qualitative tier
//!
//! Pure functions over a (possibly partial) placement sequence. Percent is
//! rounded half-up, fixed here by integer arithmetic so boundary values like
//! 87.5% resolve the same way on every platform.

use crate::core::game_state::Placement;

/// A qualitative result band, selected by percent threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTier {
    pub label: &'static str,
    pub subtitle: &'static str,
    /// Inclusive lower bound.
    pub min_percent: u32,
}

/// Tiers ordered from highest threshold to lowest; the last threshold is 0
/// so a tier always matches.
pub static TIERS: [ScoreTier; 4] = [
    ScoreTier {
        label: "Certified Hand Nerd",
        subtitle: "You probably dream about the carpal tunnel.",
        min_percent: 100,
    },
    ScoreTier {
        label: "Ready for the OR",
        subtitle: "The attending might actually let you close.",
        min_percent: 75,
    },
    ScoreTier {
        label: "Netter Notice",
        subtitle: "Back to the books!",
        min_percent: 50,
    },
    ScoreTier {
        label: "Dude, Did You Even Study?",
        subtitle: "That little short one on the side? That's called the thumb.",
        min_percent: 0,
    },
];

/// Aggregate score over a placement sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub correct: u32,
    pub total: u32,
    pub percent: u32,
    pub tier: &'static ScoreTier,
}

/// Round-half-up percentage; 0 when `total` is 0.
///
/// `(200c + t) / 2t` is the integer form of `round(100c / t)` with exact
/// halves rounding up: 7/8 gives 88, not 87.
pub fn percent_round_half_up(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (200 * correct + total) / (2 * total)
}

/// First tier (descending thresholds) whose bound the percent meets.
pub fn tier_for_percent(percent: u32) -> &'static ScoreTier {
    TIERS
        .iter()
        .find(|t| percent >= t.min_percent)
        .unwrap_or(&TIERS[TIERS.len() - 1])
}

/// Score a placement sequence. Works on partial sequences too ("score so
/// far"); idempotent, no hidden state.
pub fn score(placements: &[Placement]) -> ScoreSummary {
    let correct = placements.iter().filter(|p| p.correct).count() as u32;
    let total = placements.len() as u32;
    let percent = percent_round_half_up(correct, total);

    ScoreSummary {
        correct,
        total,
        percent,
        tier: tier_for_percent(percent),
    }
}

/// The one-line shareable summary shown on the results screen.
pub fn share_line(summary: &ScoreSummary) -> String {
    format!(
        "I scored {}% on the Hand Nerd Detector! \"{}\"",
        summary.percent, summary.tier.label
    )
}
