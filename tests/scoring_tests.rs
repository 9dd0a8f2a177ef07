//! Scoring behavior pinned through the public API

use nerve_sort::core::{percent_round_half_up, score, tier_for_percent, GameState, TIERS};
use nerve_sort::types::Nerve;

#[test]
fn rounding_rule_is_half_up() {
    // 7/8 = 87.5% must round to 88, never 87.
    assert_eq!(percent_round_half_up(7, 8), 88);
    assert_eq!(percent_round_half_up(1, 8), 13);
    assert_eq!(percent_round_half_up(3, 8), 38);
    assert_eq!(percent_round_half_up(2, 3), 67);
    assert_eq!(percent_round_half_up(1, 6), 17);
}

#[test]
fn zero_total_scores_zero_percent() {
    assert_eq!(percent_round_half_up(0, 0), 0);
    let summary = score(&[]);
    assert_eq!(summary.correct, 0);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.percent, 0);
    assert_eq!(summary.tier.label, "Dude, Did You Even Study?");
}

#[test]
fn tier_thresholds_are_inclusive_lower_bounds() {
    assert_eq!(tier_for_percent(100).min_percent, 100);
    assert_eq!(tier_for_percent(99).min_percent, 75);
    assert_eq!(tier_for_percent(75).min_percent, 75);
    assert_eq!(tier_for_percent(74).min_percent, 50);
    assert_eq!(tier_for_percent(50).min_percent, 50);
    assert_eq!(tier_for_percent(49).min_percent, 0);
    assert_eq!(tier_for_percent(0).min_percent, 0);
}

#[test]
fn tier_list_is_ordered_and_total() {
    for pair in TIERS.windows(2) {
        assert!(pair[0].min_percent > pair[1].min_percent);
    }
    assert_eq!(TIERS.last().unwrap().min_percent, 0);
}

#[test]
fn score_so_far_on_a_partial_game() {
    let mut state = GameState::new(4);
    state.start();

    state.place("fcu", Nerve::Ulnar).unwrap(); // correct
    state.place("fds", Nerve::Radial).unwrap(); // wrong (median)

    let summary = score(state.placements());
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.percent, 50);
    assert_eq!(summary.tier.label, "Netter Notice");
}

#[test]
fn score_has_no_hidden_state() {
    let mut state = GameState::new(4);
    state.start();
    state.place("epl", Nerve::Radial).unwrap();
    state.place("edc", Nerve::Ulnar).unwrap();

    let first = score(state.placements());
    let second = score(state.placements());
    assert_eq!(first, second);
}
