//! Shuffle properties: permutation and lack of positional bias

use nerve_sort::core::{shuffled_catalog, SimpleRng, CATALOG};
use nerve_sort::types::CATALOG_LEN;

#[test]
fn shuffle_is_always_a_permutation() {
    let mut rng = SimpleRng::new(12345);

    for _ in 0..50 {
        let deck = shuffled_catalog(&mut rng);
        assert_eq!(deck.len(), CATALOG_LEN);
        for m in CATALOG.iter() {
            assert_eq!(
                deck.iter().filter(|d| d.id == m.id).count(),
                1,
                "{} must appear exactly once",
                m.id
            );
        }
    }
}

#[test]
fn shuffle_does_not_mutate_the_catalog() {
    let before: Vec<&'static str> = CATALOG.iter().map(|m| m.id).collect();
    let mut rng = SimpleRng::new(5);
    let _ = shuffled_catalog(&mut rng);
    let after: Vec<&'static str> = CATALOG.iter().map(|m| m.id).collect();
    assert_eq!(before, after);
}

#[test]
fn repeated_shuffles_change_the_order() {
    let mut rng = SimpleRng::new(12345);
    let a = shuffled_catalog(&mut rng);
    let b = shuffled_catalog(&mut rng);

    // Two consecutive draws agreeing on every slot would mean the RNG
    // state is not advancing.
    assert!(a.iter().zip(b.iter()).any(|(x, y)| x.id != y.id));
}

// Statistical check: over many shuffles, a fixed card should land in every
// deck position with roughly uniform frequency. Bounds are deliberately
// loose; the point is catching systematic positional bias, not measuring
// the generator.
#[test]
fn shuffle_has_no_systematic_positional_bias() {
    const TRIALS: usize = 2000;
    let tracked = CATALOG[0].id;
    let mut counts = [0usize; CATALOG_LEN];

    let mut rng = SimpleRng::new(424242);
    for _ in 0..TRIALS {
        let deck = shuffled_catalog(&mut rng);
        let position = deck.iter().position(|m| m.id == tracked).unwrap();
        counts[position] += 1;
    }

    // Uniform expectation is TRIALS / 29 ~= 69 per position.
    for (position, &count) in counts.iter().enumerate() {
        assert!(
            count >= 10 && count <= 200,
            "position {} hit {} times (expected ~{})",
            position,
            count,
            TRIALS / CATALOG_LEN
        );
    }
}

#[test]
fn first_deck_position_is_not_pinned() {
    // The first pending card should vary across sessions with different
    // seeds; a shuffler that leaves index 0 alone would fail this.
    let mut seen_different = false;
    let mut rng = SimpleRng::new(1);
    let first = shuffled_catalog(&mut rng)[0].id;

    for seed in 2..40 {
        let mut rng = SimpleRng::new(seed);
        if shuffled_catalog(&mut rng)[0].id != first {
            seen_different = true;
            break;
        }
    }
    assert!(seen_different);
}
