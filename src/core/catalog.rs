//! Catalog module - the fixed set of sortable muscles and nerve metadata
//!
//! The catalog is defined once at compile time and never mutated. Ids are
//! globally unique and stable for the process lifetime; every collection in
//! the core is bounded by `CATALOG_LEN`.

use crate::types::{Nerve, Subdivision, CATALOG_LEN};

/// A sortable quiz item: one muscle with its true innervation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Muscle {
    pub id: &'static str,
    pub name: &'static str,
    pub nerve: Nerve,
    /// Terminal-branch bucket within the nerve column, if any.
    pub subdivision: Option<Subdivision>,
    /// Extra detail shown only on the results screen, never on the card.
    pub note: Option<&'static str>,
}

/// Static per-nerve column metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NerveInfo {
    pub nerve: Nerve,
    pub label: &'static str,
    /// How many catalog muscles truly belong to this nerve.
    pub expected: usize,
    pub subdivision: Option<Subdivision>,
}

const fn muscle(id: &'static str, name: &'static str, nerve: Nerve) -> Muscle {
    Muscle {
        id,
        name,
        nerve,
        subdivision: None,
        note: None,
    }
}

const fn branch_muscle(
    id: &'static str,
    name: &'static str,
    nerve: Nerve,
    subdivision: Subdivision,
) -> Muscle {
    Muscle {
        id,
        name,
        nerve,
        subdivision: Some(subdivision),
        note: None,
    }
}

const fn noted(m: Muscle, note: &'static str) -> Muscle {
    Muscle {
        note: Some(note),
        ..m
    }
}

/// All 29 muscles of the hand, grouped by true nerve.
pub static CATALOG: [Muscle; CATALOG_LEN] = [
    // Median nerve, main trunk (6)
    muscle("opponens-pollicis", "Opponens Pollicis", Nerve::Median),
    muscle(
        "abductor-pollicis-brevis",
        "Abductor Pollicis Brevis",
        Nerve::Median,
    ),
    noted(
        muscle("fpb-superficial", "FPB (superficial head)", Nerve::Median),
        "the deep head runs with the ulnar nerve",
    ),
    muscle("lumbrical-1", "1st Lumbrical", Nerve::Median),
    muscle("lumbrical-2", "2nd Lumbrical", Nerve::Median),
    muscle("fds", "Flexor Digitorum Superficialis", Nerve::Median),
    // Median nerve, AIN branch (4)
    branch_muscle("fpl", "Flexor Pollicis Longus", Nerve::Median, Subdivision::Ain),
    branch_muscle(
        "pronator-quadratus",
        "Pronator Quadratus",
        Nerve::Median,
        Subdivision::Ain,
    ),
    branch_muscle("fdp-index", "FDP to Index", Nerve::Median, Subdivision::Ain),
    branch_muscle("fdp-long", "FDP to Long", Nerve::Median, Subdivision::Ain),
    // Ulnar nerve (13)
    muscle("adductor-pollicis", "Adductor Pollicis", Nerve::Ulnar),
    noted(
        muscle("fpb-deep", "FPB (deep head)", Nerve::Ulnar),
        "the superficial head runs with the median nerve",
    ),
    muscle("lumbrical-3", "3rd Lumbrical", Nerve::Ulnar),
    muscle("lumbrical-4", "4th Lumbrical", Nerve::Ulnar),
    muscle("dorsal-interossei", "Dorsal Interossei", Nerve::Ulnar),
    muscle("palmar-interossei", "Palmar Interossei", Nerve::Ulnar),
    muscle(
        "abductor-digiti-minimi",
        "Abductor Digiti Minimi",
        Nerve::Ulnar,
    ),
    muscle(
        "flexor-digiti-minimi",
        "Flexor Digiti Minimi Brevis",
        Nerve::Ulnar,
    ),
    muscle(
        "opponens-digiti-minimi",
        "Opponens Digiti Minimi",
        Nerve::Ulnar,
    ),
    noted(
        muscle("palmaris-brevis", "Palmaris Brevis", Nerve::Ulnar),
        "the only muscle supplied by the superficial ulnar branch",
    ),
    muscle("fcu", "Flexor Carpi Ulnaris", Nerve::Ulnar),
    muscle("fdp-ring", "FDP to Ring", Nerve::Ulnar),
    muscle("fdp-small", "FDP to Small", Nerve::Ulnar),
    // Radial nerve, main trunk (3)
    muscle("edc", "Extensor Digitorum Communis", Nerve::Radial),
    muscle("epb", "Extensor Pollicis Brevis", Nerve::Radial),
    muscle("apl", "Abductor Pollicis Longus", Nerve::Radial),
    // Radial nerve, PIN branch (3)
    branch_muscle("epl", "Extensor Pollicis Longus", Nerve::Radial, Subdivision::Pin),
    branch_muscle(
        "eip",
        "Extensor Indicis Proprius",
        Nerve::Radial,
        Subdivision::Pin,
    ),
    branch_muscle("edm", "Extensor Digiti Minimi", Nerve::Radial, Subdivision::Pin),
];

/// Column metadata for each nerve, in display order.
pub static NERVE_INFO: [NerveInfo; 3] = [
    NerveInfo {
        nerve: Nerve::Median,
        label: "Median Nerve",
        expected: 10,
        subdivision: Some(Subdivision::Ain),
    },
    NerveInfo {
        nerve: Nerve::Ulnar,
        label: "Ulnar Nerve",
        expected: 13,
        subdivision: None,
    },
    NerveInfo {
        nerve: Nerve::Radial,
        label: "Radial Nerve",
        expected: 6,
        subdivision: Some(Subdivision::Pin),
    },
];

/// Look up the column metadata for a nerve.
pub fn nerve_info(nerve: Nerve) -> &'static NerveInfo {
    match nerve {
        Nerve::Median => &NERVE_INFO[0],
        Nerve::Ulnar => &NERVE_INFO[1],
        Nerve::Radial => &NERVE_INFO[2],
    }
}

/// Find a catalog muscle by id.
pub fn find_muscle(id: &str) -> Option<&'static Muscle> {
    CATALOG.iter().find(|m| m.id == id)
}
