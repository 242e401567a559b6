use tracing::warn;

use crate::models::Scale;
use crate::scale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToAscending,
    ToDescending,
}

impl Direction {
    pub fn between(from: Scale, to: Scale) -> Option<Direction> {
        match (from, to) {
            (Scale::Descending, Scale::Ascending) => Some(Direction::ToAscending),
            (Scale::Ascending, Scale::Descending) => Some(Direction::ToDescending),
            _ => None,
        }
    }

    pub fn source(self) -> Scale {
        match self {
            Direction::ToAscending => Scale::Descending,
            Direction::ToDescending => Scale::Ascending,
        }
    }

    pub fn target(self) -> Scale {
        self.source().other()
    }

    fn bands(self) -> &'static [Band] {
        match self {
            Direction::ToAscending => DESCENDING_TO_ASCENDING,
            Direction::ToDescending => ASCENDING_TO_DESCENDING,
        }
    }

    pub fn fallback(self) -> &'static str {
        match self {
            Direction::ToAscending => ASCENDING_FALLBACK,
            Direction::ToDescending => DESCENDING_FALLBACK,
        }
    }
}

pub struct Band {
    pub sources: &'static [&'static str],
    pub target: &'static str,
}

pub const DESCENDING_TO_ASCENDING: &[Band] = &[
    Band { sources: &["1+", "1"], target: "9" },
    Band { sources: &["1-", "2+"], target: "8" },
    Band { sources: &["2", "2-"], target: "7" },
    Band { sources: &["3+", "3"], target: "6" },
    Band { sources: &["3-", "4+"], target: "5" },
    Band { sources: &["4", "4-"], target: "4" },
    Band { sources: &["5+"], target: "3" },
    Band { sources: &["5"], target: "2" },
    Band { sources: &["5-"], target: "1" },
    Band { sources: &["6"], target: "U" },
];

pub const ASCENDING_TO_DESCENDING: &[Band] = &[
    Band { sources: &["9"], target: "1+" },
    Band { sources: &["8"], target: "1" },
    Band { sources: &["7"], target: "2" },
    Band { sources: &["6"], target: "2-" },
    Band { sources: &["5"], target: "3" },
    Band { sources: &["4"], target: "4" },
    Band { sources: &["3"], target: "4-" },
    Band { sources: &["2"], target: "5" },
    Band { sources: &["1"], target: "5-" },
    Band { sources: &["U"], target: "6" },
];

// A bare pass in each system.
pub const ASCENDING_FALLBACK: &str = "4";
pub const DESCENDING_FALLBACK: &str = "4";

pub fn try_remap_label(label: &str, direction: Direction) -> Option<&'static str> {
    let canonical = scale::canonical_label(label, direction.source())?;
    direction
        .bands()
        .iter()
        .find(|band| band.sources.contains(&canonical))
        .map(|band| band.target)
}

/// Lossy within a band and total: labels outside every band map to
/// `direction.fallback()`, with a warning.
pub fn remap_label(label: &str, direction: Direction) -> &'static str {
    try_remap_label(label, direction).unwrap_or_else(|| {
        let fallback = direction.fallback();
        warn!(label, ?direction, fallback, "label outside every band, using fallback");
        fallback
    })
}

const SUBJECTS: &[(&str, &str)] = &[
    ("Mathematik", "Mathematics"),
    ("Deutsch", "German"),
    ("Englisch", "English"),
    ("Französisch", "French"),
    ("Spanisch", "Spanish"),
    ("Latein", "Latin"),
    ("Physik", "Physics"),
    ("Chemie", "Chemistry"),
    ("Biologie", "Biology"),
    ("Informatik", "Computer Science"),
    ("Geschichte", "History"),
    ("Erdkunde", "Geography"),
    ("Politik", "Politics"),
    ("Wirtschaft", "Economics"),
    ("Religion", "Religious Studies"),
    ("Ethik", "Ethics"),
    ("Kunst", "Art"),
    ("Musik", "Music"),
    ("Sport", "Physical Education"),
];

// Names outside the dictionary come back unchanged.
pub fn translate_subject(name: &str, to: Scale) -> String {
    let wanted = name.trim().to_lowercase();
    let found = SUBJECTS.iter().find(|(german, english)| {
        german.to_lowercase() == wanted || english.to_lowercase() == wanted
    });

    match (found, to) {
        (Some((_, english)), Scale::Ascending) => english.to_string(),
        (Some((german, _)), Scale::Descending) => german.to_string(),
        (None, _) => name.to_string(),
    }
}
