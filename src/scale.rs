use crate::models::Scale;

// Canonical order is best grade first for both tables.
pub const DESCENDING: &[(&str, f64)] = &[
    ("1+", 0.7),
    ("1", 1.0),
    ("1-", 1.3),
    ("2+", 1.7),
    ("2", 2.0),
    ("2-", 2.3),
    ("3+", 2.7),
    ("3", 3.0),
    ("3-", 3.3),
    ("4+", 3.7),
    ("4", 4.0),
    ("4-", 4.3),
    ("5+", 4.7),
    ("5", 5.0),
    ("5-", 5.3),
    ("6", 6.0),
];

pub const ASCENDING: &[(&str, f64)] = &[
    ("9", 9.0),
    ("8", 8.0),
    ("7", 7.0),
    ("6", 6.0),
    ("5", 5.0),
    ("4", 4.0),
    ("3", 3.0),
    ("2", 2.0),
    ("1", 1.0),
    ("U", 0.0),
];

pub fn entries(scale: Scale) -> &'static [(&'static str, f64)] {
    match scale {
        Scale::Descending => DESCENDING,
        Scale::Ascending => ASCENDING,
    }
}

pub fn labels(scale: Scale) -> impl Iterator<Item = &'static str> {
    entries(scale).iter().map(|(label, _)| *label)
}

pub fn canonical_label(label: &str, scale: Scale) -> Option<&'static str> {
    let trimmed = label.trim();
    let wanted = match (scale, trimmed) {
        (Scale::Ascending, "u") => "U",
        _ => trimmed,
    };
    labels(scale).find(|candidate| *candidate == wanted)
}

pub fn is_valid_label(label: &str, scale: Scale) -> bool {
    canonical_label(label, scale).is_some()
}

pub fn resolve_score(label: &str, scale: Scale) -> f64 {
    canonical_label(label, scale)
        .and_then(|canonical| {
            entries(scale)
                .iter()
                .find(|(candidate, _)| *candidate == canonical)
        })
        .map(|(_, score)| *score)
        .unwrap_or(0.0)
}

/// Scans every entry in canonical order; the first one at the smallest
/// distance wins, so ties go to the better grade.
pub fn nearest_label(value: f64, scale: Scale) -> &'static str {
    let table = entries(scale);
    let mut best = table[0].0;
    let mut best_diff = f64::INFINITY;

    for (label, score) in table {
        let diff = (value - score).abs();
        if diff < best_diff {
            best = *label;
            best_diff = diff;
        }
    }

    best
}
