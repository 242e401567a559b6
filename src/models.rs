use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `Descending` is the German 1–6 scale, `Ascending` the UK 9–1 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Scale {
    #[value(name = "de")]
    #[serde(rename = "de")]
    Descending,
    #[value(name = "uk")]
    #[serde(rename = "uk")]
    Ascending,
}

impl Scale {
    pub fn code(self) -> &'static str {
        match self {
            Scale::Descending => "de",
            Scale::Ascending => "uk",
        }
    }

    pub fn other(self) -> Scale {
        match self {
            Scale::Descending => Scale::Ascending,
            Scale::Ascending => Scale::Descending,
        }
    }

    pub fn parse(value: &str) -> Option<Scale> {
        match value.trim().to_ascii_lowercase().as_str() {
            "de" | "descending" | "german" => Some(Scale::Descending),
            "uk" | "en" | "ascending" | "british" => Some(Scale::Ascending),
            _ => None,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Descending => write!(f, "German 1-6"),
            Scale::Ascending => write!(f, "UK 9-1"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub grade: String,
    pub credits: f64,
}

impl Course {
    pub fn new(name: impl Into<String>, grade: impl Into<String>, credits: f64) -> Self {
        Course {
            id: Uuid::new_v4(),
            name: name.into(),
            grade: grade.into(),
            credits,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CourseEdit {
    pub name: Option<String>,
    pub grade: Option<String>,
    pub credits: Option<f64>,
}

/// Only constructible through `parse` or `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeLevel {
    scale: Scale,
    year: u8,
}

const KLASSE_RANGE: std::ops::RangeInclusive<u8> = 5..=13;
const YEAR_RANGE: std::ops::RangeInclusive<u8> = 6..=13;

impl GradeLevel {
    pub fn all(scale: Scale) -> Vec<GradeLevel> {
        let range = match scale {
            Scale::Descending => KLASSE_RANGE,
            Scale::Ascending => YEAR_RANGE,
        };
        range.map(|year| GradeLevel { scale, year }).collect()
    }

    /// Accepts `"10. Klasse"`, `"Klasse 10"` or `"10"` for German and
    /// `"Year 10"` or `"10"` for UK.
    pub fn parse(scale: Scale, text: &str) -> Option<GradeLevel> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let number = match (scale, tokens.as_slice()) {
            (_, [number]) => *number,
            (Scale::Descending, [number, keyword]) if keyword.eq_ignore_ascii_case("klasse") => {
                *number
            }
            (Scale::Descending, [keyword, number]) if keyword.eq_ignore_ascii_case("klasse") => {
                *number
            }
            (Scale::Ascending, [keyword, number]) if keyword.eq_ignore_ascii_case("year") => {
                *number
            }
            _ => return None,
        };

        let number = match scale {
            Scale::Descending => number.strip_suffix('.').unwrap_or(number),
            Scale::Ascending => number,
        };
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let year: u8 = number.parse().ok()?;

        GradeLevel::all(scale)
            .into_iter()
            .find(|level| level.year == year)
    }

    /// Klasse k sits alongside Year k+1; Klasse 13 has no later UK year and
    /// collapses onto Year 13.
    pub fn remapped(&self, to: Scale) -> GradeLevel {
        if to == self.scale {
            return *self;
        }
        let year = match to {
            Scale::Ascending => (self.year + 1).min(*YEAR_RANGE.end()),
            Scale::Descending => self.year - 1,
        };
        GradeLevel { scale: to, year }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scale {
            Scale::Descending => write!(f, "{}. Klasse", self.year),
            Scale::Ascending => write!(f, "Year {}", self.year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageSummary {
    pub scale: Scale,
    pub average: f64,
    pub nearest_label: Option<&'static str>,
    pub counted_courses: usize,
    pub excluded_courses: usize,
    pub counted_credits: f64,
}
