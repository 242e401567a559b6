use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::RosterError;
use crate::models::{Course, Scale};
use crate::scale;

#[derive(Debug, Serialize, Deserialize)]
struct RosterRow {
    id: Option<Uuid>,
    name: String,
    grade: String,
    credits: f64,
}

/// `row` is 1-based. With `lenient`, an off-scale grade is logged instead of
/// rejected.
pub fn validate_course(
    course: &Course,
    scale: Scale,
    row: usize,
    lenient: bool,
) -> Result<(), RosterError> {
    if !course.credits.is_finite() || course.credits <= 0.0 {
        return Err(RosterError::InvalidCredits {
            row,
            name: course.name.clone(),
            credits: course.credits,
        });
    }

    if !scale::is_valid_label(&course.grade, scale) {
        if lenient {
            warn!(
                row,
                course = %course.name,
                grade = %course.grade,
                "grade not on the active scale, excluding it from the average"
            );
        } else {
            return Err(RosterError::UnknownGrade {
                row,
                name: course.name.clone(),
                grade: course.grade.clone(),
                scale,
            });
        }
    }

    Ok(())
}

pub fn load_roster(path: &Path, scale: Scale, lenient: bool) -> Result<Vec<Course>, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut courses = Vec::new();

    for (index, result) in reader.deserialize::<RosterRow>().enumerate() {
        let row = result?;
        let course = Course {
            id: row.id.unwrap_or_else(Uuid::new_v4),
            name: row.name,
            grade: row.grade,
            credits: row.credits,
        };
        validate_course(&course, scale, index + 1, lenient)?;
        courses.push(course);
    }

    info!(path = %path.display(), count = courses.len(), "loaded roster");
    Ok(courses)
}

/// Like `load_roster`, but a missing file is an empty roster.
pub fn load_or_empty(path: &Path, scale: Scale, lenient: bool) -> Result<Vec<Course>, RosterError> {
    if path.exists() {
        load_roster(path, scale, lenient)
    } else {
        info!(path = %path.display(), "roster not found, starting empty");
        Ok(Vec::new())
    }
}

pub fn save_roster(path: &Path, courses: &[Course]) -> Result<(), RosterError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| RosterError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for course in courses {
        writer.serialize(RosterRow {
            id: Some(course.id),
            name: course.name.clone(),
            grade: course.grade.clone(),
            credits: course.credits,
        })?;
    }
    writer.flush().map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), count = courses.len(), "saved roster");
    Ok(())
}

pub fn seed_courses(scale: Scale) -> Vec<Course> {
    let rows: [(&str, &str, &str, f64); 6] = [
        ("Mathematik", "2", "7", 4.0),
        ("Deutsch", "1-", "8", 4.0),
        ("Englisch", "2-", "7", 3.0),
        ("Physik", "3+", "6", 2.0),
        ("Geschichte", "2+", "8", 2.0),
        ("Sport", "1", "9", 1.0),
    ];

    rows.iter()
        .map(|(subject, german, uk, credits)| {
            let (name, grade) = match scale {
                Scale::Descending => (subject.to_string(), *german),
                Scale::Ascending => (crate::remap::translate_subject(subject, scale), *uk),
            };
            Course::new(name, grade, *credits)
        })
        .collect()
}
