use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::models::Scale;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to access roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed roster: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: credits for '{name}' must be a positive number, got {credits}")]
    InvalidCredits { row: usize, name: String, credits: f64 },

    #[error("row {row}: grade '{grade}' for '{name}' is not on the {scale} scale")]
    UnknownGrade {
        row: usize,
        name: String,
        grade: String,
        scale: Scale,
    },

    #[error("no course with id {0}")]
    CourseNotFound(Uuid),
}
