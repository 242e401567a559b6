use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::models::Scale;

/// Defaults taken from the environment (and `.env`, when present). Command
/// line flags override these.
#[derive(Debug, Clone)]
pub struct Config {
    pub scale: Scale,
    pub roster: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let scale = match lookup("GRADE_COMPASS_SCALE") {
            Some(value) => Scale::parse(&value).ok_or_else(|| {
                anyhow!("GRADE_COMPASS_SCALE must be 'de' or 'uk', got '{value}'")
            })?,
            None => Scale::Descending,
        };

        Ok(Config {
            scale,
            roster: lookup("GRADE_COMPASS_ROSTER")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("courses.csv")),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
