use crate::error::{EnrichError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Reference configuration for an enrichment run: the ordered roster of
/// recognized participants and their birth dates.
///
/// The roster order defines the default iteration/display order for every
/// grouped view; records whose person is not listed are dropped at the
/// start of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub people: Vec<String>,
    /// Person -> ISO birth date ("1998-12-03"). Kept as raw text so that a
    /// malformed entry degrades to an unknown age instead of failing the run.
    #[serde(default)]
    pub birthdates: BTreeMap<String, String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EnrichError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Whether the given person belongs to the roster.
    pub fn knows(&self, person: &str) -> bool {
        self.people.iter().any(|p| p == person)
    }

    /// Birth date for a person, if known and parseable.
    pub fn birth_date(&self, person: &str) -> Option<NaiveDate> {
        let raw = self.birthdates.get(person)?;
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
    }
}
