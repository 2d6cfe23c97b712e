use crate::config::Config;
use crate::error::Result;
use crate::types::EnrichedRecord;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Digest over the immutable identity of an enrichment run: the raw input
/// bytes and the serialized reference configuration. Any change to either
/// produces a new key, which is what invalidates stale cache entries.
pub fn enrichment_digest(raw_input: &[u8], config: &Config) -> Result<String> {
    let config_json = serde_json::to_vec(config)?;

    let mut hasher = Sha256::new();
    hasher.update(raw_input);
    hasher.update(b"|");
    hasher.update(&config_json);
    Ok(hex::encode(hasher.finalize()))
}

/// Read-through file cache for enriched output, keyed by
/// `enrichment_digest`. Entirely optional: the pipeline is cheap enough to
/// re-run, this just skips the work for repeated identical inputs.
pub struct EnrichmentCache {
    dir: PathBuf,
}

impl EnrichmentCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn load(&self, key: &str) -> Result<Option<Vec<EnrichedRecord>>> {
        let path = self.entry_path(key);
        if !path.exists() {
            debug!(key, "Cache miss");
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let records: Vec<EnrichedRecord> = serde_json::from_str(&content)?;
        info!(key, count = records.len(), "Cache hit");
        Ok(Some(records))
    }

    pub fn store(&self, key: &str, records: &[EnrichedRecord]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(records)?;
        fs::write(self.entry_path(key), content)?;
        debug!(key, "Cache entry written");
        Ok(())
    }
}
