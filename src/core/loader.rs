/// Reads JSON pool files into lists of entries.
///
/// `read_pool` is strict and returns a typed error. `load_pool` is the
/// forgiving variant the generator uses: it logs the problem and yields an
/// empty pool so a broken file never stops a run.
///
/// Only the outer array is checked here. Each entry stays a raw JSON value
/// until it is picked, so one malformed entry does not sink its pool.
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::DataConfig;
use crate::schema::record::PoolKind;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found - {}", .0.display())]
    NotFound(PathBuf),
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not decode JSON from {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read a pool file as a JSON array of `T`.
pub fn read_pool<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_pool(&contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a pool from a JSON string.
pub fn parse_pool<T: DeserializeOwned>(input: &str) -> Result<Vec<T>, serde_json::Error> {
    serde_json::from_str(input)
}

/// Read a pool file, logging and returning an empty pool on any failure.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_pool<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match read_pool(path) {
        Ok(items) if items.is_empty() => {
            warn!("No data found in {}", path.display());
            items
        }
        Ok(items) => {
            debug!(count = items.len(), "pool loaded");
            items
        }
        Err(e) => {
            error!("{e}");
            Vec::new()
        }
    }
}

/// All four pools, freshly read. Entries are unchecked JSON values.
#[derive(Debug, Clone, Default)]
pub struct Pools {
    pub characters: Vec<Value>,
    pub settings: Vec<Value>,
    pub events: Vec<Value>,
    pub templates: Vec<Value>,
}

impl Pools {
    /// Load every pool named by `config`. Missing or broken files come back
    /// as empty pools.
    pub fn load(config: &DataConfig) -> Pools {
        Pools {
            characters: load_pool(&config.path_for(PoolKind::Characters)),
            settings: load_pool(&config.path_for(PoolKind::Settings)),
            events: load_pool(&config.path_for(PoolKind::Events)),
            templates: load_pool(&config.path_for(PoolKind::Templates)),
        }
    }

    pub fn len_of(&self, kind: PoolKind) -> usize {
        match kind {
            PoolKind::Characters => self.characters.len(),
            PoolKind::Settings => self.settings.len(),
            PoolKind::Events => self.events.len(),
            PoolKind::Templates => self.templates.len(),
        }
    }

    /// True when every pool has at least one entry.
    pub fn is_complete(&self) -> bool {
        PoolKind::ALL.iter().all(|kind| self.len_of(*kind) > 0)
    }
}
