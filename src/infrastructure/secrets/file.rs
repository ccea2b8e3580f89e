use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use figment::providers::{Format, Toml};
use figment::value::Value;
use figment::Figment;
use tracing::warn;

use crate::domain::error::Result;
use crate::domain::secret_store::SecretStore;

/// Top-level keys of a TOML secrets file.
///
/// The file is re-read on every lookup so a re-mounted secret shows up on
/// the next render. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn keys(&self) -> Result<BTreeSet<String>> {
        if !self.path.is_file() {
            return Ok(BTreeSet::new());
        }
        let table: BTreeMap<String, Value> = Figment::from(Toml::file(&self.path)).extract()?;
        Ok(table.into_keys().collect())
    }
}

impl SecretStore for FileSecretStore {
    fn has_key(&self, name: &str) -> bool {
        match self.keys() {
            Ok(keys) => keys.contains(name),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Failed to read secrets file"
                );
                false
            }
        }
    }
}
