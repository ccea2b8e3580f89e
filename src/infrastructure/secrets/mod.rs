//! Secret store implementations.
//!
//! Deployments usually mount a TOML secrets file or inject environment
//! variables; the keyring layer is for local runs. `LayeredSecretStore`
//! combines them so the page sees a single store.

mod env;
mod file;

pub use env::EnvSecretStore;
pub use file::FileSecretStore;

use std::collections::BTreeSet;

use crate::domain::secret_store::SecretStore;

/// A key is present if any layer reports it.
#[derive(Default)]
pub struct LayeredSecretStore {
    layers: Vec<(String, Box<dyn SecretStore>)>,
}

impl LayeredSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, name: &str, store: impl SecretStore + 'static) -> Self {
        self.layers.push((name.to_string(), Box::new(store)));
        self
    }

    /// Name of the first layer holding `name`, if any.
    pub fn source_of(&self, name: &str) -> Option<&str> {
        self.layers
            .iter()
            .find(|(_, store)| store.has_key(name))
            .map(|(layer, _)| layer.as_str())
    }
}

impl SecretStore for LayeredSecretStore {
    fn has_key(&self, name: &str) -> bool {
        self.source_of(name).is_some()
    }
}

/// Fixed set of key names.
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    keys: BTreeSet<String>,
}

impl MemorySecretStore {
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl SecretStore for MemorySecretStore {
    fn has_key(&self, name: &str) -> bool {
        self.keys.contains(name)
    }
}
