use crate::domain::error::{AppError, Result};
use crate::domain::secret_store::SecretStore;
use keyring::Entry;
use tracing::warn;

/// Secrets kept in the OS keyring under one service name.
pub struct KeyringManager {
    service: String,
}

impl KeyringManager {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// `Ok(false)` when the entry is missing; other keyring failures are errors.
    pub fn has_secret(&self, key: &str) -> Result<bool> {
        let entry = Entry::new(&self.service, key)
            .map_err(|e| AppError::SecurityError(format!("Failed to create entry: {}", e)))?;

        match entry.get_password() {
            Ok(_) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(AppError::SecurityError(format!(
                "Failed to read password: {}",
                e
            ))),
        }
    }
}

impl SecretStore for KeyringManager {
    fn has_key(&self, name: &str) -> bool {
        match self.has_secret(name) {
            Ok(present) => present,
            Err(err) => {
                warn!(service = %self.service, key = name, error = %err, "Keyring lookup failed");
                false
            }
        }
    }
}
