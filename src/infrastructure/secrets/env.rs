use crate::domain::secret_store::SecretStore;

/// Secrets injected as process environment variables.
///
/// A variable set to the empty string counts as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn has_key(&self, name: &str) -> bool {
        std::env::var_os(name)
            .map(|value| !value.is_empty())
            .unwrap_or(false)
    }
}
