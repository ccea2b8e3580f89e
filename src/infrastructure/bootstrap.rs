use std::sync::{Arc, Mutex};

use tracing::info;

use crate::application::{DependencyResolver, SmokePageUseCase};
use crate::domain::secret_store::SecretStore;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::secrets::{EnvSecretStore, FileSecretStore, LayeredSecretStore};
use crate::infrastructure::security::keyring::KeyringManager;
use crate::interfaces::http::{add_log, LogEntry};
use crate::interfaces::state::AppState;

pub fn setup(config: &AppConfig, logs: &Arc<Mutex<Vec<LogEntry>>>) -> Arc<AppState> {
    let secrets = build_secret_store(config, logs);
    let resolver = Arc::new(DependencyResolver::new());

    let compiled: Vec<&str> = resolver
        .dependencies()
        .iter()
        .filter(|dependency| dependency.is_compiled())
        .map(|dependency| dependency.library())
        .collect();
    info!(libraries = ?compiled, "Optional libraries compiled in");

    let smoke_page = SmokePageUseCase::new(secrets, resolver, config.page_settings());
    Arc::new(AppState { smoke_page })
}

pub fn build_secret_store(
    config: &AppConfig,
    logs: &Arc<Mutex<Vec<LogEntry>>>,
) -> Arc<dyn SecretStore> {
    let mut store = LayeredSecretStore::new().with_layer(
        "file",
        FileSecretStore::new(config.secrets_file.clone()),
    );
    add_log(
        logs,
        "INFO",
        "Secrets",
        &format!("Using secrets file {}", config.secrets_file.display()),
    );

    if config.env_secrets {
        store = store.with_layer("env", EnvSecretStore);
        add_log(logs, "INFO", "Secrets", "Environment variables enabled as secrets");
    }

    if let Some(service) = config.keyring_service.as_deref() {
        let keyring = KeyringManager::new(service);
        add_log(
            logs,
            "INFO",
            "Secrets",
            &format!("OS keyring enabled (service={})", keyring.service()),
        );
        store = store.with_layer("keyring", keyring);
    }

    Arc::new(store)
}
