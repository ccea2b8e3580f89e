use std::error::Error;
use std::sync::{Arc, Mutex};

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::{add_log, start_server, LogEntry};

pub async fn run() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();

    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));
    let state = crate::infrastructure::bootstrap::setup(&config, &logs);

    let server = start_server(state, logs.clone(), &config.host, config.port).map_err(|err| {
        error!(error = %err, host = %config.host, port = config.port, "Failed to bind HTTP server");
        err
    })?;

    add_log(
        &logs,
        "INFO",
        "System",
        &format!("Smoke page listening on http://{}:{}", config.host, config.port),
    );

    server.await?;
    Ok(())
}
