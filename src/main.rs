use sql_bootstrap::config::Config;
use sql_bootstrap::logging;
use sql_bootstrap::{BootstrapError, Bootstrapper};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    let log_guard = logging::init_tracing(&config);

    tracing::info!(
        api_url = %config.api_url,
        db_dir = %config.db_dir.display(),
        max_retries = config.max_retries,
        "sql-bootstrap starting"
    );

    if let Err(err) = run(&config).await {
        tracing::error!(error = %err, "database initialization failed");
        // exit() skips destructors; flush the file writer first.
        drop(log_guard);
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> Result<(), BootstrapError> {
    Bootstrapper::new(config)?.run().await?;
    Ok(())
}
