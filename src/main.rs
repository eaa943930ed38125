use clap::Parser;
use islemler_api::cli::Cli;
use islemler_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_KEY, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Missing signing key is fatal before anything else starts
    let config = AppConfig::from_env()?;

    let _log_guard = islemler_api::logging::init(&config.server.log_dir);

    if let Err(e) = islemler_api::cli::run(cli, config).await {
        tracing::error!("Application terminated unexpectedly: {:?}", e);
        return Err(e);
    }

    Ok(())
}
