use clap::Parser;
use flag_engine::cli::{self, Cli};
use flag_engine::core::Config;
use flag_engine::utils::logger::{cleanup_old_logs, init_logger_with_file};

fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logger_with_file(level, config.log_json, config.log_dir.as_deref())?;

    if let Some(dir) = &config.log_dir
        && let Err(e) =
            cleanup_old_logs(dir, config.log_retention_days, chrono::Utc::now().date_naive())
    {
        tracing::warn!(error = %e, "Failed to cleanup old logs");
    }

    tracing::debug!(
        environment = %config.environment,
        ordering = %cli.ordering.unwrap_or(config.event_ordering),
        "flag-engine starting"
    );

    let output = cli::run(&cli, &config)?;
    println!("{output}");
    Ok(())
}
