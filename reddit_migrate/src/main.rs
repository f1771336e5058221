use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use reddit_migrate::runner::{self, RunOptions};
use reddit_migrate::utils::init_logging;
use reddit_migrate::{Config, LoggingConfig, SupabaseClient};

/// Apply the Reddit configuration migrations to a Supabase project
#[derive(Debug, Parser)]
#[command(name = "reddit_migrate", version, about)]
struct Cli {
    /// Directory containing `migrations/` and `verify_reddit_configuration.sql`
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Read the migration files but do not submit them
    #[arg(long)]
    dry_run: bool,

    /// Level for this crate's logs; without it `RUST_LOG` applies, then `warn`
    #[arg(long)]
    log_level: Option<String>,

    /// `text` or `json`
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<String>,
}

const EXIT_MISSING_CONFIG: u8 = 1;
const EXIT_FAILURE: u8 = 2;

async fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    runner::write_banner(&mut out)?;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Missing configuration");
            runner::write_config_error(&mut out)?;
            out.flush()?;
            return Ok(ExitCode::from(EXIT_MISSING_CONFIG));
        }
    };

    let client = SupabaseClient::connect(&config).context("Failed to create Supabase client")?;
    let options = RunOptions {
        base_dir: cli.dir.unwrap_or_default(),
        dry_run: cli.dry_run,
    };

    runner::run(&client, &config, &options, &mut out).await?;
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&LoggingConfig {
        level: cli.log_level.clone(),
        file: cli.log_file.clone(),
        format: cli.log_format.clone(),
    }) {
        eprintln!("{}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    match reddit_migrate::config::load_dotenv() {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring environment file"),
    }

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
