//! Migration run
//!
//! Prints the banner, applies the fixed migrations, verifies the result and prints
//! the closing instructions. Every remote operation is guarded individually, so once
//! configuration is valid the run always reaches the end.

use std::io::Write;
use std::path::PathBuf;

use crate::config::{Config, URL_VAR};
use crate::db::executor::Backend;
use crate::db::migrations::{apply_migrations, StepOutcome, MIGRATIONS};
use crate::error::Result;
use crate::verify::verify_configuration;

const NEXT_STEPS: [&str; 3] = [
    "1. Visit your Ignite app and navigate to the Product Manager course",
    "2. Check if the community forum now loads posts from r/productmanagement",
    "3. Navigate to Cybersecurity course and verify r/cybersecurity loads",
];

/// Options that do not come from the environment
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory the SQL paths are resolved against; empty means the working directory
    pub base_dir: PathBuf,
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::new(),
            dry_run: false,
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: Vec<StepOutcome>,
    pub verified: bool,
}

impl RunSummary {
    pub fn failed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|outcome| matches!(outcome, StepOutcome::Failed(_)))
            .count()
    }
}

pub fn write_banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "🚀 Running Reddit configuration migrations...")?;
    writeln!(out)?;
    Ok(())
}

/// Lines printed when the project URL is missing
pub fn write_config_error<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "❌ Error: {} environment variable not set", URL_VAR)?;
    writeln!(out, "Please set your Supabase connection details")?;
    Ok(())
}

/// Run everything after configuration has been validated
pub async fn run<B, W>(backend: &B, config: &Config, options: &RunOptions, out: &mut W) -> Result<RunSummary>
where
    B: Backend + ?Sized + Sync,
    W: Write,
{
    writeln!(out, "📊 Supabase URL: {}", config.supabase_url)?;
    writeln!(out)?;

    let steps = apply_migrations(backend, &MIGRATIONS, &options.base_dir, options.dry_run, out).await?;

    writeln!(out, "Step 4/4: Verifying configuration...")?;
    let verified = verify_configuration(backend, &options.base_dir, out).await?;

    writeln!(out, "✅ Migration process complete!")?;
    writeln!(out)?;
    writeln!(out, "Next steps:")?;
    for line in NEXT_STEPS {
        writeln!(out, "{}", line)?;
    }

    let summary = RunSummary { steps, verified };
    tracing::info!(
        failed_steps = summary.failed_steps(),
        verified = summary.verified,
        "Migration run finished"
    );
    Ok(summary)
}
