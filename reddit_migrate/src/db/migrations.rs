//! Migration management
//!
//! This module holds the fixed migration sequence and applies it step by step.
//! A failing step is reported and the next one still runs.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::db::executor::Backend;
use crate::error::{Error, Result};

/// One SQL file and the description shown while it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStep {
    pub path: &'static str,
    pub description: &'static str,
}

/// Migrations in the order they must be applied
pub const MIGRATIONS: [MigrationStep; 3] = [
    MigrationStep {
        path: "migrations/add_reddit_fields_to_courses.sql",
        description: "Adding reddit_channel and reddit_url columns",
    },
    MigrationStep {
        path: "migrations/update_product_management_reddit.sql",
        description: "Configuring Product Manager course",
    },
    MigrationStep {
        path: "migrations/update_cybersecurity_reddit.sql",
        description: "Configuring Cybersecurity course",
    },
];

/// What happened to a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    Skipped,
    Failed(String),
}

/// Read a SQL file as text
pub fn read_sql_file(base_dir: &Path, relative: &str) -> Result<String> {
    let path = base_dir.join(relative);
    fs::read_to_string(&path).map_err(|source| Error::FileReadError { path, source })
}

async fn apply_step<B>(backend: &B, base_dir: &Path, step: &MigrationStep, dry_run: bool) -> Result<StepOutcome>
where
    B: Backend + ?Sized + Sync,
{
    let sql = read_sql_file(base_dir, step.path)?;

    if dry_run {
        tracing::debug!(path = step.path, sql = %sql, "Migration SQL (dry run)");
        return Ok(StepOutcome::Skipped);
    }

    backend.execute_sql(&sql).await?;
    Ok(StepOutcome::Applied)
}

/// Apply every step in order, printing one status line per step to `out`
pub async fn apply_migrations<B, W>(
    backend: &B,
    steps: &[MigrationStep],
    base_dir: &Path,
    dry_run: bool,
    out: &mut W,
) -> Result<Vec<StepOutcome>>
where
    B: Backend + ?Sized + Sync,
    W: Write,
{
    let mut outcomes = Vec::with_capacity(steps.len());

    for (i, step) in steps.iter().enumerate() {
        writeln!(out, "Step {}/{}: {}...", i + 1, steps.len(), step.description)?;

        let outcome = match apply_step(backend, base_dir, step, dry_run).await {
            Ok(outcome) => outcome,
            Err(e) => StepOutcome::Failed(e.to_string()),
        };

        match &outcome {
            StepOutcome::Applied => {
                tracing::info!(step = i + 1, path = step.path, "Migration applied");
                writeln!(out, "  ✅ {} complete", step.description)?;
            }
            StepOutcome::Skipped => {
                writeln!(out, "  ⏭️  {} skipped (dry run)", step.description)?;
            }
            StepOutcome::Failed(message) => {
                tracing::warn!(step = i + 1, path = step.path, error = %message, "Migration failed");
                writeln!(out, "  ⚠️  {}: {}", step.description, message)?;
            }
        }
        writeln!(out)?;

        outcomes.push(outcome);
    }

    Ok(outcomes)
}
