//! Verification of the applied configuration

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::db::executor::Backend;
use crate::db::migrations::read_sql_file;
use crate::error::Result;

pub const COURSES_TABLE: &str = "courses";
pub const COURSE_COLUMNS: &[&str] = &["name", "title", "reddit_channel", "reddit_url"];
/// Courses whose configuration is checked
pub const VERIFIED_COURSES: &[&str] = &["product-manager", "product-management", "cyber-security-analyst"];
pub const VERIFY_SQL_PATH: &str = "verify_reddit_configuration.sql";

const NOT_SET: &str = "NOT SET";

/// One row of the verification read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub reddit_channel: Option<String>,
    #[serde(default)]
    pub reddit_url: Option<String>,
}

impl CourseRow {
    /// Title, falling back to the course name
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Configured channel or `NOT SET`
    pub fn channel(&self) -> &str {
        self.reddit_channel.as_deref().unwrap_or(NOT_SET)
    }
}

async fn fetch_configuration<B>(backend: &B, base_dir: &Path) -> Result<Vec<CourseRow>>
where
    B: Backend + ?Sized + Sync,
{
    // The script is not executed; it only has to be present.
    read_sql_file(base_dir, VERIFY_SQL_PATH)?;
    backend.fetch_courses(VERIFIED_COURSES).await
}

/// Run the verification read and print the current configuration.
///
/// Returns `true` when the rows could be fetched.
pub async fn verify_configuration<B, W>(backend: &B, base_dir: &Path, out: &mut W) -> Result<bool>
where
    B: Backend + ?Sized + Sync,
    W: Write,
{
    let verified = match fetch_configuration(backend, base_dir).await {
        Ok(rows) => {
            writeln!(out, "  ✅ Configuration verified")?;
            writeln!(out)?;
            writeln!(out, "Current configuration:")?;
            for row in &rows {
                writeln!(out, "  - {}: {}", row.label(), row.channel())?;
            }
            tracing::info!(rows = rows.len(), "Configuration verified");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Verification failed");
            writeln!(out, "  ⚠️  Verification: {}", e)?;
            false
        }
    };
    writeln!(out)?;

    Ok(verified)
}
