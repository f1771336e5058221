//! reddit_migrate: applies the Reddit course configuration migrations to a Supabase project
//!
//! The three SQL files under `migrations/` are submitted in a fixed order through the
//! project's REST API, then the `courses` table is read back to show what is configured.

pub mod config;
pub mod db;
pub mod error;
pub mod runner;
pub mod utils;
pub mod verify;

// Re-export main types for easier access
pub use config::{Config, LoggingConfig};
pub use db::{Backend, SupabaseClient};
pub use error::{Error, Result};
pub use runner::{run, RunOptions, RunSummary};
pub use verify::CourseRow;
