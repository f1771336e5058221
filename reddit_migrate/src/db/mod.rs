//! Database module for reddit_migrate
//!
//! This module handles the Supabase connection and the migration steps.

pub mod connection;
pub mod executor;
pub mod migrations;

// Re-export key types
pub use connection::SupabaseClient;
pub use executor::Backend;
pub use migrations::{MigrationStep, StepOutcome, MIGRATIONS};
