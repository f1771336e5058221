//! Utilities for reddit_migrate

pub mod logging;

pub use logging::init_logging;
