//! SQL executor
//!
//! The runner talks to the database only through [`Backend`], which keeps the
//! step sequence independent of the HTTP client.

use async_trait::async_trait;
use serde_json::json;

use crate::db::connection::SupabaseClient;
use crate::error::Result;
use crate::verify::{CourseRow, COURSES_TABLE, COURSE_COLUMNS};

/// Name of the remote procedure raw SQL is submitted through
pub const QUERY_FUNCTION: &str = "query";

/// Remote operations the migration run needs
#[async_trait]
pub trait Backend {
    /// Submit one SQL script for execution
    async fn execute_sql(&self, sql: &str) -> Result<()>;

    /// Read the verification columns for the named courses
    async fn fetch_courses(&self, names: &[&str]) -> Result<Vec<CourseRow>>;
}

#[async_trait]
impl Backend for SupabaseClient {
    async fn execute_sql(&self, sql: &str) -> Result<()> {
        self.rpc(QUERY_FUNCTION, &json!({ "query": sql })).await?;
        Ok(())
    }

    async fn fetch_courses(&self, names: &[&str]) -> Result<Vec<CourseRow>> {
        self.select_in(COURSES_TABLE, COURSE_COLUMNS, "name", names).await
    }
}
