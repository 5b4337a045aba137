//! Schema initialization and versioning.

use rusqlite::params;

use crate::error::{DatabaseResultExt, PlanError, Result};

/// Version written to `PRAGMA user_version` by this build.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Enables foreign keys, creates missing tables and views, and records the
    /// schema version.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading deletes down the hierarchy rely on this, per connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let version: i64 = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")?;
        if version > SCHEMA_VERSION {
            return Err(PlanError::Configuration {
                message: format!(
                    "Database schema version {version} is newer than supported version {SCHEMA_VERSION}"
                ),
            });
        }

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        if version < SCHEMA_VERSION {
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .db_context("Failed to record schema version")?;
        }
        Ok(())
    }

    /// Schema version stored in the database file.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", params![], |row| row.get(0))
            .db_context("Failed to read schema version")
    }
}
