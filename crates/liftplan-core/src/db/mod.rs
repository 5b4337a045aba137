//! SQLite storage for plans, their hierarchy and the exercise library.
//!
//! This is the backend the editor saves to. Besides plain CRUD it provides
//! the two calls the editing workflow is built on:
//! [`get_plan_details`](Database::get_plan_details), which returns a whole
//! plan tree with every level sorted, and
//! [`save_plan_changes`](Database::save_plan_changes), which applies a
//! [`Changeset`](crate::changeset::Changeset) in one transaction and returns
//! the row ids assigned to its temporary ids.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod exercise_queries;
pub mod hierarchy_queries;
pub mod migrations;
pub mod plan_queries;
mod rows;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and initializes the
    /// schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// A private database that lives as long as the value.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
