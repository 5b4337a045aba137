//! Error types for the liftplan library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Level;

/// Comprehensive error type for all plan operations.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// A persisted hierarchy node does not exist (or belongs to another plan)
    #[error("{} with ID {id} not found", level.title())]
    NodeNotFound { level: Level, id: u64 },
    /// Library exercise not found for the given ID
    #[error("Exercise with ID {id} not found")]
    ExerciseNotFound { id: u64 },
    /// An index path does not address a node in the current tree
    #[error("No {level} at {path}")]
    InvalidPath { level: Level, path: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Mutation attempted through an editor without edit permission
    #[error("Plan {plan_id} is read-only for this user")]
    ReadOnly { plan_id: u64 },
    /// A save was requested while another one is still outstanding
    #[error("A save for plan {plan_id} is already in progress")]
    SaveInProgress { plan_id: u64 },
    /// Server response could not be reconciled with the local tree
    #[error("Reconciliation error: {message}")]
    Reconcile { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlanError {
        PlanError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlanError {
        PlanError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlanError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a reconciliation error.
    pub fn reconcile(message: impl Into<String>) -> Self {
        PlanError::Reconcile {
            message: message.into(),
        }
    }

    /// Wraps a blocking-task join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        PlanError::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlanError::database(message).with_source(e))
    }
}

/// Result type alias for plan operations
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_user_facing() {
        let err = PlanError::invalid_input("day_number").with_reason("must be between 1 and 7");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'day_number': must be between 1 and 7"
        );

        let err = PlanError::NodeNotFound {
            level: Level::Session,
            id: 12,
        };
        assert_eq!(err.to_string(), "Session with ID 12 not found");

        let err = PlanError::InvalidPath {
            level: Level::Set,
            path: "week 0 / day 1 / session 0 / exercise 2 / set 5".to_string(),
        };
        assert!(err.to_string().starts_with("No set at week 0"));
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to load plan").unwrap_err();
        assert!(matches!(err, PlanError::Database { ref message, .. } if message == "Failed to load plan"));
    }
}
