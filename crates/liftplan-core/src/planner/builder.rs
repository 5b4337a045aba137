//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{PlanError, Result},
};

/// User assumed when none is configured.
pub const DEFAULT_USER: &str = "local";

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    user: Option<String>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            user: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/liftplan/liftplan.db` or
    /// `~/.local/share/liftplan/liftplan.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the acting user, [`DEFAULT_USER`] if not specified.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Builds the configured planner instance, creating the database and its
    /// schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` for an empty user name,
    /// `PlanError::FileSystem` if the database directory cannot be created
    /// and `PlanError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Planner> {
        let user = self.user.unwrap_or_else(|| DEFAULT_USER.to_string());
        if user.trim().is_empty() {
            return Err(PlanError::invalid_input("user").with_reason("must not be empty"));
        }

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlanError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), PlanError>(())
        })
        .await
        .map_err(PlanError::join)??;

        Ok(Planner::new(db_path, user))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("liftplan")
            .place_data_file("liftplan.db")
            .map_err(|e| PlanError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
