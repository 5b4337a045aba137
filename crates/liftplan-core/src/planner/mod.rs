//! High-level planner API for plans, their hierarchy and the exercise library.
//!
//! The [`Planner`] is the entry point the CLI and the MCP server use. Every
//! method is async and runs its SQLite work on the blocking thread pool,
//! opening a fresh connection per call.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (plan_handlers, │───▶│ (plan_ops,      │───▶│   (via db/)     │
//! │  edit_handlers) │    │  edit_ops, ...) │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Hierarchy changes never go to the database one by one. They are applied
//! to a [`PlanEditor`](crate::editor::PlanEditor) obtained from
//! [`Planner::open_editor`] and persisted as one changeset by
//! [`Planner::save_editor`]. [`Planner::edit_plan`] does both for a batch of
//! [`PlanEdit`](crate::params::PlanEdit)s.
//!
//! ## Submodules
//!
//! - [`builder`]: configuration and construction of a [`Planner`]
//! - [`plan_ops`]: plan metadata and plan tree queries
//! - [`exercise_ops`]: exercise library
//! - [`edit_ops`]: editor sessions and saving
//! - [`edit_handlers`]: turning `PlanEdit`s into editor mutations
//! - [`plan_handlers`]: operations returning display wrappers
//!
//! # Example
//!
//! ```rust,no_run
//! use liftplan_core::{
//!     PlannerBuilder,
//!     params::{CreatePlan, EditPlan, PlanEdit, WeekInput},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new().with_user("coach").build().await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         title: "Strength Block".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! planner
//!     .edit_plan(&EditPlan {
//!         plan_id: plan.id,
//!         edits: vec![PlanEdit::AddWeek(WeekInput::default())],
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{PlanError, Result},
};

pub mod builder;
pub mod edit_handlers;
pub mod edit_ops;
pub mod exercise_ops;
pub mod plan_handlers;
pub mod plan_ops;


pub use builder::PlannerBuilder;

/// Main planner interface.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    /// Acting user; only the creator of a plan may change it
    pub(crate) user: String,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf, user: String) -> Self {
        Self { db_path, user }
    }

    /// The user operations are performed as.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Runs `f` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(PlanError::join)?
    }
}
