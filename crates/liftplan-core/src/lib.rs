//! Core library for the liftplan training plan editor.
//!
//! A training plan is a five-level tree (weeks, days, sessions, exercises,
//! sets). This crate provides the models for that tree, an in-memory
//! [`PlanEditor`] that applies structural edits optimistically, the
//! [`Changeset`] that carries those edits to storage in one batch, the
//! reconciliation of temporary ids with the row ids storage assigns, a
//! read-only outline projection, and a SQLite backend behind the async
//! [`Planner`] facade.
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): implement [`std::fmt::Display`] for
//!   direct formatting
//! - **Display Wrappers** ([`display`]): outline, editor view, collections
//!   and operation results
//! - **Terminal Rendering**: markdown output rendered by the CLI
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use liftplan_core::{
//!     PlannerBuilder,
//!     models::WeekPath,
//!     params::{CreatePlan, DayInput, PlanEdit, WeekInput},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("liftplan.db"))
//!     .with_user("coach")
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         title: "Strength Block".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // Edit in memory, then save everything as one changeset
//! let mut editor = planner.open_editor(plan.id).await?;
//! planner
//!     .apply_edits(
//!         &mut editor,
//!         &[
//!             PlanEdit::AddWeek(WeekInput::default()),
//!             PlanEdit::AddDay {
//!                 at: WeekPath::new(0),
//!                 day: DayInput::default(),
//!             },
//!         ],
//!     )
//!     .await?;
//! if let Some(report) = planner.save_editor(&mut editor).await? {
//!     println!("{report}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod changeset;
pub mod db;
pub mod display;
pub mod editor;
pub mod error;
pub mod ids;
pub mod models;
pub mod params;
pub mod planner;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use changeset::{Changeset, IdMapping};
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, EditorView, Exercises, OperationStatus, PlanOutline,
    PlanSummaries, UpdateResult,
};
pub use editor::{PlanEditor, SaveReport, SyncStatus};
pub use error::{PlanError, Result};
pub use ids::{NodeId, TempId, TempIdGenerator};
pub use models::{Exercise, Plan, PlanDetails, PlanFilter, PlanSummary};
pub use params::{CreatePlan, EditPlan, Id, ListPlans, PlanEdit};
pub use planner::{Planner, PlannerBuilder};
