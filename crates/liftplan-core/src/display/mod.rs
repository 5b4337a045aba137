//! Markdown formatting for models, collections and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! newtype wrappers cover collections and results so that the same data can
//! be rendered differently in a listing, after a creation, or while editing.
//! All output is markdown, rendered by the CLI's terminal renderer or
//! returned verbatim over MCP.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Outline, Views, │    │    Markdown     │
//! │  (PlanDetails,  │───▶│ Result Wrappers │───▶│ (Terminal/MCP)  │
//! │   Exercise)     │    │                 │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`outline`]: sorted, superset-grouped projection of a persisted plan
//! - [`editor_view`]: indexed view of an editor's working tree
//! - [`collections`]: `PlanSummaries`, `Exercises`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`, save reports
//! - [`status`]: `OperationStatus`, editor sync status
//! - [`datetime`]: local time formatting

pub mod collections;
pub mod datetime;
pub mod editor_view;
pub mod models;
pub mod outline;
pub mod results;
pub mod status;

pub use collections::{Exercises, PlanSummaries};
pub use datetime::{LocalDate, LocalDateTime};
pub use editor_view::EditorView;
pub use outline::{
    DayOutline, ExerciseGroup, ExerciseOutline, PlanOutline, SessionOutline, WeekOutline,
};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
