//! Command-line arguments.
//!
//! Argument structs carry the clap-specific attributes and convert into the
//! core parameter types, so that core types stay free of clap derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! Hierarchy nodes are addressed by dotted index paths such as `0.1.0`
//! (week 0, day 1, session 0), the same paths `plan show --paths` prints.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use liftplan_core::{
    models::{
        DayPath, Difficulty, ExercisePath, SessionPath, SetPath, SetType, Visibility, WeekPath,
        WeightUnit,
    },
    params::{
        CreateExercise, CreatePlan, DayInput, DeletePlan, ExerciseInput, Id, ListPlans,
        PlanEdit, SearchExercises, SessionInput, SetInput, UpdatePlan, WeekInput,
    },
};

/// Training plan editor
///
/// Liftplan organizes strength training into plans made of weeks, days,
/// sessions, exercises and sets. Plans can be edited from the command line
/// or, in MCP server mode, by AI assistants.
#[derive(Parser)]
#[command(version, about, name = "liftplan")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/liftplan/liftplan.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Name of the acting user. Only the creator of a plan can change it.
    #[arg(long, global = true, default_value = "local")]
    pub user: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Add or remove weeks
    #[command(alias = "w")]
    Week {
        #[command(subcommand)]
        command: WeekCommands,
    },
    /// Add or remove days
    #[command(alias = "d")]
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },
    /// Add or remove sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Add or remove exercises within a session
    #[command(alias = "l")]
    Lift {
        #[command(subcommand)]
        command: LiftCommands,
    },
    /// Add or remove sets
    Set {
        #[command(subcommand)]
        command: SetCommands,
    },
    /// Manage the exercise library
    #[command(alias = "x")]
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Start the MCP server
    Serve,
}

// ============================================================================
// Index paths
// ============================================================================

fn indices<const N: usize>(value: &str) -> Result<[usize; N], String> {
    let parts: Vec<&str> = value.split('.').collect();
    if parts.len() != N {
        return Err(format!(
            "expected {N} dot-separated indices, got '{value}'"
        ));
    }

    let mut out = [0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("'{part}' is not a valid index"))?;
    }
    Ok(out)
}

fn week_path(value: &str) -> Result<WeekPath, String> {
    let [week] = indices::<1>(value)?;
    Ok(WeekPath::new(week))
}

fn day_path(value: &str) -> Result<DayPath, String> {
    let [week, day] = indices::<2>(value)?;
    Ok(DayPath::new(week, day))
}

fn session_path(value: &str) -> Result<SessionPath, String> {
    let [week, day, session] = indices::<3>(value)?;
    Ok(SessionPath::new(week, day, session))
}

fn exercise_path(value: &str) -> Result<ExercisePath, String> {
    let [week, day, session, exercise] = indices::<4>(value)?;
    Ok(ExercisePath::new(week, day, session, exercise))
}

fn set_path(value: &str) -> Result<SetPath, String> {
    let [week, day, session, exercise, set] = indices::<5>(value)?;
    Ok(ExercisePath::new(week, day, session, exercise).set(set))
}

// ============================================================================
// Plans
// ============================================================================

#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    #[arg(short, long, help = "Longer description of the plan's goal")]
    pub description: Option<String>,
    #[arg(long, help = "beginner, intermediate or advanced")]
    pub difficulty: Option<Difficulty>,
    #[arg(long, help = "private, team or public")]
    pub visibility: Option<Visibility>,
    #[arg(long, help = "Team the plan is shared with")]
    pub team: Option<u64>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            title: val.title,
            description: val.description,
            difficulty: val.difficulty,
            visibility: val.visibility,
            team_id: val.team,
        }
    }
}

/// List plans, most recently updated first
#[derive(ClapArgs)]
pub struct ListPlansArgs {
    #[arg(short, long, help = "Only plans whose title contains this text")]
    pub title: Option<String>,
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
    #[arg(long)]
    pub visibility: Option<Visibility>,
    #[arg(long, help = "Only plans created by this user")]
    pub created_by: Option<String>,
    #[arg(long)]
    pub team: Option<u64>,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            title: val.title,
            difficulty: val.difficulty,
            visibility: val.visibility,
            created_by: val.created_by,
            team_id: val.team,
        }
    }
}

#[derive(ClapArgs)]
pub struct ShowPlanArgs {
    #[arg(help = "Unique identifier of the plan to show")]
    pub id: u64,
    /// Show the tree in storage order with the index paths used by the
    /// week, day, session, lift and set commands
    #[arg(long)]
    pub paths: bool,
}

#[derive(ClapArgs)]
pub struct UpdatePlanArgs {
    #[arg(help = "Unique identifier of the plan to update")]
    pub id: u64,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
    #[arg(long)]
    pub visibility: Option<Visibility>,
    #[arg(long)]
    pub team: Option<u64>,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        UpdatePlan {
            id: val.id,
            title: val.title,
            description: val.description,
            difficulty: val.difficulty,
            visibility: val.visibility,
            team_id: val.team,
        }
    }
}

/// Delete a plan permanently
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    #[arg(help = "Unique identifier of the plan to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Apply a batch of edits read from a JSON file
///
/// The file holds an array of edits tagged by `op`, e.g.
/// `[{"op": "add_week"}, {"op": "add_day", "week": 0, "title": "Legs"}]`.
/// All edits are saved together or not at all.
#[derive(ClapArgs)]
pub struct EditPlanArgs {
    #[arg(help = "Unique identifier of the plan to edit")]
    pub id: u64,
    #[arg(help = "JSON file with the edits, or '-' to read standard input")]
    pub file: PathBuf,
    /// Print the changes a save would send instead of saving them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan with its weeks
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Update plan metadata
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Apply a batch of edits from a JSON file
    #[command(alias = "e")]
    Edit(EditPlanArgs),
}

// ============================================================================
// Hierarchy
// ============================================================================

/// An edit of one plan from a hierarchy subcommand.
pub trait HierarchyEdit {
    fn plan_id(&self) -> u64;

    fn into_edit(self) -> PlanEdit;
}

#[derive(ClapArgs)]
pub struct AddWeekArgs {
    pub plan_id: u64,
    #[arg(short, long, help = "Week number; defaults to one past the last week")]
    pub number: Option<u32>,
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(ClapArgs)]
pub struct RemoveWeekArgs {
    pub plan_id: u64,
    #[arg(value_parser = week_path, help = "Index of the week, e.g. 0")]
    pub at: WeekPath,
}

#[derive(Subcommand)]
pub enum WeekCommands {
    /// Append a week to a plan
    #[command(alias = "a")]
    Add(AddWeekArgs),
    /// Remove a week with its days
    #[command(alias = "rm")]
    Remove(RemoveWeekArgs),
}

impl HierarchyEdit for WeekCommands {
    fn plan_id(&self) -> u64 {
        match self {
            WeekCommands::Add(args) => args.plan_id,
            WeekCommands::Remove(args) => args.plan_id,
        }
    }

    fn into_edit(self) -> PlanEdit {
        match self {
            WeekCommands::Add(args) => PlanEdit::AddWeek(WeekInput {
                week_number: args.number,
                description: args.description,
            }),
            WeekCommands::Remove(args) => PlanEdit::DeleteWeek(args.at),
        }
    }
}

#[derive(ClapArgs)]
pub struct AddDayArgs {
    pub plan_id: u64,
    #[arg(value_parser = week_path, help = "Index of the week, e.g. 0")]
    pub week: WeekPath,
    #[arg(short, long, help = "Day of the week, 1 to 7; defaults to the next free day")]
    pub number: Option<u8>,
    #[arg(short, long)]
    pub title: Option<String>,
    /// Mark the day as a rest day
    #[arg(long)]
    pub rest: bool,
}

#[derive(ClapArgs)]
pub struct RemoveDayArgs {
    pub plan_id: u64,
    #[arg(value_parser = day_path, help = "Index path of the day, e.g. 0.1")]
    pub at: DayPath,
}

#[derive(Subcommand)]
pub enum DayCommands {
    /// Add a day to a week
    #[command(alias = "a")]
    Add(AddDayArgs),
    /// Remove a day with its sessions
    #[command(alias = "rm")]
    Remove(RemoveDayArgs),
}

impl HierarchyEdit for DayCommands {
    fn plan_id(&self) -> u64 {
        match self {
            DayCommands::Add(args) => args.plan_id,
            DayCommands::Remove(args) => args.plan_id,
        }
    }

    fn into_edit(self) -> PlanEdit {
        match self {
            DayCommands::Add(args) => PlanEdit::AddDay {
                at: args.week,
                day: DayInput {
                    day_number: args.number,
                    title: args.title,
                    is_rest_day: args.rest.then_some(true),
                },
            },
            DayCommands::Remove(args) => PlanEdit::DeleteDay(args.at),
        }
    }
}

#[derive(ClapArgs)]
pub struct AddSessionArgs {
    pub plan_id: u64,
    #[arg(value_parser = day_path, help = "Index path of the day, e.g. 0.1")]
    pub day: DayPath,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, help = "Position among the day's sessions; defaults to last")]
    pub order: Option<u32>,
}

#[derive(ClapArgs)]
pub struct RemoveSessionArgs {
    pub plan_id: u64,
    #[arg(value_parser = session_path, help = "Index path of the session, e.g. 0.1.0")]
    pub at: SessionPath,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Add a session to a day
    #[command(alias = "a")]
    Add(AddSessionArgs),
    /// Remove a session with its exercises
    #[command(alias = "rm")]
    Remove(RemoveSessionArgs),
}

impl HierarchyEdit for SessionCommands {
    fn plan_id(&self) -> u64 {
        match self {
            SessionCommands::Add(args) => args.plan_id,
            SessionCommands::Remove(args) => args.plan_id,
        }
    }

    fn into_edit(self) -> PlanEdit {
        match self {
            SessionCommands::Add(args) => PlanEdit::AddSession {
                at: args.day,
                session: SessionInput {
                    order_index: args.order,
                    title: args.title,
                    notes: args.notes,
                },
            },
            SessionCommands::Remove(args) => PlanEdit::DeleteSession(args.at),
        }
    }
}

#[derive(ClapArgs)]
pub struct AddLiftArgs {
    pub plan_id: u64,
    #[arg(value_parser = session_path, help = "Index path of the session, e.g. 0.1.0")]
    pub session: SessionPath,
    #[arg(help = "Library exercise to perform")]
    pub exercise_id: u64,
    #[arg(short, long, help = "Execution group; share one to build a superset")]
    pub group: Option<u32>,
    #[arg(long, help = "Position within the session; defaults to last")]
    pub order: Option<u32>,
    #[arg(long, help = "Rest after the exercise, in seconds")]
    pub rest: Option<u32>,
    #[arg(long, help = "Rest after the execution group, in seconds")]
    pub group_rest: Option<u32>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(ClapArgs)]
pub struct RemoveLiftArgs {
    pub plan_id: u64,
    #[arg(value_parser = exercise_path, help = "Index path of the exercise, e.g. 0.1.0.2")]
    pub at: ExercisePath,
}

#[derive(Subcommand)]
pub enum LiftCommands {
    /// Add a library exercise to a session
    #[command(alias = "a")]
    Add(AddLiftArgs),
    /// Remove an exercise with its sets
    #[command(alias = "rm")]
    Remove(RemoveLiftArgs),
}

impl HierarchyEdit for LiftCommands {
    fn plan_id(&self) -> u64 {
        match self {
            LiftCommands::Add(args) => args.plan_id,
            LiftCommands::Remove(args) => args.plan_id,
        }
    }

    fn into_edit(self) -> PlanEdit {
        match self {
            LiftCommands::Add(args) => PlanEdit::AddExercise {
                at: args.session,
                exercise: ExerciseInput {
                    exercise_id: Some(args.exercise_id),
                    order_within_session: args.order,
                    execution_group: args.group,
                    post_exercise_rest_seconds: args.rest,
                    post_group_rest_seconds: args.group_rest,
                    notes: args.notes,
                },
            },
            LiftCommands::Remove(args) => PlanEdit::DeleteExercise(args.at),
        }
    }
}

#[derive(ClapArgs)]
pub struct AddSetArgs {
    pub plan_id: u64,
    #[arg(value_parser = exercise_path, help = "Index path of the exercise, e.g. 0.1.0.2")]
    pub exercise: ExercisePath,
    #[arg(short, long)]
    pub reps: Option<u32>,
    #[arg(short, long)]
    pub weight: Option<f64>,
    #[arg(short, long, help = "kg or lb")]
    pub unit: Option<WeightUnit>,
    #[arg(short = 't', long = "type", help = "normal, warmup, dropset, failure, ...")]
    pub set_type: Option<SetType>,
    #[arg(long, help = "Target duration in seconds")]
    pub duration: Option<u32>,
    #[arg(long, help = "Target distance in meters")]
    pub distance: Option<f64>,
    #[arg(long, help = "Rest after the set, in seconds")]
    pub rest: Option<u32>,
    #[arg(long, help = "Set number; defaults to one past the last set")]
    pub number: Option<u32>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(ClapArgs)]
pub struct RemoveSetArgs {
    pub plan_id: u64,
    #[arg(value_parser = set_path, help = "Index path of the set, e.g. 0.1.0.2.0")]
    pub at: SetPath,
}

#[derive(Subcommand)]
pub enum SetCommands {
    /// Add a set to an exercise
    #[command(alias = "a")]
    Add(AddSetArgs),
    /// Remove a set
    #[command(alias = "rm")]
    Remove(RemoveSetArgs),
}

impl HierarchyEdit for SetCommands {
    fn plan_id(&self) -> u64 {
        match self {
            SetCommands::Add(args) => args.plan_id,
            SetCommands::Remove(args) => args.plan_id,
        }
    }

    fn into_edit(self) -> PlanEdit {
        match self {
            SetCommands::Add(args) => PlanEdit::AddSet {
                at: args.exercise,
                set: SetInput {
                    set_number: args.number,
                    set_type: args.set_type,
                    target_reps: args.reps,
                    target_weight: args.weight,
                    weight_unit: args.unit,
                    target_duration_seconds: args.duration,
                    target_distance_meters: args.distance,
                    target_rest_seconds: args.rest,
                    notes: args.notes,
                },
            },
            SetCommands::Remove(args) => PlanEdit::DeleteSet(args.at),
        }
    }
}

// ============================================================================
// Exercise library
// ============================================================================

#[derive(ClapArgs)]
pub struct CreateExerciseArgs {
    /// Name of the exercise
    pub name: String,
    #[arg(short, long, help = "Primary muscle group, e.g. quads")]
    pub muscle: Option<String>,
    #[arg(short, long)]
    pub equipment: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(short, long)]
    pub instructions: Option<String>,
}

impl From<CreateExerciseArgs> for CreateExercise {
    fn from(val: CreateExerciseArgs) -> Self {
        CreateExercise {
            name: val.name,
            image_url: val.image_url,
            primary_muscle: val.muscle,
            equipment: val.equipment,
            instructions: val.instructions,
        }
    }
}

#[derive(ClapArgs)]
pub struct ListExercisesArgs {
    #[arg(help = "Only exercises whose name contains this text")]
    pub query: Option<String>,
    #[arg(short, long)]
    pub muscle: Option<String>,
}

impl From<ListExercisesArgs> for SearchExercises {
    fn from(val: ListExercisesArgs) -> Self {
        SearchExercises {
            query: val.query,
            muscle: val.muscle,
        }
    }
}

#[derive(ClapArgs)]
pub struct ShowExerciseArgs {
    pub id: u64,
}

impl From<ShowExerciseArgs> for Id {
    fn from(val: ShowExerciseArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// Add an exercise to the library
    #[command(alias = "c")]
    Create(CreateExerciseArgs),
    /// Search the library
    #[command(aliases = ["l", "ls", "search"])]
    List(ListExercisesArgs),
    /// Show a library exercise
    #[command(alias = "s")]
    Show(ShowExerciseArgs),
}
