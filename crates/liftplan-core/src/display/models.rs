//! Display implementations for domain models.
//!
//! Kept apart from the model definitions. Everything renders markdown for the
//! terminal renderer and MCP responses.

use std::fmt;

use super::datetime::{LocalDate, LocalDateTime};
use crate::{
    changeset::{Changeset, LevelChanges},
    models::{
        Difficulty, Exercise, Plan, PlanSummary, SetFields, SetType, Visibility, WeightUnit,
    },
};

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Difficulty: {}", self.difficulty)?;
        match self.team_id {
            Some(team) => writeln!(f, "- Visibility: {} (team {team})", self.visibility)?,
            None => writeln!(f, "- Visibility: {}", self.visibility)?,
        }
        writeln!(f, "- Created by: {}", self.created_by)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.title, self.id)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        writeln!(
            f,
            "- **Level**: {}, {}",
            self.difficulty, self.visibility
        )?;
        let weeks = if self.total_weeks == 1 { "week" } else { "weeks" };
        writeln!(
            f,
            "- **Schedule**: {} {weeks}, {} training days, {} rest days, {} sessions",
            self.total_weeks, self.training_days, self.rest_days, self.total_sessions
        )?;
        writeln!(f, "- **Created by**: {}", self.created_by)?;
        writeln!(f, "- **Updated**: {}", LocalDate(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.name)?;
        writeln!(f)?;

        if let Some(muscle) = &self.primary_muscle {
            writeln!(f, "- Primary muscle: {muscle}")?;
        }
        if let Some(equipment) = &self.equipment {
            writeln!(f, "- Equipment: {equipment}")?;
        }
        if let Some(url) = &self.image_url {
            writeln!(f, "- Image: {url}")?;
        }
        writeln!(f, "- Added: {}", LocalDate(&self.created_at))?;

        if let Some(instructions) = &self.instructions {
            writeln!(f)?;
            writeln!(f, "{instructions}")?;
        }
        writeln!(f)
    }
}

/// Compact prescription, e.g. `8 reps @ 62.5 kg, rest 90s (warmup)`.
impl fmt::Display for SetFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        let mut load = String::new();
        if let Some(reps) = self.target_reps {
            load.push_str(&format!("{reps} reps"));
        }
        if let Some(weight) = self.target_weight {
            if !load.is_empty() {
                load.push(' ');
            }
            load.push_str(&format!("@ {weight}"));
            if let Some(unit) = self.weight_unit {
                load.push_str(&format!(" {unit}"));
            }
        }
        if !load.is_empty() {
            parts.push(load);
        }
        if let Some(seconds) = self.target_duration_seconds {
            parts.push(format!("{seconds}s"));
        }
        if let Some(meters) = self.target_distance_meters {
            parts.push(format!("{meters} m"));
        }
        if let Some(rest) = self.target_rest_seconds {
            parts.push(format!("rest {rest}s"));
        }

        if parts.is_empty() {
            f.write_str("no target")?;
        } else {
            f.write_str(&parts.join(", "))?;
        }
        if self.set_type != SetType::Normal {
            write!(f, " ({})", self.set_type)?;
        }
        if let Some(notes) = &self.notes {
            write!(f, " _{notes}_")?;
        }
        Ok(())
    }
}

fn level_line<F>(f: &mut fmt::Formatter<'_>, name: &str, changes: &LevelChanges<F>) -> fmt::Result {
    if changes.is_empty() {
        return Ok(());
    }
    writeln!(
        f,
        "- {name}: {} added, {} updated, {} deleted",
        changes.added.len(),
        changes.updated.len(),
        changes.deleted.len()
    )
}

impl fmt::Display for Changeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No changes to save for plan {}.", self.plan_id);
        }

        writeln!(f, "## Changes for plan {}", self.plan_id)?;
        writeln!(f)?;
        level_line(f, "Weeks", &self.weeks)?;
        level_line(f, "Days", &self.days)?;
        level_line(f, "Sessions", &self.sessions)?;
        level_line(f, "Exercises", &self.exercises)?;
        level_line(f, "Sets", &self.sets)
    }
}
