//! Read-only projection of a persisted plan tree.
//!
//! [`PlanOutline::from_details`] orders every level by its ordering field,
//! hides the sessions of rest days and groups the exercises of a session by
//! execution group, so that supersets can be shown together. The outline
//! shares its nodes with the tree it was built from.

use std::{fmt, sync::Arc};

use serde::Serialize;

use crate::models::{Day, ExerciseSet, Plan, PlanDetails, Session, SessionExercise, Week};

/// A plan arranged for display.
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutline {
    pub plan: Plan,
    pub weeks: Vec<WeekOutline>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekOutline {
    pub week: Arc<Week>,
    pub days: Vec<DayOutline>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayOutline {
    pub day: Arc<Day>,
    /// Always empty for rest days
    pub sessions: Vec<SessionOutline>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionOutline {
    pub session: Arc<Session>,
    pub groups: Vec<ExerciseGroup>,
}

/// Exercises of one session sharing an execution group.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseGroup {
    pub execution_group: u32,
    pub exercises: Vec<ExerciseOutline>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseOutline {
    pub exercise: Arc<SessionExercise>,
    pub sets: Vec<Arc<ExerciseSet>>,
}

impl ExerciseGroup {
    /// More than one exercise performed back to back.
    pub fn is_superset(&self) -> bool {
        self.exercises.len() > 1
    }
}

/// Clones the `Arc`s of `children` sorted by `key`, keeping the given order
/// for equal keys.
fn sorted<T, K: Ord>(children: &[Arc<T>], key: impl Fn(&T) -> K) -> Vec<Arc<T>> {
    let mut children = children.to_vec();
    children.sort_by_key(|child| key(child));
    children
}

impl PlanOutline {
    pub fn from_details(details: &PlanDetails) -> Self {
        let weeks = sorted(&details.weeks, |w| w.fields.week_number)
            .into_iter()
            .map(|week| WeekOutline {
                days: sorted(&week.days, |d| d.fields.day_number)
                    .into_iter()
                    .map(DayOutline::from_day)
                    .collect(),
                week,
            })
            .collect();

        Self {
            plan: details.plan.clone(),
            weeks,
        }
    }

    /// Whether the plan has any week at all.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

impl DayOutline {
    fn from_day(day: Arc<Day>) -> Self {
        let sessions = if day.fields.is_rest_day {
            Vec::new()
        } else {
            sorted(&day.sessions, |s| s.fields.order_index)
                .into_iter()
                .map(SessionOutline::from_session)
                .collect()
        };
        Self { day, sessions }
    }
}

impl SessionOutline {
    fn from_session(session: Arc<Session>) -> Self {
        let mut groups: Vec<ExerciseGroup> = Vec::new();

        for exercise in sorted(&session.exercises, |e| e.fields.order_within_session) {
            let outline = ExerciseOutline {
                sets: sorted(&exercise.sets, |s| s.fields.set_number),
                exercise,
            };
            let group_number = outline.exercise.fields.execution_group;
            match groups.iter_mut().find(|g| g.execution_group == group_number) {
                Some(group) => group.exercises.push(outline),
                None => groups.push(ExerciseGroup {
                    execution_group: group_number,
                    exercises: vec![outline],
                }),
            }
        }

        Self { session, groups }
    }
}

impl fmt::Display for PlanOutline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plan)?;

        if self.weeks.is_empty() {
            return writeln!(f, "\nNo weeks in this plan.");
        }
        for week in &self.weeks {
            writeln!(f)?;
            write!(f, "{week}")?;
        }
        Ok(())
    }
}

impl fmt::Display for WeekOutline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.week.fields.description {
            Some(desc) => writeln!(f, "## Week {}: {desc}", self.week.fields.week_number)?,
            None => writeln!(f, "## Week {}", self.week.fields.week_number)?,
        }
        for day in &self.days {
            writeln!(f)?;
            write!(f, "{day}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DayOutline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = &self.day.fields;
        write!(f, "### Day {}", fields.day_number)?;
        if let Some(title) = &fields.title {
            write!(f, ": {title}")?;
        }
        if fields.is_rest_day {
            return writeln!(f, " (rest day)");
        }
        writeln!(f)?;

        if self.sessions.is_empty() {
            writeln!(f, "\nNo sessions scheduled.")?;
        }
        for session in &self.sessions {
            writeln!(f)?;
            write!(f, "{session}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SessionOutline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = &self.session.fields;
        match &fields.title {
            Some(title) => writeln!(f, "#### {title}")?,
            None => writeln!(f, "#### Session {}", fields.order_index)?,
        }
        if let Some(notes) = &fields.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }
        writeln!(f)?;

        for group in &self.groups {
            if group.is_superset() {
                writeln!(f, "- **Superset** (group {})", group.execution_group)?;
                for exercise in &group.exercises {
                    exercise.fmt_indented(f, "  ")?;
                }
                if let Some(rest) = group
                    .exercises
                    .last()
                    .and_then(|e| e.exercise.fields.post_group_rest_seconds)
                {
                    writeln!(f, "  - Rest {rest}s after the superset")?;
                }
            } else {
                for exercise in &group.exercises {
                    exercise.fmt_indented(f, "")?;
                }
            }
        }
        Ok(())
    }
}

impl ExerciseOutline {
    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        let fields = &self.exercise.fields;
        write!(f, "{indent}- **{}**", self.exercise.display_name())?;
        match self.sets.len() {
            0 => writeln!(f)?,
            1 => writeln!(f, " (1 set)")?,
            n => writeln!(f, " ({n} sets)")?,
        }
        for set in &self.sets {
            writeln!(f, "{indent}  - Set {}: {}", set.fields.set_number, set.fields)?;
        }
        if let Some(rest) = fields.post_exercise_rest_seconds {
            writeln!(f, "{indent}  - Rest {rest}s")?;
        }
        if let Some(notes) = &fields.notes {
            writeln!(f, "{indent}  - _{notes}_")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        fixtures::{details, exercise_fields},
        ids::NodeId,
        models::{DayFields, SessionExercise},
    };

    #[test]
    fn test_shared_execution_group_forms_superset() {
        let mut tree = details();
        let week = Arc::make_mut(&mut tree.weeks[0]);
        let day = Arc::make_mut(&mut week.days[0]);
        let session = Arc::make_mut(&mut day.sessions[0]);
        session
            .exercises
            .push(Arc::new(SessionExercise::new(42, exercise_fields(102, 3, 2))));

        let outline = PlanOutline::from_details(&tree);
        let groups = &outline.weeks[0].days[0].sessions[0].groups;

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].execution_group, 1);
        assert_eq!(groups[0].exercises.len(), 2);
        assert!(groups[0].is_superset());
        assert_eq!(groups[1].execution_group, 2);
        assert_eq!(groups[1].exercises.len(), 1);
        assert!(!groups[1].is_superset());
    }

    #[test]
    fn test_rest_day_shows_no_sessions() {
        let tree = details();
        assert_eq!(tree.weeks[0].days[1].sessions.len(), 1);

        let outline = PlanOutline::from_details(&tree);
        let rest = &outline.weeks[0].days[1];
        assert!(rest.day.fields.is_rest_day);
        assert!(rest.sessions.is_empty());

        let output = outline.to_string();
        assert!(output.contains("### Day 2: Recovery (rest day)"));
        assert!(!output.contains("Mobility"));
    }

    #[test]
    fn test_levels_sorted_by_ordering_fields() {
        let mut tree = details();
        tree.weeks.reverse();
        let week = Arc::make_mut(&mut tree.weeks[1]);
        week.days.reverse();
        let day = Arc::make_mut(&mut week.days[1]);
        let session = Arc::make_mut(&mut day.sessions[0]);
        let squat = Arc::make_mut(&mut session.exercises[0]);
        squat.sets.reverse();

        let outline = PlanOutline::from_details(&tree);
        let numbers: Vec<u32> = outline
            .weeks
            .iter()
            .map(|w| w.week.fields.week_number)
            .collect();
        assert_eq!(numbers, vec![1, 2]);

        let days: Vec<u8> = outline.weeks[0]
            .days
            .iter()
            .map(|d| d.day.fields.day_number)
            .collect();
        assert_eq!(days, vec![1, 2]);

        let sets: Vec<u32> = outline.weeks[0].days[0].sessions[0].groups[0].exercises[0]
            .sets
            .iter()
            .map(|s| s.fields.set_number)
            .collect();
        assert_eq!(sets, vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_ordering_values_keep_tree_order() {
        let mut tree = details();
        let week = Arc::make_mut(&mut tree.weeks[1]);
        week.days.push(Arc::new(crate::models::Day::new(
            23,
            DayFields {
                day_number: 1,
                title: Some("Second".to_string()),
                is_rest_day: false,
            },
        )));

        let outline = PlanOutline::from_details(&tree);
        let ids: Vec<_> = outline.weeks[1].days.iter().map(|d| d.day.id).collect();
        assert_eq!(ids, vec![NodeId::Persisted(22), NodeId::Persisted(23)]);
    }

    #[test]
    fn test_outline_shares_nodes_with_tree() {
        let tree = details();
        let outline = PlanOutline::from_details(&tree);
        assert!(Arc::ptr_eq(&tree.weeks[1], &outline.weeks[1].week));
    }

    #[test]
    fn test_outline_display() {
        let output = PlanOutline::from_details(&details()).to_string();

        assert!(output.contains("# 1. Strength Block"));
        assert!(output.contains("## Week 1: Intro"));
        assert!(output.contains("### Day 1: Upper"));
        assert!(output.contains("#### Strength"));
        assert!(output.contains("- **Superset** (group 1)"));
        assert!(output.contains("  - **Back Squat** (3 sets)"));
        assert!(output.contains("  - **Exercise #101** (1 set)"));
        assert!(output.contains("Set 1: 5 reps @ 100"));
        assert!(output.contains("## Week 2"));
        assert!(output.contains("No sessions scheduled."));
    }
}
