//! Collection wrappers with empty-list handling.

use std::fmt;

use crate::models::{Exercise, PlanSummary};

/// Plan summaries as returned by a listing.
///
/// ```rust
/// use liftplan_core::display::PlanSummaries;
///
/// let plans = PlanSummaries(Vec::new());
/// assert!(plans.is_empty());
/// assert_eq!(plans.to_string(), "No plans found.\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}

/// Entries of the exercise library.
#[derive(Debug, Clone, Default)]
pub struct Exercises(pub Vec<Exercise>);

impl Exercises {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Exercise> {
        self.0.iter()
    }
}

impl IntoIterator for Exercises {
    type Item = Exercise;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Exercises {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No exercises found.");
        }
        for exercise in &self.0 {
            write!(f, "{exercise}")?;
        }
        Ok(())
    }
}
