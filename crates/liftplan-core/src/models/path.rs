//! Index paths addressing nodes of a plan tree.
//!
//! Indices are 0-based positions in the children vectors of the tree they
//! are applied to, not ordering fields such as `week_number`.

use std::fmt;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WeekPath {
    pub week: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DayPath {
    pub week: usize,
    pub day: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SessionPath {
    pub week: usize,
    pub day: usize,
    pub session: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExercisePath {
    pub week: usize,
    pub day: usize,
    pub session: usize,
    pub exercise: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetPath {
    pub week: usize,
    pub day: usize,
    pub session: usize,
    pub exercise: usize,
    pub set: usize,
}

impl WeekPath {
    pub fn new(week: usize) -> Self {
        Self { week }
    }

    pub fn day(self, day: usize) -> DayPath {
        DayPath {
            week: self.week,
            day,
        }
    }
}

impl DayPath {
    pub fn new(week: usize, day: usize) -> Self {
        Self { week, day }
    }

    pub fn week(self) -> WeekPath {
        WeekPath { week: self.week }
    }

    pub fn session(self, session: usize) -> SessionPath {
        SessionPath {
            week: self.week,
            day: self.day,
            session,
        }
    }
}

impl SessionPath {
    pub fn new(week: usize, day: usize, session: usize) -> Self {
        Self { week, day, session }
    }

    pub fn day(self) -> DayPath {
        DayPath {
            week: self.week,
            day: self.day,
        }
    }

    pub fn exercise(self, exercise: usize) -> ExercisePath {
        ExercisePath {
            week: self.week,
            day: self.day,
            session: self.session,
            exercise,
        }
    }
}

impl ExercisePath {
    pub fn new(week: usize, day: usize, session: usize, exercise: usize) -> Self {
        Self {
            week,
            day,
            session,
            exercise,
        }
    }

    pub fn session(self) -> SessionPath {
        SessionPath {
            week: self.week,
            day: self.day,
            session: self.session,
        }
    }

    pub fn set(self, set: usize) -> SetPath {
        SetPath {
            week: self.week,
            day: self.day,
            session: self.session,
            exercise: self.exercise,
            set,
        }
    }
}

impl SetPath {
    pub fn exercise(self) -> ExercisePath {
        ExercisePath {
            week: self.week,
            day: self.day,
            session: self.session,
            exercise: self.exercise,
        }
    }
}

impl fmt::Display for WeekPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {}", self.week)
    }
}

impl fmt::Display for DayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / day {}", self.week(), self.day)
    }
}

impl fmt::Display for SessionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / session {}", self.day(), self.session)
    }
}

impl fmt::Display for ExercisePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / exercise {}", self.session(), self.exercise)
    }
}

impl fmt::Display for SetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / set {}", self.exercise(), self.set)
    }
}
