//! Partial updates for hierarchy nodes.
//!
//! `None` leaves a field untouched. Nullable fields are `Option<Option<T>>`:
//! `Some(None)` clears the value, `Some(Some(v))` sets it.

use super::{DayFields, SessionExerciseFields, SessionFields, SetFields, SetType, WeekFields, WeightUnit};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekPatch {
    pub week_number: Option<u32>,
    pub description: Option<Option<String>>,
}

impl WeekPatch {
    pub fn apply_to(&self, fields: &mut WeekFields) {
        if let Some(week_number) = self.week_number {
            fields.week_number = week_number;
        }
        if let Some(description) = &self.description {
            fields.description.clone_from(description);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPatch {
    pub day_number: Option<u8>,
    pub title: Option<Option<String>>,
    pub is_rest_day: Option<bool>,
}

impl DayPatch {
    pub fn apply_to(&self, fields: &mut DayFields) {
        if let Some(day_number) = self.day_number {
            fields.day_number = day_number;
        }
        if let Some(title) = &self.title {
            fields.title.clone_from(title);
        }
        if let Some(is_rest_day) = self.is_rest_day {
            fields.is_rest_day = is_rest_day;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPatch {
    pub order_index: Option<u32>,
    pub title: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl SessionPatch {
    pub fn apply_to(&self, fields: &mut SessionFields) {
        if let Some(order_index) = self.order_index {
            fields.order_index = order_index;
        }
        if let Some(title) = &self.title {
            fields.title.clone_from(title);
        }
        if let Some(notes) = &self.notes {
            fields.notes.clone_from(notes);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionExercisePatch {
    pub exercise_id: Option<u64>,
    pub order_within_session: Option<u32>,
    pub execution_group: Option<u32>,
    pub post_exercise_rest_seconds: Option<Option<u32>>,
    pub post_group_rest_seconds: Option<Option<u32>>,
    pub notes: Option<Option<String>>,
}

impl SessionExercisePatch {
    pub fn apply_to(&self, fields: &mut SessionExerciseFields) {
        if let Some(exercise_id) = self.exercise_id {
            fields.exercise_id = exercise_id;
        }
        if let Some(order) = self.order_within_session {
            fields.order_within_session = order;
        }
        if let Some(group) = self.execution_group {
            fields.execution_group = group;
        }
        if let Some(rest) = self.post_exercise_rest_seconds {
            fields.post_exercise_rest_seconds = rest;
        }
        if let Some(rest) = self.post_group_rest_seconds {
            fields.post_group_rest_seconds = rest;
        }
        if let Some(notes) = &self.notes {
            fields.notes.clone_from(notes);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetPatch {
    pub set_number: Option<u32>,
    pub set_type: Option<SetType>,
    pub target_reps: Option<Option<u32>>,
    pub target_weight: Option<Option<f64>>,
    pub weight_unit: Option<Option<WeightUnit>>,
    pub target_duration_seconds: Option<Option<u32>>,
    pub target_distance_meters: Option<Option<f64>>,
    pub target_rest_seconds: Option<Option<u32>>,
    pub notes: Option<Option<String>>,
}

impl SetPatch {
    pub fn apply_to(&self, fields: &mut SetFields) {
        if let Some(set_number) = self.set_number {
            fields.set_number = set_number;
        }
        if let Some(set_type) = self.set_type {
            fields.set_type = set_type;
        }
        if let Some(reps) = self.target_reps {
            fields.target_reps = reps;
        }
        if let Some(weight) = self.target_weight {
            fields.target_weight = weight;
        }
        if let Some(unit) = self.weight_unit {
            fields.weight_unit = unit;
        }
        if let Some(duration) = self.target_duration_seconds {
            fields.target_duration_seconds = duration;
        }
        if let Some(distance) = self.target_distance_meters {
            fields.target_distance_meters = distance;
        }
        if let Some(rest) = self.target_rest_seconds {
            fields.target_rest_seconds = rest;
        }
        if let Some(notes) = &self.notes {
            fields.notes.clone_from(notes);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
