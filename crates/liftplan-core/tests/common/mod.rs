#![allow(dead_code)]

use liftplan_core::{
    Planner, PlannerBuilder,
    ids::TempId,
    models::{DayFields, SessionExerciseFields, SessionFields, SetFields, WeekFields},
};
use tempfile::TempDir;

/// Helper function to create a test planner acting as `user`
pub async fn create_test_planner(user: &str) -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_user(user)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

pub fn tmp(n: u64) -> TempId {
    format!("tmp-{n}").parse().expect("valid temp id")
}

pub fn week(week_number: u32) -> WeekFields {
    WeekFields {
        week_number,
        description: None,
    }
}

pub fn day(day_number: u8) -> DayFields {
    DayFields {
        day_number,
        title: None,
        is_rest_day: false,
    }
}

pub fn session(order_index: u32) -> SessionFields {
    SessionFields {
        order_index,
        title: None,
        notes: None,
    }
}

pub fn lift(exercise_id: u64, order: u32) -> SessionExerciseFields {
    SessionExerciseFields {
        exercise_id,
        order_within_session: order,
        execution_group: order,
        ..Default::default()
    }
}

pub fn set(set_number: u32, reps: u32) -> SetFields {
    SetFields {
        set_number,
        target_reps: Some(reps),
        ..Default::default()
    }
}
