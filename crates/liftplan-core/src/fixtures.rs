//! Shared trees for unit tests.

use jiff::Timestamp;

use crate::models::{
    Day, DayFields, ExerciseRef, ExerciseSet, Plan, PlanDetails, Session, SessionExercise,
    SessionExerciseFields, SessionFields, SetFields, Week, WeekFields,
};

pub(crate) fn plan() -> Plan {
    Plan {
        id: 1,
        title: "Strength Block".to_string(),
        description: Some("Four weeks of heavy lifting".to_string()),
        difficulty: Default::default(),
        visibility: Default::default(),
        team_id: None,
        created_by: "coach".to_string(),
        created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
        updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
    }
}

pub(crate) fn set_fields(set_number: u32) -> SetFields {
    SetFields {
        set_number,
        target_reps: Some(5),
        target_weight: Some(100.0),
        ..Default::default()
    }
}

pub(crate) fn exercise_fields(exercise_id: u64, order: u32, group: u32) -> SessionExerciseFields {
    SessionExerciseFields {
        exercise_id,
        order_within_session: order,
        execution_group: group,
        ..Default::default()
    }
}

/// Week 10 holds a training day (20) with one session (30) of two exercises
/// sharing group 1 (40 with sets 50-52, 41 with set 53), and a rest day (21)
/// that still has a session (31) underneath. Week 11 has one empty day (22).
pub(crate) fn details() -> PlanDetails {
    let squat = SessionExercise::new(40, exercise_fields(100, 1, 1))
        .with_exercise(ExerciseRef {
            id: 100,
            name: "Back Squat".to_string(),
            image_url: None,
        })
        .with_sets([
            ExerciseSet::new(50, set_fields(1)),
            ExerciseSet::new(51, set_fields(2)),
            ExerciseSet::new(52, set_fields(3)),
        ]);
    let row = SessionExercise::new(41, exercise_fields(101, 2, 1))
        .with_sets([ExerciseSet::new(53, set_fields(1))]);

    let strength = Session::new(
        30,
        SessionFields {
            order_index: 1,
            title: Some("Strength".to_string()),
            notes: None,
        },
    )
    .with_exercises([squat, row]);

    let upper = Day::new(
        20,
        DayFields {
            day_number: 1,
            title: Some("Upper".to_string()),
            is_rest_day: false,
        },
    )
    .with_sessions([strength]);

    let rest = Day::new(
        21,
        DayFields {
            day_number: 2,
            title: Some("Recovery".to_string()),
            is_rest_day: true,
        },
    )
    .with_sessions([Session::new(
        31,
        SessionFields {
            order_index: 1,
            title: Some("Mobility".to_string()),
            notes: None,
        },
    )]);

    let first = Week::new(
        10,
        WeekFields {
            week_number: 1,
            description: Some("Intro".to_string()),
        },
    )
    .with_days([upper, rest]);

    let second = Week::new(
        11,
        WeekFields {
            week_number: 2,
            description: None,
        },
    )
    .with_days([Day::new(
        22,
        DayFields {
            day_number: 1,
            title: None,
            is_rest_day: false,
        },
    )]);

    PlanDetails::new(plan()).with_weeks([first, second])
}
