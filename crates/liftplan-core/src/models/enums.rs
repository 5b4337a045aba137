//! Enumerations for plans and sets.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How demanding a plan is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

impl Difficulty {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// Who can see a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only the creator
    #[default]
    Private,
    /// Members of the owning team
    Team,
    /// Everyone
    Public,
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(Visibility::Private),
            "team" => Ok(Visibility::Team),
            "public" => Ok(Visibility::Public),
            _ => Err(format!("Invalid visibility: {s}")),
        }
    }
}

impl Visibility {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Team => "team",
            Visibility::Public => "public",
        }
    }
}

/// Kind of set prescribed for an exercise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    #[default]
    Normal,
    Warmup,
    Dropset,
    Amrap,
    Emom,
    ForTime,
    Tabata,
    Pyramid,
    Failure,
    RestPause,
    Isometrics,
    Technique,
}

impl SetType {
    pub const ALL: [SetType; 12] = [
        SetType::Normal,
        SetType::Warmup,
        SetType::Dropset,
        SetType::Amrap,
        SetType::Emom,
        SetType::ForTime,
        SetType::Tabata,
        SetType::Pyramid,
        SetType::Failure,
        SetType::RestPause,
        SetType::Isometrics,
        SetType::Technique,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SetType::Normal => "normal",
            SetType::Warmup => "warmup",
            SetType::Dropset => "dropset",
            SetType::Amrap => "amrap",
            SetType::Emom => "emom",
            SetType::ForTime => "for_time",
            SetType::Tabata => "tabata",
            SetType::Pyramid => "pyramid",
            SetType::Failure => "failure",
            SetType::RestPause => "rest_pause",
            SetType::Isometrics => "isometrics",
            SetType::Technique => "technique",
        }
    }
}

impl FromStr for SetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('-', "_");
        SetType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("Invalid set type: {s}"))
    }
}

/// Unit attached to a target weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kgs" => Ok(WeightUnit::Kg),
            "lb" | "lbs" => Ok(WeightUnit::Lb),
            _ => Err(format!("Invalid weight unit: {s}")),
        }
    }
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}
