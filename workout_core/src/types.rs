//! Core domain types for the workout log.
//!
//! A logged session is a [`WorkoutRecord`]: a date, an exercise name and
//! exactly one payload, either resistance (sets/reps/weight) or cardio
//! (duration). Records are only built through the validating constructors in
//! [`crate::record`], so a value of this type always upholds its invariants.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Workout Kind
// ============================================================================

/// Which payload a record carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkoutKind {
    Resistance,
    Cardio,
}

impl WorkoutKind {
    /// Tag written to the `kind` column of the store
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Resistance => "resistance",
            WorkoutKind::Cardio => "cardio",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "resistance" => Ok(WorkoutKind::Resistance),
            "cardio" => Ok(WorkoutKind::Cardio),
            other => Err(crate::Error::Parse(format!("unknown workout kind '{}'", other))),
        }
    }
}

// ============================================================================
// Record Types
// ============================================================================

/// Kind-specific payload of a record
#[derive(Clone, Debug, PartialEq)]
pub enum WorkoutDetail {
    Resistance { sets: u32, reps: u32, weight: f64 },
    Cardio { duration_minutes: f64 },
}

impl WorkoutDetail {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetail::Resistance { .. } => WorkoutKind::Resistance,
            WorkoutDetail::Cardio { .. } => WorkoutKind::Cardio,
        }
    }
}

/// One logged workout session
#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutRecord {
    pub(crate) date: NaiveDate,
    pub(crate) exercise_name: String,
    pub(crate) detail: WorkoutDetail,
}

impl WorkoutRecord {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn exercise_name(&self) -> &str {
        &self.exercise_name
    }

    pub fn detail(&self) -> &WorkoutDetail {
        &self.detail
    }

    pub fn kind(&self) -> WorkoutKind {
        self.detail.kind()
    }

    /// Weight lifted, or None for cardio
    pub fn weight(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Resistance { weight, .. } => Some(weight),
            WorkoutDetail::Cardio { .. } => None,
        }
    }

    /// Duration in minutes, or None for resistance
    pub fn duration_minutes(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Cardio { duration_minutes } => Some(duration_minutes),
            WorkoutDetail::Resistance { .. } => None,
        }
    }

    /// Training volume (sets × reps × weight); zero for cardio
    pub fn volume(&self) -> f64 {
        match self.detail {
            WorkoutDetail::Resistance { sets, reps, weight } => {
                f64::from(sets) * f64::from(reps) * weight
            }
            WorkoutDetail::Cardio { .. } => 0.0,
        }
    }
}

impl fmt::Display for WorkoutRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail {
            WorkoutDetail::Resistance { sets, reps, weight } => write!(
                f,
                "{} {}: {} x {} @ {}",
                self.date, self.exercise_name, sets, reps, weight
            ),
            WorkoutDetail::Cardio { duration_minutes } => write!(
                f,
                "{} {}: {} min",
                self.date, self.exercise_name, duration_minutes
            ),
        }
    }
}
