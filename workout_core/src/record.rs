//! Record validation and conversion to and from store rows.
//!
//! User input arrives as raw text in a [`WorkoutDraft`] and is checked field
//! by field before a [`WorkoutRecord`] exists. The same checks run again when
//! a row is read back from the store, so a hand-edited file cannot smuggle in
//! a negative weight.

use crate::{Error, Result, WorkoutDetail, WorkoutKind, WorkoutRecord};
use chrono::NaiveDate;

/// Column names of the store, in row order
pub const COLUMNS: [&str; 7] = [
    "date",
    "exercise_name",
    "kind",
    "sets",
    "reps",
    "weight",
    "duration_minutes",
];

/// Date format used for input and storage
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Field validators
// ============================================================================

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`)
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::Validation("date is required".into()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| {
        Error::Validation(format!("date must be YYYY-MM-DD, got '{}'", input))
    })
}

/// Exercise names are kept verbatim apart from surrounding whitespace
pub fn parse_exercise_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.is_empty() {
        return Err(Error::Validation("exercise name is required".into()));
    }
    Ok(name.to_string())
}

pub fn parse_sets(input: &str) -> Result<u32> {
    parse_count("sets", input)
}

pub fn parse_reps(input: &str) -> Result<u32> {
    parse_count("reps", input)
}

pub fn parse_weight(input: &str) -> Result<f64> {
    parse_amount("weight", input)
}

pub fn parse_duration(input: &str) -> Result<f64> {
    parse_amount("duration_minutes", input)
}

fn parse_count(field: &str, input: &str) -> Result<u32> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    let value: i64 = input.parse().map_err(|_| {
        Error::Validation(format!("{} must be a whole number, got '{}'", field, input))
    })?;
    if value < 1 {
        return Err(Error::Validation(format!(
            "{} must be at least 1, got {}",
            field, value
        )));
    }
    u32::try_from(value)
        .map_err(|_| Error::Validation(format!("{} is too large: {}", field, value)))
}

fn parse_amount(field: &str, input: &str) -> Result<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    let value: f64 = input.parse().map_err(|_| {
        Error::Validation(format!("{} must be a number, got '{}'", field, input))
    })?;
    check_amount(field, value)
}

fn check_amount(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::Validation(format!("{} must be a finite number", field)));
    }
    if value < 0.0 {
        return Err(Error::Validation(format!(
            "{} must not be negative, got {}",
            field, value
        )));
    }
    // -0.0 would otherwise be written back as "-0"
    Ok(if value == 0.0 { 0.0 } else { value })
}

// ============================================================================
// Construction
// ============================================================================

/// Raw, unvalidated input for one workout
#[derive(Clone, Debug)]
pub struct WorkoutDraft {
    pub kind: WorkoutKind,
    pub date: String,
    pub exercise_name: String,
    pub sets: Option<String>,
    pub reps: Option<String>,
    pub weight: Option<String>,
    pub duration_minutes: Option<String>,
}

impl WorkoutDraft {
    pub fn new(kind: WorkoutKind, date: impl Into<String>, exercise_name: impl Into<String>) -> Self {
        Self {
            kind,
            date: date.into(),
            exercise_name: exercise_name.into(),
            sets: None,
            reps: None,
            weight: None,
            duration_minutes: None,
        }
    }

    pub fn sets(mut self, sets: impl Into<String>) -> Self {
        self.sets = Some(sets.into());
        self
    }

    pub fn reps(mut self, reps: impl Into<String>) -> Self {
        self.reps = Some(reps.into());
        self
    }

    pub fn weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn duration_minutes(mut self, minutes: impl Into<String>) -> Self {
        self.duration_minutes = Some(minutes.into());
        self
    }
}

/// Blank and absent inputs are the same thing
fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(field: &'a Option<String>, name: &str, kind: WorkoutKind) -> Result<&'a str> {
    provided(field).ok_or_else(|| {
        Error::Validation(format!("{} is required for {} workouts", name, kind))
    })
}

fn reject_extra(field: &Option<String>, name: &str, kind: WorkoutKind) -> Result<()> {
    match provided(field) {
        Some(_) => Err(Error::Validation(format!(
            "{} does not apply to {} workouts",
            name, kind
        ))),
        None => Ok(()),
    }
}

impl WorkoutRecord {
    /// Validate a draft into a record
    pub fn construct(draft: WorkoutDraft) -> Result<Self> {
        let date = parse_date(&draft.date)?;
        let exercise_name = parse_exercise_name(&draft.exercise_name)?;
        let kind = draft.kind;

        let detail = match kind {
            WorkoutKind::Resistance => {
                reject_extra(&draft.duration_minutes, "duration_minutes", kind)?;
                WorkoutDetail::Resistance {
                    sets: parse_sets(required(&draft.sets, "sets", kind)?)?,
                    reps: parse_reps(required(&draft.reps, "reps", kind)?)?,
                    weight: parse_weight(required(&draft.weight, "weight", kind)?)?,
                }
            }
            WorkoutKind::Cardio => {
                reject_extra(&draft.sets, "sets", kind)?;
                reject_extra(&draft.reps, "reps", kind)?;
                reject_extra(&draft.weight, "weight", kind)?;
                WorkoutDetail::Cardio {
                    duration_minutes: parse_duration(required(
                        &draft.duration_minutes,
                        "duration_minutes",
                        kind,
                    )?)?,
                }
            }
        };

        Ok(WorkoutRecord {
            date,
            exercise_name,
            detail,
        })
    }

    /// Build a resistance record from typed values
    pub fn resistance(
        date: NaiveDate,
        exercise_name: &str,
        sets: u32,
        reps: u32,
        weight: f64,
    ) -> Result<Self> {
        if sets == 0 {
            return Err(Error::Validation("sets must be at least 1, got 0".into()));
        }
        if reps == 0 {
            return Err(Error::Validation("reps must be at least 1, got 0".into()));
        }
        Ok(WorkoutRecord {
            date,
            exercise_name: parse_exercise_name(exercise_name)?,
            detail: WorkoutDetail::Resistance {
                sets,
                reps,
                weight: check_amount("weight", weight)?,
            },
        })
    }

    /// Build a cardio record from typed values
    pub fn cardio(date: NaiveDate, exercise_name: &str, duration_minutes: f64) -> Result<Self> {
        Ok(WorkoutRecord {
            date,
            exercise_name: parse_exercise_name(exercise_name)?,
            detail: WorkoutDetail::Cardio {
                duration_minutes: check_amount("duration_minutes", duration_minutes)?,
            },
        })
    }

    // ========================================================================
    // Row conversion
    // ========================================================================

    /// Cells for the store, in [`COLUMNS`] order
    pub fn to_row(&self) -> Vec<String> {
        let (sets, reps, weight, duration) = match self.detail {
            WorkoutDetail::Resistance { sets, reps, weight } => (
                sets.to_string(),
                reps.to_string(),
                weight.to_string(),
                String::new(),
            ),
            WorkoutDetail::Cardio { duration_minutes } => (
                String::new(),
                String::new(),
                String::new(),
                duration_minutes.to_string(),
            ),
        };

        vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.exercise_name.clone(),
            self.kind().as_str().to_string(),
            sets,
            reps,
            weight,
            duration,
        ]
    }

    /// Rebuild a record from store cells
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Result<Self> {
        if row.len() != COLUMNS.len() {
            return Err(Error::Parse(format!(
                "expected {} fields, found {}",
                COLUMNS.len(),
                row.len()
            )));
        }
        let cell = |i: usize| row[i].as_ref().trim();

        let kind: WorkoutKind = cell(2).parse()?;
        let draft = WorkoutDraft {
            kind,
            date: cell(0).to_string(),
            exercise_name: cell(1).to_string(),
            sets: Some(cell(3).to_string()),
            reps: Some(cell(4).to_string()),
            weight: Some(cell(5).to_string()),
            duration_minutes: Some(cell(6).to_string()),
        };

        WorkoutRecord::construct(draft).map_err(|e| match e {
            Error::Validation(msg) => Error::Parse(msg),
            other => other,
        })
    }
}
