//! Aggregated views over the workout history.
//!
//! Every view is a pure function of the records in storage order. Exercises
//! without a qualifying record are left out of a view rather than reported
//! as zero.

use crate::{WorkoutDetail, WorkoutRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Heaviest single-record weight for an exercise
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PersonalRecord {
    pub weight: f64,
    pub date: NaiveDate,
}

/// Number of sessions logged per exercise, across both kinds
pub fn frequency_report(records: &[WorkoutRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.exercise_name().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Total volume (sets × reps × weight) per exercise, resistance only
pub fn volume_report(records: &[WorkoutRecord]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for record in records {
        if let WorkoutDetail::Resistance { .. } = record.detail() {
            *totals.entry(record.exercise_name().to_string()).or_insert(0.0) += record.volume();
        }
    }
    totals
}

/// Maximum weight per exercise; on a tie the earliest stored record wins
pub fn personal_records(records: &[WorkoutRecord]) -> BTreeMap<String, PersonalRecord> {
    let mut best: BTreeMap<String, PersonalRecord> = BTreeMap::new();
    for record in records {
        let Some(weight) = record.weight() else {
            continue;
        };
        let candidate = PersonalRecord {
            weight,
            date: record.date(),
        };
        match best.get_mut(record.exercise_name()) {
            Some(current) if weight > current.weight => *current = candidate,
            Some(_) => {}
            None => {
                best.insert(record.exercise_name().to_string(), candidate);
            }
        }
    }
    best
}

/// Sum of cardio minutes
pub fn total_cardio_duration(records: &[WorkoutRecord]) -> f64 {
    records.iter().filter_map(WorkoutRecord::duration_minutes).sum()
}

/// Entries sorted by value, largest first; equal values fall back to name order
pub fn ranked<V: Copy + PartialOrd>(map: &BTreeMap<String, V>) -> Vec<(&str, V)> {
    let mut entries: Vec<(&str, V)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    // BTreeMap iteration is already name-ordered and sort_by is stable
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

/// All four views computed from one load of the store
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    pub frequency: BTreeMap<String, usize>,
    pub volume: BTreeMap<String, f64>,
    pub personal_records: BTreeMap<String, PersonalRecord>,
    pub total_cardio_minutes: f64,
}

impl Report {
    pub fn from_records(records: &[WorkoutRecord]) -> Self {
        let report = Self {
            frequency: frequency_report(records),
            volume: volume_report(records),
            personal_records: personal_records(records),
            total_cardio_minutes: total_cardio_duration(records),
        };
        tracing::info!(
            "Built report over {} records ({} exercises)",
            records.len(),
            report.frequency.len()
        );
        report
    }

    pub fn is_empty(&self) -> bool {
        self.frequency.is_empty()
    }

    /// Personal records, heaviest first
    pub fn ranked_personal_records(&self) -> Vec<(&str, PersonalRecord)> {
        let mut entries: Vec<(&str, PersonalRecord)> = self
            .personal_records
            .iter()
            .map(|(name, pr)| (name.as_str(), *pr))
            .collect();
        entries.sort_by(|a, b| {
            b.1.weight
                .partial_cmp(&a.1.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries
    }
}
