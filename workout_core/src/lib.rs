#![forbid(unsafe_code)]

//! Core domain model and reporting logic for the workout log.
//!
//! This crate provides:
//! - Domain types (workout records, resistance and cardio payloads)
//! - Record validation and CSV row conversion
//! - Persistence (append-only CSV store)
//! - Aggregated reports and text bar charts

pub mod types;
pub mod error;
pub mod record;
pub mod config;
pub mod logging;
pub mod store;
pub mod report;
pub mod chart;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use record::WorkoutDraft;
pub use config::Config;
pub use store::{CsvStore, SkippedRow, StoreContents, WorkoutSink};
pub use report::{
    frequency_report, personal_records, ranked, total_cardio_duration, volume_report,
    PersonalRecord, Report,
};
pub use chart::BarChart;
