//! Append-only CSV store for workout records.
//!
//! One header row followed by one row per record. Rows are appended with an
//! exclusive file lock and read back in full under a shared lock. A damaged
//! row is skipped with a warning so a single bad line never hides the rest of
//! the history.

use crate::record::COLUMNS;
use crate::{Result, WorkoutRecord};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Record sink trait for persisting workouts
pub trait WorkoutSink {
    fn append(&mut self, record: &WorkoutRecord) -> Result<()>;
}

/// A stored row that could not be read back
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file
    pub line: u64,
    pub reason: String,
}

/// Everything readable from the store, in storage order
#[derive(Clone, Debug, Default)]
pub struct StoreContents {
    pub records: Vec<WorkoutRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// CSV-backed workout store
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Create a store handle for the given path; nothing is touched on disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn open_for_append(&self) -> Result<File> {
        self.ensure_parent_dir()?;
        let file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(file)
    }

    /// Create the file with its header row if it is missing or empty
    pub fn ensure_exists(&self) -> Result<()> {
        let file = self.open_for_append()?;
        file.lock_exclusive()?;

        if file.metadata()?.len() == 0 {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&file);
            writer.write_record(COLUMNS)?;
            writer.flush()?;
            tracing::info!("Created workout log at {:?}", self.path);
        }

        file.unlock()?;
        Ok(())
    }

    /// Read every record from the store
    ///
    /// A missing or empty file yields no records. Rows that fail to parse
    /// are reported in [`StoreContents::skipped`] instead of failing the load.
    /// A first line that is not the header is read as a row.
    pub fn load_all(&self) -> Result<StoreContents> {
        if !self.path.exists() {
            tracing::debug!("No workout log at {:?}", self.path);
            return Ok(StoreContents::default());
        }

        let mut file = File::open(&self.path)?;
        // Acquire shared lock for reading
        file.lock_shared()?;
        let mut data = Vec::new();
        let read = file.read_to_end(&mut data);
        file.unlock()?;
        read?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data.as_slice());

        let mut contents = StoreContents::default();
        for result in reader.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    tracing::warn!("Failed to read CSV row in {:?}: {}", self.path, e);
                    contents.skipped.push(SkippedRow {
                        line,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let line = row.position().map(|p| p.line()).unwrap_or(0);
            if line == 1 {
                if row.iter().eq(COLUMNS.iter().copied()) {
                    continue;
                }
                tracing::warn!(
                    "Line 1 of {:?} is not the expected header; reading it as a row",
                    self.path
                );
            }

            let cells: Vec<&str> = row.iter().collect();
            match WorkoutRecord::from_row(&cells) {
                Ok(record) => contents.records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping line {} of {:?}: {}", line, self.path, e);
                    contents.skipped.push(SkippedRow {
                        line,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            "Loaded {} records from {:?} ({} skipped)",
            contents.records.len(),
            self.path,
            contents.skipped.len()
        );

        Ok(contents)
    }
}

/// True when the last byte of a non-empty file is a newline
fn ends_with_newline(mut file: &File, len: u64) -> Result<bool> {
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl WorkoutSink for CsvStore {
    fn append(&mut self, record: &WorkoutRecord) -> Result<()> {
        let file = self.open_for_append()?;

        // Acquire exclusive lock
        file.lock_exclusive()?;

        let len = file.metadata()?.len();
        // A hand-edited file may have lost its final newline
        if len > 0 && !ends_with_newline(&file, len)? {
            (&file).write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&file);
        if len == 0 {
            writer.write_record(COLUMNS)?;
        }
        writer.write_record(record.to_row())?;
        writer.flush()?;

        // Lock is also released when file is dropped
        file.unlock()?;

        tracing::debug!("Appended {} to {:?}", record, self.path);
        Ok(())
    }
}
