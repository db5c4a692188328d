//! Session journal for completed exposure sessions.
//!
//! Sessions are appended to a JSONL (JSON Lines) file with file locking.
//! Corrupt lines are skipped on read so one bad record never hides the
//! rest of the history.

use crate::{ExposureSession, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// File name of the journal under a data directory
pub const JOURNAL_FILE: &str = "sessions.jsonl";

/// Path of the journal file under a data directory
pub fn journal_path(data_dir: &Path) -> PathBuf {
    data_dir.join(JOURNAL_FILE)
}

/// Session sink trait for persisting completed sessions
pub trait SessionSink {
    fn append(&mut self, session: &ExposureSession) -> Result<()>;
}

/// JSONL-based session sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl SessionSink for JsonlSink {
    fn append(&mut self, session: &ExposureSession) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Acquire exclusive lock
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(session)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended session {} to journal", session.id);
        Ok(())
    }
}

/// Read all sessions from the journal, oldest first
pub fn read_sessions(path: &Path) -> Result<Vec<ExposureSession>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Acquire shared lock for reading
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut sessions = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ExposureSession>(&line) {
            Ok(session) => sessions.push(session),
            Err(e) => {
                tracing::warn!("Failed to parse session at line {}: {}", line_num + 1, e);
                // Continue reading, don't fail completely
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} sessions from journal", sessions.len());
    Ok(sessions)
}

/// A row in the CSV export
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    location: String,
    started_at: String,
    completed_at: String,
    elapsed_seconds: u32,
    base_uv: f64,
    effective_uv: f64,
    clothing: String,
    sunscreen: String,
    vitamin_gain: f64,
}

impl From<&ExposureSession> for CsvRow {
    fn from(session: &ExposureSession) -> Self {
        CsvRow {
            id: session.id.to_string(),
            location: session.location.clone(),
            started_at: session.started_at.to_rfc3339(),
            completed_at: session.completed_at.to_rfc3339(),
            elapsed_seconds: session.elapsed_seconds,
            base_uv: session.base_uv,
            effective_uv: session.effective_uv,
            clothing: session.clothing.to_string(),
            sunscreen: session.sunscreen.to_string(),
            vitamin_gain: session.vitamin_gain,
        }
    }
}

/// Export the journal to a CSV file, returning the number of rows written
pub fn export_csv(journal: &Path, csv_path: &Path) -> Result<usize> {
    let sessions = read_sessions(journal)?;

    if sessions.is_empty() {
        tracing::info!("No sessions in journal to export");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(csv_path)?;
    for session in &sessions {
        writer.serialize(CsvRow::from(session))?;
    }
    writer.flush()?;

    tracing::info!("Exported {} sessions to {:?}", sessions.len(), csv_path);
    Ok(sessions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClothingPreset, SunscreenPreset};
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_session() -> ExposureSession {
        ExposureSession {
            id: Uuid::new_v4(),
            location: "San Diego".into(),
            started_at: Utc::now(),
            completed_at: Utc::now(),
            elapsed_seconds: 300,
            base_uv: 6.4,
            effective_uv: 2.0,
            clothing: ClothingPreset::Light,
            sunscreen: SunscreenPreset::Spf30,
            vitamin_gain: 51.2,
        }
    }

    #[test]
    fn test_append_and_read_single_session() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = journal_path(temp_dir.path());

        let session = create_test_session();
        let session_id = session.id;

        let mut sink = JsonlSink::new(&path);
        sink.append(&session).unwrap();

        let sessions = read_sessions(&path).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, session_id);
    }

    #[test]
    fn test_append_multiple_sessions() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = journal_path(temp_dir.path());

        let mut sink = JsonlSink::new(&path);
        for _ in 0..5 {
            sink.append(&create_test_session()).unwrap();
        }

        let sessions = read_sessions(&path).unwrap();
        assert_eq!(sessions.len(), 5);
    }

    #[test]
    fn test_read_empty_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nonexistent.jsonl");

        let sessions = read_sessions(&path).unwrap();
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_corrupt_line_is_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = journal_path(temp_dir.path());

        let mut sink = JsonlSink::new(&path);
        sink.append(&create_test_session()).unwrap();

        // Corrupt line in the middle
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            file.write_all(b"not json\n").unwrap();
        }

        sink.append(&create_test_session()).unwrap();

        let sessions = read_sessions(&path).unwrap();
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn test_csv_export() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = journal_path(temp_dir.path());
        let csv_path = temp_dir.path().join("sessions.csv");

        let mut sink = JsonlSink::new(&path);
        for _ in 0..3 {
            sink.append(&create_test_session()).unwrap();
        }

        let count = export_csv(&path, &csv_path).unwrap();
        assert_eq!(count, 3);

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        // Header + 3 rows
        assert_eq!(contents.lines().count(), 4);
        assert!(contents.lines().next().unwrap().contains("vitamin_gain"));
    }

    #[test]
    fn test_csv_export_empty_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nonexistent.jsonl");
        let csv_path = temp_dir.path().join("sessions.csv");

        let count = export_csv(&path, &csv_path).unwrap();
        assert_eq!(count, 0);
        assert!(!csv_path.exists());
    }
}
