//! Tracker state persistence with file locking.
//!
//! The whole record lives in a single JSON slot named after the original
//! storage key (`uv-tracker-state-v1`). It is read exactly once at startup
//! and rewritten wholesale on every edit. Any read failure falls back to
//! defaults with a warning; it is never surfaced as an error.

use crate::{ClothingPreset, Result, SunscreenPreset, TrackerState};
use fs2::FileExt;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the durable state slot
pub const STATE_SLOT: &str = "uv-tracker-state-v1";

/// Path of the state slot file under a data directory
pub fn state_path(data_dir: &Path) -> PathBuf {
    data_dir.join(format!("{}.json", STATE_SLOT))
}

/// Raw on-disk shape of the slot, before per-field fallback is applied.
///
/// Every field is optional so a partial or hand-edited slot still loads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlot {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    clothing: Option<ClothingPreset>,
    #[serde(default)]
    sunscreen: Option<SunscreenPreset>,
    #[serde(default)]
    vitamin_goal: Option<f64>,
    #[serde(default)]
    vitamin_progress: Option<f64>,
}

impl From<RawSlot> for TrackerState {
    /// Apply per-field fallback to defaults.
    ///
    /// Fallback is truthiness-based to match the original slot semantics: an
    /// empty location or a stored `0` for goal/progress counts as unset and
    /// reverts to the default. A legitimately zeroed progress therefore
    /// reloads as 250. Known quirk, kept for slot compatibility.
    fn from(raw: RawSlot) -> Self {
        let defaults = TrackerState::default();
        TrackerState {
            location: match raw.location {
                Some(loc) if !loc.is_empty() => loc,
                _ => defaults.location,
            },
            clothing: raw.clothing.unwrap_or(defaults.clothing),
            sunscreen: raw.sunscreen.unwrap_or(defaults.sunscreen),
            vitamin_goal: match raw.vitamin_goal {
                Some(goal) if goal != 0.0 => goal,
                _ => defaults.vitamin_goal,
            },
            vitamin_progress: match raw.vitamin_progress {
                Some(progress) if progress != 0.0 => progress,
                _ => defaults.vitamin_progress,
            },
        }
    }
}

impl TrackerState {
    /// Load tracker state from the slot with shared locking.
    ///
    /// Returns default state if the slot doesn't exist. If the slot is
    /// unreadable or corrupted, logs a warning and returns default state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No state slot found, using default state");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open state slot {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock state slot {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read state slot {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<RawSlot>(&contents) {
            Ok(raw) => {
                tracing::debug!("Loaded tracker state from {:?}", path);
                Ok(raw.into())
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse state slot {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save tracker state to the slot with exclusive locking.
    ///
    /// Atomically writes the record by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "state path missing parent")
        })?)?;

        // Acquire exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace old slot
        temp.persist(path).map_err(|e| crate::Error::Io(e.error))?;

        tracing::debug!("Saved tracker state to {:?}", path);
        Ok(())
    }

    /// Best-effort save: a failed write is logged, never returned.
    ///
    /// The in-memory record stays authoritative whether or not the write
    /// lands; callers proceed regardless.
    pub fn store(&self, path: &Path) {
        if let Err(e) = self.save(path) {
            tracing::warn!("Failed to persist tracker state to {:?}: {}", path, e);
        }
    }

    /// Add IU to the accumulated progress. Negative deltas floor at 0.
    pub fn add_progress(&mut self, delta: f64) {
        self.vitamin_progress = (self.vitamin_progress + delta).max(0.0);
    }

    /// Fraction of the goal reached, clamped to 1.0 for display only.
    /// The stored progress itself may overshoot the goal.
    pub fn goal_fraction(&self) -> f64 {
        if self.vitamin_goal <= 0.0 {
            return 0.0;
        }
        (self.vitamin_progress / self.vitamin_goal).min(1.0)
    }
}
