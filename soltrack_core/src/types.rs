//! Core domain types for the sun-exposure tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Clothing and sunscreen presets
//! - UV risk levels and forecast entries
//! - The persisted tracker state
//! - Completed exposure session records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Preset Types
// ============================================================================

/// Clothing coverage preset
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClothingPreset {
    Minimal,
    Light,
    Moderate,
    Covered,
}

/// Sunscreen application preset
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SunscreenPreset {
    None,
    Spf15,
    Spf30,
    Spf50,
}

// ============================================================================
// Estimation Types
// ============================================================================

/// UV risk classification, with upper-exclusive thresholds
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
            RiskLevel::Extreme => "Extreme",
        };
        write!(f, "{}", label)
    }
}

/// One hour of the 8-hour UV forecast
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HourlyForecastEntry {
    pub hour_label: String,
    pub uv_index: f64,
}

/// Estimated sunrise/sunset window, pre-formatted as 12-hour clock times
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SunWindow {
    pub sunrise: String,
    pub sunset: String,
}

// ============================================================================
// Exposure Types
// ============================================================================

/// Result of converting an exposure session into vitamin D3
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExposureGain {
    /// Base UV after clothing and sunscreen attenuation
    pub effective_uv: f64,
    /// Vitamin D3 gained over the session, in IU (unclamped, may overshoot the goal)
    pub vitamin_gain: f64,
}

// ============================================================================
// Persisted State
// ============================================================================

/// The durable per-user record, mirrored wholesale to the state slot on
/// every edit and restored once at startup.
///
/// Serialized with camelCase keys to stay compatible with the
/// `uv-tracker-state-v1` slot format.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerState {
    pub location: String,
    pub clothing: ClothingPreset,
    pub sunscreen: SunscreenPreset,
    /// Daily vitamin D3 target, in IU
    pub vitamin_goal: f64,
    /// Accumulated vitamin D3, in IU
    pub vitamin_progress: f64,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            location: "San Diego".into(),
            clothing: ClothingPreset::Light,
            sunscreen: SunscreenPreset::Spf30,
            vitamin_goal: 1000.0,
            vitamin_progress: 250.0,
        }
    }
}

// ============================================================================
// Session Journal Types
// ============================================================================

/// A completed exposure session, as appended to the journal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExposureSession {
    pub id: Uuid,
    pub location: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub elapsed_seconds: u32,
    pub base_uv: f64,
    pub effective_uv: f64,
    pub clothing: ClothingPreset,
    pub sunscreen: SunscreenPreset,
    /// Gain committed to `vitamin_progress` when the session stopped
    pub vitamin_gain: f64,
}
