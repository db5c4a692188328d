//! Exposure-to-vitamin-D conversion.
//!
//! Converts a session's elapsed time and the current UV conditions into an
//! effective UV figure and a vitamin D3 gain at a fixed linear rate.

use crate::types::{ClothingPreset, ExposureGain, SunscreenPreset};

/// IU of vitamin D3 per UV-minute of effective exposure
pub const IU_PER_UV_MINUTE: f64 = 5.0;

/// Convert elapsed exposure into effective UV and vitamin D3 gain.
///
/// Minutes are fractional (seconds are not floored away), and the gain is
/// deliberately unclamped: accumulating past the daily goal is allowed, and
/// only the progress-bar display caps at 100%.
pub fn calculate_exposure_gain(
    elapsed_seconds: u32,
    base_uv: f64,
    clothing: ClothingPreset,
    sunscreen: SunscreenPreset,
) -> ExposureGain {
    let minutes = f64::from(elapsed_seconds) / 60.0;
    let effective_uv = base_uv * clothing.attenuation() * sunscreen.attenuation();
    let vitamin_gain = effective_uv * minutes * IU_PER_UV_MINUTE;

    ExposureGain {
        effective_uv,
        vitamin_gain,
    }
}
