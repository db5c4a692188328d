//! Attenuation preset tables for clothing and sunscreen.
//!
//! Factors are multipliers in (0,1] applied to the base UV index; 1.0 means
//! no attenuation. The tables are fixed at process start.

use crate::types::{ClothingPreset, SunscreenPreset};
use crate::Error;
use once_cell::sync::Lazy;
use std::str::FromStr;

impl ClothingPreset {
    pub const ALL: [ClothingPreset; 4] = [
        ClothingPreset::Minimal,
        ClothingPreset::Light,
        ClothingPreset::Moderate,
        ClothingPreset::Covered,
    ];

    /// UV attenuation multiplier for this coverage level
    pub fn attenuation(&self) -> f64 {
        match self {
            ClothingPreset::Minimal => 1.0,
            ClothingPreset::Light => 0.8,
            ClothingPreset::Moderate => 0.6,
            ClothingPreset::Covered => 0.4,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ClothingPreset::Minimal => "minimal",
            ClothingPreset::Light => "light",
            ClothingPreset::Moderate => "moderate",
            ClothingPreset::Covered => "covered",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClothingPreset::Minimal => "Minimal (swimwear)",
            ClothingPreset::Light => "Light (shorts & t-shirt)",
            ClothingPreset::Moderate => "Moderate (long sleeves)",
            ClothingPreset::Covered => "Covered (full coverage)",
        }
    }
}

impl FromStr for ClothingPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(ClothingPreset::Minimal),
            "light" => Ok(ClothingPreset::Light),
            "moderate" => Ok(ClothingPreset::Moderate),
            "covered" => Ok(ClothingPreset::Covered),
            other => Err(Error::Preset(format!("clothing '{}'", other))),
        }
    }
}

impl std::fmt::Display for ClothingPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl SunscreenPreset {
    pub const ALL: [SunscreenPreset; 4] = [
        SunscreenPreset::None,
        SunscreenPreset::Spf15,
        SunscreenPreset::Spf30,
        SunscreenPreset::Spf50,
    ];

    /// UV attenuation multiplier for this sunscreen level
    pub fn attenuation(&self) -> f64 {
        match self {
            SunscreenPreset::None => 1.0,
            SunscreenPreset::Spf15 => 0.6,
            SunscreenPreset::Spf30 => 0.4,
            SunscreenPreset::Spf50 => 0.2,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            SunscreenPreset::None => "none",
            SunscreenPreset::Spf15 => "spf15",
            SunscreenPreset::Spf30 => "spf30",
            SunscreenPreset::Spf50 => "spf50",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SunscreenPreset::None => "No sunscreen",
            SunscreenPreset::Spf15 => "SPF 15",
            SunscreenPreset::Spf30 => "SPF 30",
            SunscreenPreset::Spf50 => "SPF 50",
        }
    }
}

impl FromStr for SunscreenPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(SunscreenPreset::None),
            "spf15" => Ok(SunscreenPreset::Spf15),
            "spf30" => Ok(SunscreenPreset::Spf30),
            "spf50" => Ok(SunscreenPreset::Spf50),
            other => Err(Error::Preset(format!("sunscreen '{}'", other))),
        }
    }
}

impl std::fmt::Display for SunscreenPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A row in the preset guide shown by the CLI
#[derive(Clone, Debug)]
pub struct PresetGuideRow {
    pub id: &'static str,
    pub label: &'static str,
    pub attenuation: f64,
}

/// Cached clothing guide table - built once and reused
pub static CLOTHING_GUIDE: Lazy<Vec<PresetGuideRow>> = Lazy::new(|| {
    ClothingPreset::ALL
        .iter()
        .map(|p| PresetGuideRow {
            id: p.id(),
            label: p.label(),
            attenuation: p.attenuation(),
        })
        .collect()
});

/// Cached sunscreen guide table - built once and reused
pub static SUNSCREEN_GUIDE: Lazy<Vec<PresetGuideRow>> = Lazy::new(|| {
    SunscreenPreset::ALL
        .iter()
        .map(|p| PresetGuideRow {
            id: p.id(),
            label: p.label(),
            attenuation: p.attenuation(),
        })
        .collect()
});
