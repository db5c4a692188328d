#![forbid(unsafe_code)]

//! Core domain model and business logic for the soltrack sun-exposure tracker.
//!
//! This crate provides:
//! - Domain types (presets, tracker state, forecast entries, sessions)
//! - Deterministic UV estimation (base index, hourly forecast, sun window, risk)
//! - Exposure-to-vitamin-D conversion
//! - The exposure session timer state machine
//! - Persistence (state slot, session journal, CSV export)

pub mod types;
pub mod error;
pub mod presets;
pub mod config;
pub mod logging;
pub mod estimate;
pub mod exposure;
pub mod timer;
pub mod state;
pub mod journal;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use estimate::{derive_base_uv, derive_sun_window, generate_forecast, risk_level};
pub use exposure::calculate_exposure_gain;
pub use journal::{JsonlSink, SessionSink};
pub use state::{state_path, STATE_SLOT};
pub use timer::{SessionPhase, SessionTimer};
