//! Game settings and tuning
//!
//! Loaded from an optional JSON file; any key left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Fixed pool capacities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capacity {
    pub photons: usize,
    pub asteroids: usize,
    pub stars: usize,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            photons: MAX_PHOTONS,
            asteroids: MAX_ASTEROIDS,
            stars: STAR_COUNT,
        }
    }
}

/// Ship handling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    /// Collision radius (also scales the hull triangle)
    pub radius: f64,
    /// Thrust is rejected when it would push speed above this
    pub velocity_max: f64,
    pub acceleration: f64,
    /// Radians per tick while a turn is held
    pub turn_rate: f64,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            radius: SHIP_RADIUS,
            velocity_max: SHIP_VELOCITY_MAX,
            acceleration: SHIP_ACCELERATION,
            turn_rate: SHIP_TURN_RATE,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed (None = pick one at startup)
    pub seed: Option<u64>,

    // === Timing ===
    pub tick_interval_ms: u64,
    /// Catch-up cap per `Session::advance`
    pub max_substeps: u32,

    // === Viewport ===
    pub viewport_width: u32,
    pub viewport_height: u32,

    // === Simulation ===
    pub capacity: Capacity,
    pub ship: ShipTuning,
    pub photon_speed: f64,

    // === Presentation ===
    /// Initial asteroid render mode (outline vs circle)
    pub circular_asteroids: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval_ms: TICK_INTERVAL_MS,
            max_substeps: MAX_SUBSTEPS,
            viewport_width: 800,
            viewport_height: 800,
            capacity: Capacity::default(),
            ship: ShipTuning::default(),
            photon_speed: PHOTON_SPEED,
            circular_asteroids: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path.map(Self::load) {
            Some(Ok(settings)) => settings,
            Some(Err(err)) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });

        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms", "must be at least 1");
        }
        if self.max_substeps == 0 {
            return invalid("max_substeps", "must be at least 1");
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return invalid("viewport", "width and height must be non-zero");
        }
        if self.capacity.photons == 0 {
            return invalid("capacity.photons", "must be at least 1");
        }
        if self.capacity.asteroids == 0 {
            return invalid("capacity.asteroids", "must be at least 1");
        }
        if !(self.ship.radius > 0.0) {
            return invalid("ship.radius", "must be positive");
        }
        if !(self.ship.velocity_max > 0.0) {
            return invalid("ship.velocity_max", "must be positive");
        }
        if !(self.ship.acceleration > 0.0) {
            return invalid("ship.acceleration", "must be positive");
        }
        if !self.ship.turn_rate.is_finite() {
            return invalid("ship.turn_rate", "must be finite");
        }
        if !(self.photon_speed > 0.0) {
            return invalid("photon_speed", "must be positive");
        }
        Ok(())
    }
}
