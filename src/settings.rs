//! Game settings
//!
//! Balance knobs and rule choices, loaded from JSON. Missing fields fall back
//! to defaults, so a settings file only needs the values it overrides.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What picking up an effect that is already active does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReactivationPolicy {
    /// Push the expiry out to a full duration from now
    #[default]
    Refresh,
    /// Keep the original expiry
    Ignore,
}

impl ReactivationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactivationPolicy::Refresh => "refresh",
            ReactivationPolicy::Ignore => "ignore",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "refresh" | "reset" => Some(ReactivationPolicy::Refresh),
            "ignore" => Some(ReactivationPolicy::Ignore),
            _ => None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed (pattern generation and all in-game randomness)
    pub seed: u64,
    pub starting_lives: u32,
    /// First level to play (clamped into 1..=30)
    pub start_level: u32,

    // === Power-ups ===
    /// Ticks each timed effect stays on
    pub effect_duration_ticks: u64,
    pub reactivation: ReactivationPolicy,
    /// Switch every timed effect off when a new level starts
    pub clear_effects_on_level_change: bool,
    /// Pickup fall speed (units per tick)
    pub pickup_fall_speed: f32,
    /// Laser shot speed (units per tick)
    pub laser_speed: f32,

    // === Physics ===
    /// At most one brick hit per ball per tick (avoids multi-hit tunnelling)
    pub single_brick_hit_per_ball: bool,
    /// Half-range of the horizontal jitter added on paddle bounces
    pub paddle_jitter: f32,

    // === Flow ===
    /// Ticks the level banner stays up
    pub transition_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            starting_lives: STARTING_LIVES,
            start_level: 1,

            effect_duration_ticks: EFFECT_DURATION_TICKS,
            reactivation: ReactivationPolicy::Refresh,
            clear_effects_on_level_change: true,
            pickup_fall_speed: PICKUP_FALL_SPEED,
            laser_speed: LASER_SPEED,

            single_brick_hit_per_ball: true,
            paddle_jitter: 1.0,

            transition_ticks: TRANSITION_TICKS,
        }
    }
}

impl Settings {
    /// Settings with a specific seed, everything else default
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("parse JSON: {e}"))
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read settings: {e}"))?;
        Self::from_json(&data)
    }

    /// Load from `path`, falling back to defaults; the error (if any) is returned alongside
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.as_ref().display());
                (settings, None)
            }
            Err(e) => {
                log::warn!("Using default settings: {e}");
                (Self::default(), Some(e))
            }
        }
    }

    /// Human readable problems with the current values
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.starting_lives == 0 {
            warnings.push("starting_lives is 0; the run ends on the first miss".to_string());
        }
        if !(1..=LEVEL_COUNT).contains(&self.start_level) {
            warnings.push(format!(
                "start_level {} outside 1..={LEVEL_COUNT}; clamped",
                self.start_level
            ));
        }
        if self.effect_duration_ticks == 0 {
            warnings.push("effect_duration_ticks is 0; power-ups expire immediately".to_string());
        }
        if self.pickup_fall_speed <= 0.0 {
            warnings.push("pickup_fall_speed must be > 0".to_string());
        }
        if self.laser_speed <= 0.0 {
            warnings.push("laser_speed must be > 0".to_string());
        }
        if self.paddle_jitter < 0.0 {
            warnings.push("paddle_jitter negative".to_string());
        }
        warnings
    }
}
