//! Engine configuration: gesture thresholds, timing, and brush defaults.

use crate::gesture::{GestureThresholds, PALM_THRESHOLD, PINCH_THRESHOLD};
use crate::hit::HIT_MARGIN;
use crate::model::Color;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fastest particle clock the host accepts.
pub const MAX_TICK_HZ: u32 = 1000;

/// Tunables for the gesture pipeline.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Normalized fingertip-to-knuckle spread for palm-open.
    pub palm_threshold: f32,
    /// Normalized index-to-thumb distance for pinch.
    pub pinch_threshold: f32,
    /// Scale factor change per canvas unit of two-hand distance change.
    pub scale_gain: f32,
    /// Canvas units added to each button radius when hit testing.
    pub hit_margin: f32,
    /// Menu click coalescing window.
    pub debounce_ms: u64,
    pub brush_color: Color,
    pub brush_size: f32,
    pub eraser_size: f32,
    /// Upper bound on live particles.
    pub max_particles: usize,
    /// Particle clock rate for the host.
    pub tick_hz: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            palm_threshold: PALM_THRESHOLD,
            pinch_threshold: PINCH_THRESHOLD,
            scale_gain: 0.002,
            hit_margin: HIT_MARGIN,
            debounce_ms: 500,
            brush_color: Color::GREEN,
            brush_size: 10.0,
            eraser_size: 60.0,
            max_particles: 20_000,
            tick_hz: 60,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config, filling in defaults for missing keys.
    ///
    /// # Errors
    /// Returns a message for malformed JSON or out-of-range values.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(text).map_err(|e| format!("config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain struct of numbers and strings; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    /// Names the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("palm_threshold", self.palm_threshold),
            ("pinch_threshold", self.pinch_threshold),
            ("brush_size", self.brush_size),
            ("eraser_size", self.eraser_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("config: {name} must be a positive number, got {value}"));
            }
        }
        if !self.scale_gain.is_finite() {
            return Err("config: scale_gain must be finite".to_string());
        }
        if !(self.hit_margin.is_finite() && self.hit_margin >= 0.0) {
            return Err("config: hit_margin must be non-negative".to_string());
        }
        if self.debounce_ms == 0 {
            return Err("config: debounce_ms must be at least 1".to_string());
        }
        if !(1..=MAX_TICK_HZ).contains(&self.tick_hz) {
            return Err(format!(
                "config: tick_hz must be between 1 and {MAX_TICK_HZ}, got {}",
                self.tick_hz
            ));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> GestureThresholds {
        GestureThresholds {
            palm: self.palm_threshold,
            pinch: self.pinch_threshold,
        }
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_hz.clamp(1, MAX_TICK_HZ)))
    }
}
