//! Tunable configuration.
//!
//! The serialized shape matches the object pages script against:
//!
//! ```json
//! { "momentum": { "friction": 0.92, "minVelocity": 0.1, "maxVelocity": 50,
//!                 "touchMultiplier": 2, "wheelMultiplier": 1 },
//!   "easing":   { "duration": 1000, "function": "easeInOutCubic" } }
//! ```
//!
//! Updates arrive as partial objects and are deep-merged onto the current
//! config, then validated as a whole before being accepted.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DURATION_MS, DEFAULT_EASING, DEFAULT_FRICTION, DEFAULT_MAX_VELOCITY, DEFAULT_MIN_VELOCITY,
    DEFAULT_TOUCH_MULTIPLIER, DEFAULT_WHEEL_MULTIPLIER,
};
use crate::easing::Easing;
use crate::error::ScrollError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumConfig {
    pub friction: f64,
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub touch_multiplier: f64,
    pub wheel_multiplier: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            min_velocity: DEFAULT_MIN_VELOCITY,
            max_velocity: DEFAULT_MAX_VELOCITY,
            touch_multiplier: DEFAULT_TOUCH_MULTIPLIER,
            wheel_multiplier: DEFAULT_WHEEL_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EasingConfig {
    /// Default animation length in milliseconds.
    pub duration: f64,
    /// Default curve name; unknown names resolve to `easeInOutCubic` at use.
    pub function: String,
}

impl Default for EasingConfig {
    fn default() -> Self {
        Self { duration: DEFAULT_DURATION_MS, function: DEFAULT_EASING.to_owned() }
    }
}

impl EasingConfig {
    #[must_use]
    pub fn easing(&self) -> Easing {
        Easing::from_name(&self.function)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollConfig {
    pub momentum: MomentumConfig,
    pub easing: EasingConfig,
}

impl ScrollConfig {
    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ScrollError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ScrollError> {
        let m = &self.momentum;
        if !(m.friction > 0.0 && m.friction < 1.0) {
            return Err(invalid("momentum.friction", "must be between 0 and 1 exclusive"));
        }
        // A zero floor would let a coast at zero velocity reschedule forever.
        if !m.min_velocity.is_finite() || m.min_velocity <= 0.0 {
            return Err(invalid("momentum.minVelocity", "must be a positive number"));
        }
        if !m.max_velocity.is_finite() || m.max_velocity <= 0.0 {
            return Err(invalid("momentum.maxVelocity", "must be a positive number"));
        }
        if m.max_velocity < m.min_velocity {
            return Err(invalid("momentum.maxVelocity", "must not be below minVelocity"));
        }
        if !m.touch_multiplier.is_finite() {
            return Err(invalid("momentum.touchMultiplier", "must be finite"));
        }
        if !m.wheel_multiplier.is_finite() {
            return Err(invalid("momentum.wheelMultiplier", "must be finite"));
        }
        if !self.easing.duration.is_finite() || self.easing.duration < 0.0 {
            return Err(invalid("easing.duration", "must be a non-negative number"));
        }
        Ok(())
    }

    /// Deep-merge a partial JSON object onto this config and validate the result.
    ///
    /// Keys absent from `patch` keep their current values. `self` is untouched;
    /// callers swap in the returned config only on success.
    ///
    /// # Errors
    ///
    /// Fails when the merged value does not deserialize or does not validate.
    pub fn merged(&self, patch: &serde_json::Value) -> Result<Self, ScrollError> {
        let mut base = serde_json::to_value(self)?;
        merge_json(&mut base, patch);
        let next: Self = serde_json::from_value(base)?;
        next.validate()?;
        Ok(next)
    }

    /// Clamp a velocity to `±max_velocity`.
    #[must_use]
    pub fn clamp_velocity(&self, velocity: f64) -> f64 {
        let max = self.momentum.max_velocity;
        velocity.clamp(-max, max)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ScrollError {
    ScrollError::InvalidConfig { field, reason }
}

fn merge_json(base: &mut serde_json::Value, patch: &serde_json::Value) {
    let (Some(base_map), Some(patch_map)) = (base.as_object_mut(), patch.as_object()) else {
        if !patch.is_null() {
            *base = patch.clone();
        }
        return;
    };
    for (key, value) in patch_map {
        match base_map.get_mut(key) {
            Some(existing) => merge_json(existing, value),
            None => {
                base_map.insert(key.clone(), value.clone());
            }
        }
    }
}
