//! Momentum state record and velocity sampling.
//!
//! Velocity is measured in pixels per simulated 16 ms frame so the decay loop
//! can add it directly to the scroll offset once per animation frame.

#[cfg(test)]
#[path = "momentum_test.rs"]
mod momentum_test;

use crate::config::ScrollConfig;
use crate::consts::FRAME_MS;

/// Mutable scroll-tracking state owned by the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MomentumState {
    /// Signed speed in px/frame. Stays within `±max_velocity`.
    pub velocity: f64,
    /// Whether the continuation loop is scheduled.
    pub active: bool,
    /// Wall-clock time of the previous sample, in ms.
    pub last_sample_time_ms: f64,
    /// Scroll offset at the previous sample.
    pub last_sample_scroll_top: f64,
    /// A user scroll or touch is in progress (cleared by the settle timer).
    pub user_scrolling: bool,
}

impl MomentumState {
    /// Start tracking from a known time and offset.
    #[must_use]
    pub fn seeded(now_ms: f64, scroll_top: f64) -> Self {
        Self { last_sample_time_ms: now_ms, last_sample_scroll_top: scroll_top, ..Self::default() }
    }

    /// Derive velocity from the offset change since the last sample.
    ///
    /// A zero or negative time delta leaves velocity unchanged. The sample is
    /// recorded either way.
    pub fn sample(&mut self, config: &ScrollConfig, now_ms: f64, scroll_top: f64) {
        let dt = now_ms - self.last_sample_time_ms;
        if dt > 0.0 {
            let raw = (scroll_top - self.last_sample_scroll_top) / dt * FRAME_MS;
            self.velocity = config.clamp_velocity(raw);
        }
        self.record(now_ms, scroll_top);
    }

    /// Store a sample without touching velocity.
    pub fn record(&mut self, now_ms: f64, scroll_top: f64) {
        self.last_sample_time_ms = now_ms;
        self.last_sample_scroll_top = scroll_top;
    }

    /// Add to velocity and clamp.
    pub fn boost(&mut self, config: &ScrollConfig, delta: f64) {
        self.velocity = config.clamp_velocity(self.velocity + delta);
    }

    /// Scale velocity and clamp.
    pub fn scale(&mut self, config: &ScrollConfig, factor: f64) {
        self.velocity = config.clamp_velocity(self.velocity * factor);
    }

    /// Whether the current speed is enough to start or keep coasting.
    #[must_use]
    pub fn has_momentum(&self, config: &ScrollConfig) -> bool {
        self.velocity.abs() >= config.momentum.min_velocity
    }
}
