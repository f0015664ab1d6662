//! Shared numeric constants for the smooth-scroll crate.

// ── Momentum defaults ───────────────────────────────────────────

/// Per-frame multiplicative velocity decay.
pub const DEFAULT_FRICTION: f64 = 0.92;

/// Below this speed (px/frame) momentum stops.
pub const DEFAULT_MIN_VELOCITY: f64 = 0.1;

/// Velocity is clamped to `±DEFAULT_MAX_VELOCITY` px/frame.
pub const DEFAULT_MAX_VELOCITY: f64 = 50.0;

/// Velocity boost applied when a touch gesture ends.
pub const DEFAULT_TOUCH_MULTIPLIER: f64 = 2.0;

/// Scale applied to wheel deltas before they are added to velocity.
pub const DEFAULT_WHEEL_MULTIPLIER: f64 = 1.0;

// ── Easing defaults ─────────────────────────────────────────────

/// Duration of an eased `scroll_to` animation, in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 1000.0;

/// Easing curve used when none (or an unknown one) is named.
pub const DEFAULT_EASING: &str = "easeInOutCubic";

// ── Sampling ────────────────────────────────────────────────────

/// Velocities are normalized to one 60 fps frame.
pub const FRAME_MS: f64 = 16.0;

/// Wheel `deltaY` to velocity conversion (sign flips direction).
pub const WHEEL_DELTA_SCALE: f64 = -0.01;

/// A scroll event within this distance of the last engine-written offset
/// is treated as the engine's own write.
pub const PROGRAMMATIC_SCROLL_TOLERANCE_PX: f64 = 1.0;

// ── Timers ──────────────────────────────────────────────────────

/// Quiet period after the last scroll event before momentum may start.
pub const SCROLL_SETTLE_MS: u32 = 150;

/// Delay between touch-end and the momentum restart check.
pub const TOUCH_RESTART_MS: u32 = 100;

/// Period of the stray-button sweep.
pub const SWEEP_INTERVAL_MS: u32 = 1000;

// ── Page ────────────────────────────────────────────────────────

/// Fixed-header allowance subtracted from anchor targets, in pixels.
pub const ANCHOR_HEADER_OFFSET_PX: f64 = 80.0;

/// Name of the custom event dispatched on `window` for every scroll.
pub const SCROLL_EVENT_NAME: &str = "smoothscroll:scroll";

/// Media query for the accessibility reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
