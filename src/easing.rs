//! Easing curves for `scroll_to` animations.
//!
//! Each curve maps normalized progress `t ∈ [0, 1]` to eased progress in
//! `[0, 1]`, with `f(0) = 0` and `f(1) = 1`. Curves are looked up by their
//! camelCase names; an unknown name resolves to [`Easing::EaseInOutCubic`].

#[cfg(test)]
#[path = "easing_test.rs"]
mod easing_test;

/// A named easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Cubic acceleration until halfway, then cubic deceleration.
    #[default]
    EaseInOutCubic,
    /// Quartic deceleration.
    EaseOutQuart,
    /// Quartic acceleration until halfway, then quartic deceleration.
    EaseInOutQuart,
}

impl Easing {
    /// Look up a curve by its exact name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "easeInOutCubic" => Some(Self::EaseInOutCubic),
            "easeOutQuart" => Some(Self::EaseOutQuart),
            "easeInOutQuart" => Some(Self::EaseInOutQuart),
            _ => None,
        }
    }

    /// Look up a curve by name, falling back to the default curve.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            log::debug!("unknown easing {name:?}, using easeInOutCubic");
            Self::default()
        })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EaseInOutCubic => "easeInOutCubic",
            Self::EaseOutQuart => "easeOutQuart",
            Self::EaseInOutQuart => "easeInOutQuart",
        }
    }

    /// Evaluate the curve at `t`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::EaseInOutCubic => ease_in_out_cubic(t),
            Self::EaseOutQuart => ease_out_quart(t),
            Self::EaseInOutQuart => ease_in_out_quart(t),
        }
    }
}

#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0 * t - 2.0;
        (t - 1.0) * u * u + 1.0
    }
}

#[must_use]
pub fn ease_out_quart(t: f64) -> f64 {
    let u = t - 1.0;
    1.0 - u * u * u * u
}

#[must_use]
pub fn ease_in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        let u = t - 1.0;
        1.0 - 8.0 * u * u * u * u
    }
}
