//! Transitions - Easing curves and time-based tweens
//!
//! A [`Tween`] interpolates between two [`MotionStyle`]s over a [`Transition`]
//! (duration, delay, easing). Time is whatever clock the host drives frames
//! with, in seconds. Nothing here schedules anything: callers sample a tween
//! at the current frame time.

use crate::types::MotionStyle;

// =============================================================================
// EASING
// =============================================================================

/// Timing function mapping linear progress to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier(f64, f64, f64, f64),
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_EPSILON: f64 = 1e-7;
const SLOPE_EPSILON: f64 = 1e-6;
const BISECTION_ITERATIONS: usize = 64;

impl Easing {
    /// `cubic-bezier(0.22, 1, 0.36, 1)`: fast start, long soft landing.
    pub const EXPO_OUT: Self = Self::CubicBezier(0.22, 1.0, 0.36, 1.0);

    pub fn from_points(points: [f64; 4]) -> Self {
        Self::CubicBezier(points[0], points[1], points[2], points[3])
    }

    /// Eased progress for linear progress `t` (clamped to `[0, 1]`).
    ///
    /// The endpoints are exact: 0 maps to 0 and 1 maps to 1.
    pub fn apply(&self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Self::Linear => t,
            Self::CubicBezier(x1, y1, x2, y2) => {
                let s = solve_curve_x(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::EXPO_OUT
    }
}

/// One coordinate of a cubic bezier anchored at 0 and 1.
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Curve parameter whose x coordinate is `x`.
fn solve_curve_x(x: f64, x1: f64, x2: f64) -> f64 {
    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let error = bezier(s, x1, x2) - x;
        if error.abs() < NEWTON_EPSILON {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < SLOPE_EPSILON {
            break;
        }
        s -= error / slope;
    }

    // Newton stalled or wandered off, bisect instead
    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..BISECTION_ITERATIONS {
        let estimate = bezier(s, x1, x2);
        if (estimate - x).abs() < NEWTON_EPSILON {
            break;
        }
        if estimate < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

// =============================================================================
// TRANSITION
// =============================================================================

/// Timing of one state change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
}

impl Transition {
    pub const fn new(duration: f64, easing: Easing) -> Self {
        Self {
            duration,
            delay: 0.0,
            easing,
        }
    }

    /// Jump straight to the end state.
    pub const fn instant() -> Self {
        Self::new(0.0, Easing::Linear)
    }

    pub const fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Linear progress `[0, 1]` after `elapsed` time.
    pub fn progress(&self, elapsed: f64) -> f64 {
        let active = elapsed - self.delay;
        if active < 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        (active / self.duration).clamp(0.0, 1.0)
    }

    /// Total time from start to completion.
    pub fn total(&self) -> f64 {
        self.delay + self.duration.max(0.0)
    }
}

// =============================================================================
// TWEEN
// =============================================================================

/// A style interpolation started at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: MotionStyle,
    pub to: MotionStyle,
    pub transition: Transition,
    pub started_at: f64,
}

impl Tween {
    pub fn new(from: MotionStyle, to: MotionStyle, transition: Transition, started_at: f64) -> Self {
        Self {
            from,
            to,
            transition,
            started_at,
        }
    }

    /// A tween that is already at rest on `style`.
    pub fn settled(style: MotionStyle) -> Self {
        Self::new(style, style, Transition::instant(), f64::NEG_INFINITY)
    }

    pub fn progress(&self, now: f64) -> f64 {
        self.transition.progress(now - self.started_at)
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Style at `now`. Exactly `to` once complete.
    pub fn sample(&self, now: f64) -> MotionStyle {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, self.transition.easing.apply(progress))
    }

    /// Start heading to `to` from wherever this tween is at `now`.
    pub fn retarget(&self, to: MotionStyle, transition: Transition, now: f64) -> Self {
        Self::new(self.sample(now), to, transition, now)
    }
}
