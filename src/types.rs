//! Core types for spark-motion.
//!
//! These types flow from the event sources (scroll telemetry, intersection
//! watcher) through the engines and define what a host renderer applies.

use std::fmt;
use std::str::FromStr;

use crate::error::{MotionError, Result};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by subscriptions and observers.
///
/// Call this to detach. Calling it after the source is gone is a no-op.
pub type Cleanup = Box<dyn FnOnce()>;

/// Opaque handle identifying a wrapped element on a surface.
pub type ElementId = usize;

// =============================================================================
// Geometry
// =============================================================================

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

impl ElementBounds {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

// =============================================================================
// Scroll Samples
// =============================================================================

/// Direction of travel between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Still,
}

/// One emission of scroll telemetry.
///
/// `previous_offset` is always the `offset` of the sample emitted right before
/// this one on the same surface (0 for the first). `sequence` totally orders
/// samples within a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub offset: f64,
    pub previous_offset: f64,
    pub sequence: u64,
    /// Frame time the sample was emitted in (seconds).
    pub time: f64,
}

impl ScrollSample {
    pub fn delta(&self) -> f64 {
        self.offset - self.previous_offset
    }

    pub fn direction(&self) -> ScrollDirection {
        if self.offset > self.previous_offset {
            ScrollDirection::Down
        } else if self.offset < self.previous_offset {
            ScrollDirection::Up
        } else {
            ScrollDirection::Still
        }
    }
}

// =============================================================================
// Viewport Margins
// =============================================================================

/// A single margin length, in the CSS-ish syntax hosts already use for
/// intersection root margins (`"-50px"`, `"10%"`, `"0"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginLength {
    Px(f64),
    /// Percentage of the viewport height.
    Percent(f64),
}

impl MarginLength {
    pub const ZERO: Self = Self::Px(0.0);

    /// Resolve to units against the given viewport height.
    pub fn resolve(&self, viewport_height: f64) -> f64 {
        match *self {
            Self::Px(v) => v,
            Self::Percent(p) => viewport_height * p / 100.0,
        }
    }
}

impl Default for MarginLength {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for MarginLength {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || MotionError::InvalidMargin(s.to_string());

        let (number, percent) = if let Some(n) = s.strip_suffix('%') {
            (n, true)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, false)
        } else {
            (s, false)
        };

        let value: f64 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }

        Ok(if percent { Self::Percent(value) } else { Self::Px(value) })
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Margins applied to the viewport before intersection testing.
///
/// `start` moves the top edge, `end` the bottom edge. Positive values grow
/// the tested area, negative values shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMargin {
    pub start: MarginLength,
    pub end: MarginLength,
}

impl ViewportMargin {
    pub const ZERO: Self = Self {
        start: MarginLength::ZERO,
        end: MarginLength::ZERO,
    };

    pub const fn new(start: MarginLength, end: MarginLength) -> Self {
        Self { start, end }
    }

    /// Parse both edges from margin strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// The tested vertical window `(top, bottom)` for a viewport scrolled to
    /// `scroll_offset`.
    pub fn window(&self, scroll_offset: f64, viewport_height: f64) -> (f64, f64) {
        let top = scroll_offset - self.start.resolve(viewport_height);
        let bottom = scroll_offset + viewport_height + self.end.resolve(viewport_height);
        (top, bottom)
    }
}

// =============================================================================
// Style Output
// =============================================================================

bitflags::bitflags! {
    /// Style properties touched by a motion consumer.
    ///
    /// Used both to declare what a mode animates and to report which
    /// properties differ between two styles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StyleProps: u8 {
        const NONE = 0;
        const OPACITY = 1 << 0;
        const TRANSLATE_Y = 1 << 1;
        const SCALE = 1 << 2;
        const CLIP_PATH = 1 << 3;
    }
}

/// Clip region in percent of the element box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipPath {
    Inset {
        top: f64,
        right: f64,
        bottom: f64,
        left: f64,
    },
    /// Four `(x, y)` points.
    Polygon([(f64, f64); 4]),
}

impl ClipPath {
    /// Uniform inset on every side.
    pub const fn inset(all: f64) -> Self {
        Self::Inset {
            top: all,
            right: all,
            bottom: all,
            left: all,
        }
    }

    /// Polygon that shows the element from `visible_from` (percent from the
    /// top) down to the bottom edge. 100 shows nothing, 0 shows everything.
    pub const fn bottom_up(visible_from: f64) -> Self {
        Self::Polygon([
            (0.0, visible_from),
            (100.0, visible_from),
            (100.0, 100.0),
            (0.0, 100.0),
        ])
    }

    /// Interpolate towards `to`. Shapes of different kinds snap at the end.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (
                Self::Inset { top, right, bottom, left },
                Self::Inset {
                    top: t2,
                    right: r2,
                    bottom: b2,
                    left: l2,
                },
            ) => Self::Inset {
                top: lerp(*top, *t2, t),
                right: lerp(*right, *r2, t),
                bottom: lerp(*bottom, *b2, t),
                left: lerp(*left, *l2, t),
            },
            (Self::Polygon(a), Self::Polygon(b)) => {
                let mut points = *a;
                for (point, target) in points.iter_mut().zip(b.iter()) {
                    point.0 = lerp(point.0, target.0, t);
                    point.1 = lerp(point.1, target.1, t);
                }
                Self::Polygon(points)
            }
            _ => {
                if t >= 1.0 {
                    *to
                } else {
                    *self
                }
            }
        }
    }
}

impl fmt::Display for ClipPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inset { top, right, bottom, left } => {
                write!(f, "inset({top}% {right}% {bottom}% {left}%)")
            }
            Self::Polygon(points) => {
                f.write_str("polygon(")?;
                for (i, (x, y)) in points.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}% {y}%")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// The visual state an engine hands to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStyle {
    pub opacity: f64,
    /// Vertical translation in units (positive moves down).
    pub translate_y: f64,
    pub scale: f64,
    pub clip: Option<ClipPath>,
}

impl MotionStyle {
    /// Untouched content: fully opaque, no transform, no clip.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        translate_y: 0.0,
        scale: 1.0,
        clip: None,
    };

    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        let clip = match (&self.clip, &to.clip) {
            (Some(a), Some(b)) => Some(a.lerp(b, t)),
            (a, b) => {
                if t >= 1.0 {
                    *b
                } else {
                    *a
                }
            }
        };

        Self {
            opacity: lerp(self.opacity, to.opacity, t),
            translate_y: lerp(self.translate_y, to.translate_y, t),
            scale: lerp(self.scale, to.scale, t),
            clip,
        }
    }

    /// Which properties differ between `self` and `other`.
    pub fn changed(&self, other: &Self) -> StyleProps {
        let mut props = StyleProps::NONE;
        if self.opacity != other.opacity {
            props |= StyleProps::OPACITY;
        }
        if self.translate_y != other.translate_y {
            props |= StyleProps::TRANSLATE_Y;
        }
        if self.scale != other.scale {
            props |= StyleProps::SCALE;
        }
        if self.clip != other.clip {
            props |= StyleProps::CLIP_PATH;
        }
        props
    }

    /// CSS `transform` value for this style.
    pub fn transform(&self) -> String {
        format!("translateY({}px) scale({})", self.translate_y, self.scale)
    }
}

impl Default for MotionStyle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub(crate) fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

// =============================================================================
// Tests
// =============================================================================
