//! Scroll-to-value mappings.
//!
//! Pure functions, clamped at both ends of the domain so values past the
//! domain hold at the boundary instead of extrapolating.

use crate::types::ElementBounds;

/// Linearly map `value` from `domain` onto `range`, clamped.
///
/// A degenerate domain (`d0 == d1`) acts as a step at `d1`.
pub fn map_clamped(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let (d0, d1) = domain;
    let (r0, r1) = range;

    if d0 == d1 {
        return if value >= d1 { r1 } else { r0 };
    }

    let t = ((value - d0) / (d1 - d0)).clamp(0.0, 1.0);
    if t <= 0.0 {
        r0
    } else if t >= 1.0 {
        r1
    } else {
        r0 + (r1 - r0) * t
    }
}

/// How far an element has travelled through the viewport, `[0, 1]`.
///
/// 0 when the element's top meets the viewport bottom
/// (`offset = top - viewport_height`), 1 when its bottom meets the viewport
/// top (`offset = bottom`).
pub fn scroll_progress(offset: f64, viewport_height: f64, bounds: &ElementBounds) -> f64 {
    map_clamped(offset, (bounds.top - viewport_height, bounds.bottom()), (0.0, 1.0))
}
