//! Rendering Surface - One scrollable area and its event sources
//!
//! A [`Surface`] owns the scroll telemetry and intersection watcher of one
//! scrollable area, plus what every engine needs at mount: the viewport
//! height, the reduced-motion capability and the motion configuration.
//!
//! The host drives it:
//!
//! ```ignore
//! let surface = Surface::new(800.0, FixedPreference(false));
//!
//! // Raw scroll events, as many per frame as the host gets
//! surface.report_scroll(120.0);
//! surface.report_scroll(180.0);
//!
//! // Once per frame: emit one sample, then test intersections
//! let report = surface.frame(now);
//! ```
//!
//! Telemetry is always flushed before intersections are checked, so watchers
//! see the offset of the sample emitted in the same frame.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::MotionConfig;
use crate::error::Result;
use crate::state::{IntersectionWatcher, MotionPreference, ScrollTelemetry};
use crate::types::{MarginLength, ScrollSample, ViewportMargin};

/// Reveal margin of the default configuration (`0px` top, `-50px` bottom).
const STOCK_REVEAL_MARGIN: ViewportMargin =
    ViewportMargin::new(MarginLength::Px(0.0), MarginLength::Px(-50.0));

/// What happened during one [`Surface::frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Sample emitted this frame, if the offset changed.
    pub sample: Option<ScrollSample>,
    /// Number of intersection callbacks invoked.
    pub intersections: usize,
}

pub struct Surface {
    telemetry: ScrollTelemetry,
    watcher: IntersectionWatcher,
    viewport_height: Rc<Cell<f64>>,
    preference: Rc<dyn MotionPreference>,
    config: Rc<MotionConfig>,
    reveal_margin: ViewportMargin,
}

impl Surface {
    /// A surface with the stock motion configuration.
    pub fn new(viewport_height: f64, preference: impl MotionPreference + 'static) -> Self {
        Self::build(
            viewport_height,
            Rc::new(preference),
            MotionConfig::default(),
            STOCK_REVEAL_MARGIN,
            ScrollTelemetry::new(),
            IntersectionWatcher::new(),
        )
    }

    /// A surface with a custom configuration, validated first.
    pub fn with_config(
        viewport_height: f64,
        preference: impl MotionPreference + 'static,
        config: MotionConfig,
    ) -> Result<Self> {
        config.validate()?;
        let margin = config.reveal_margin()?;
        Ok(Self::build(
            viewport_height,
            Rc::new(preference),
            config,
            margin,
            ScrollTelemetry::new(),
            IntersectionWatcher::new(),
        ))
    }

    /// A surface whose host cannot observe scrolling or intersections.
    ///
    /// Engines mounted here render their final state statically.
    pub fn without_observers(viewport_height: f64, preference: impl MotionPreference + 'static) -> Self {
        Self::build(
            viewport_height,
            Rc::new(preference),
            MotionConfig::default(),
            STOCK_REVEAL_MARGIN,
            ScrollTelemetry::unavailable(),
            IntersectionWatcher::unavailable(),
        )
    }

    fn build(
        viewport_height: f64,
        preference: Rc<dyn MotionPreference>,
        config: MotionConfig,
        reveal_margin: ViewportMargin,
        telemetry: ScrollTelemetry,
        watcher: IntersectionWatcher,
    ) -> Self {
        Self {
            telemetry,
            watcher,
            viewport_height: Rc::new(Cell::new(viewport_height)),
            preference,
            config: Rc::new(config),
            reveal_margin,
        }
    }

    pub fn telemetry(&self) -> &ScrollTelemetry {
        &self.telemetry
    }

    pub fn watcher(&self) -> &IntersectionWatcher {
        &self.watcher
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Margin reveal watchers are created with.
    pub fn reveal_margin(&self) -> ViewportMargin {
        self.reveal_margin
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height.get()
    }

    /// Shared handle engines read the live viewport height through.
    pub(crate) fn viewport_handle(&self) -> Rc<Cell<f64>> {
        self.viewport_height.clone()
    }

    /// Viewport resized. Intersections are re-tested on the next frame.
    pub fn resize(&self, viewport_height: f64) {
        self.viewport_height.set(viewport_height);
    }

    /// Ask the host for the reduced-motion preference.
    ///
    /// Not cached: engines call this exactly once, at mount.
    pub fn prefers_reduced_motion(&self) -> bool {
        self.preference.prefers_reduced_motion()
    }

    /// Forward a raw scroll event.
    pub fn report_scroll(&self, offset: f64) {
        self.telemetry.report(offset);
    }

    /// Run one frame: flush telemetry, then check intersections.
    pub fn frame(&self, time: f64) -> FrameReport {
        let sample = self.telemetry.flush_frame(time);
        let intersections = if self.watcher.is_available() {
            self.watcher
                .check(self.telemetry.offset(), self.viewport_height.get(), time)
        } else {
            0
        };
        FrameReport {
            sample,
            intersections,
        }
    }

    /// Live telemetry subscriptions plus live intersection observations.
    pub fn active_subscriptions(&self) -> usize {
        self.telemetry.subscriber_count() + self.watcher.observation_count()
    }
}
