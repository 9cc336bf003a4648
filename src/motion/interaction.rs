//! Scroll Interaction - Mode-driven scroll effects
//!
//! One element, one [`InteractionMode`], chosen at mount:
//!
//! | Mode | Source | Output |
//! |------|--------|--------|
//! | `Parallax { speed }` | scroll telemetry | continuous scale / translate |
//! | `TextReveal` | intersection (once) | bottom-up polygon clip + rise |
//! | `ClipReveal` | intersection (once) | inset clip + fade |
//! | `Marquee`, `StickyProgress` | none | pass-through |
//!
//! Parallax produces two independent mappings on every sample: an
//! element-local drift driven by how far the element has travelled through
//! the viewport, and a page-level "hero settle" (scale and translate) driven
//! by the absolute scroll offset. The rendered style carries the settle; the
//! drift is exposed on [`ParallaxFrame`] for hosts that move the element
//! itself.
//!
//! With reduced motion (or missing capabilities) every mode renders its
//! children untouched and nothing is subscribed.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use spark_signals::{signal, Signal};
use tracing::{debug, warn};

use crate::config::{MotionConfig, ParallaxConfig};
use crate::error::{MotionError, Result};
use crate::motion::mapping::{map_clamped, scroll_progress};
use crate::motion::transition::{Transition, Tween};
use crate::pipeline::Surface;
use crate::state::{IntersectionWatcher, ObserveMode};
use crate::types::{ClipPath, Cleanup, ElementBounds, ElementId, MotionStyle, StyleProps, ViewportMargin};

/// Stock `parallax.default_speed`.
pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;

// =============================================================================
// MODE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionMode {
    TextReveal,
    ClipReveal,
    Parallax { speed: f64 },
    Marquee,
    StickyProgress,
}

impl InteractionMode {
    /// Parallax with a validated speed.
    pub fn parallax(speed: f64) -> Result<Self> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(MotionError::InvalidSpeed(speed));
        }
        Ok(Self::Parallax { speed })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TextReveal => "text-reveal",
            Self::ClipReveal => "clip-reveal",
            Self::Parallax { .. } => "parallax",
            Self::Marquee => "marquee",
            Self::StickyProgress => "sticky-progress",
        }
    }

    /// Style properties this mode drives.
    pub fn animated_props(&self) -> StyleProps {
        match self {
            Self::TextReveal => StyleProps::CLIP_PATH | StyleProps::TRANSLATE_Y,
            Self::ClipReveal => StyleProps::CLIP_PATH | StyleProps::OPACITY,
            Self::Parallax { .. } => StyleProps::SCALE | StyleProps::TRANSLATE_Y,
            Self::Marquee | Self::StickyProgress => StyleProps::NONE,
        }
    }

    /// Whether this mode runs a single viewport-triggered transition.
    pub fn is_one_shot(&self) -> bool {
        matches!(self, Self::TextReveal | Self::ClipReveal)
    }

    /// Parse a mode name; a bare `parallax` takes `parallax.default_speed`.
    pub fn parse_with(name: &str, parallax: &ParallaxConfig) -> Result<Self> {
        match name.trim() {
            "text-reveal" => Ok(Self::TextReveal),
            "clip-reveal" => Ok(Self::ClipReveal),
            "parallax" => Self::parallax(parallax.default_speed),
            "marquee" => Ok(Self::Marquee),
            "sticky-progress" => Ok(Self::StickyProgress),
            other => Err(MotionError::UnknownMode(other.to_string())),
        }
    }
}

impl FromStr for InteractionMode {
    type Err = MotionError;

    /// Parses against the stock configuration. Use
    /// [`InteractionMode::parse_with`] to honour a loaded one.
    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with(s, &ParallaxConfig::default())
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// PARALLAX
// =============================================================================

/// Parallax outputs for one scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxFrame {
    /// Element travel through the viewport, `[0, 1]`.
    pub progress: f64,
    /// Element-local drift, `0` to `-drift * speed`.
    pub local_offset: f64,
    /// Page-level hero scale, `settle_scale` to `1.0`.
    pub scale: f64,
    /// Page-level hero translate, `0` to `settle_translate`.
    pub translate_y: f64,
}

impl ParallaxFrame {
    pub fn compute(
        offset: f64,
        viewport_height: f64,
        bounds: &ElementBounds,
        speed: f64,
        config: &ParallaxConfig,
    ) -> Self {
        let progress = scroll_progress(offset, viewport_height, bounds);
        let settle = (0.0, config.settle_distance);
        Self {
            progress,
            local_offset: map_clamped(progress, (0.0, 1.0), (0.0, -config.drift * speed)),
            scale: map_clamped(offset, settle, (config.settle_scale, 1.0)),
            translate_y: map_clamped(offset, settle, (0.0, config.settle_translate)),
        }
    }

    /// The style a host paints for this frame.
    pub fn style(&self) -> MotionStyle {
        MotionStyle {
            scale: self.scale,
            translate_y: self.translate_y,
            ..MotionStyle::IDENTITY
        }
    }
}

struct ParallaxState {
    bounds: Cell<ElementBounds>,
    speed: f64,
    config: ParallaxConfig,
    viewport_height: Rc<Cell<f64>>,
    frame: Signal<ParallaxFrame>,
}

impl ParallaxState {
    fn update(&self, offset: f64) {
        let frame = ParallaxFrame::compute(
            offset,
            self.viewport_height.get(),
            &self.bounds.get(),
            self.speed,
            &self.config,
        );
        self.frame.set(frame);
    }
}

// =============================================================================
// ONE-SHOT REVEALS
// =============================================================================

struct OneShotState {
    revealed: bool,
    tween: Tween,
    target: MotionStyle,
    transition: Transition,
}

/// Start and end styles plus timing of a one-shot mode.
fn one_shot_styles(mode: InteractionMode, config: &MotionConfig) -> Option<(MotionStyle, MotionStyle, Transition)> {
    let easing = config.easing();
    match mode {
        InteractionMode::TextReveal => Some((
            MotionStyle {
                translate_y: config.text_reveal.distance,
                clip: Some(ClipPath::bottom_up(100.0)),
                ..MotionStyle::IDENTITY
            },
            MotionStyle {
                clip: Some(ClipPath::bottom_up(0.0)),
                ..MotionStyle::IDENTITY
            },
            Transition::new(config.text_reveal.duration, easing),
        )),
        InteractionMode::ClipReveal => Some((
            MotionStyle {
                opacity: 0.0,
                clip: Some(ClipPath::inset(config.clip_reveal.inset)),
                ..MotionStyle::IDENTITY
            },
            MotionStyle {
                clip: Some(ClipPath::inset(0.0)),
                ..MotionStyle::IDENTITY
            },
            Transition::new(config.clip_reveal.duration, easing),
        )),
        _ => None,
    }
}

// =============================================================================
// SCROLL INTERACTION
// =============================================================================

enum Behavior {
    /// Children render untouched.
    PassThrough,
    Parallax(Rc<ParallaxState>),
    OneShot(Rc<RefCell<OneShotState>>),
}

/// A mounted scroll interaction. Detaches on [`unmount`](Self::unmount) or drop.
pub struct ScrollInteraction {
    element: ElementId,
    mode: InteractionMode,
    behavior: Behavior,
    watcher: Option<IntersectionWatcher>,
    detach: Option<Cleanup>,
}

impl ScrollInteraction {
    /// Mount by mode name, resolving a bare `parallax` against the surface's
    /// configured default speed.
    pub fn mount_named(surface: &Surface, element: ElementId, bounds: ElementBounds, name: &str) -> Result<Self> {
        let mode = InteractionMode::parse_with(name, &surface.config().parallax)?;
        Self::mount(surface, element, bounds, mode)
    }

    pub fn mount(
        surface: &Surface,
        element: ElementId,
        bounds: ElementBounds,
        mode: InteractionMode,
    ) -> Result<Self> {
        if let InteractionMode::Parallax { speed } = mode {
            InteractionMode::parallax(speed)?;
        }

        if surface.prefers_reduced_motion() {
            debug!(element, %mode, "interaction: reduced motion, passing through");
            return Ok(Self::pass_through(element, mode));
        }

        let mounted = match mode {
            InteractionMode::Parallax { speed } => Self::mount_parallax(surface, element, bounds, mode, speed),
            InteractionMode::TextReveal | InteractionMode::ClipReveal => {
                Self::mount_one_shot(surface, element, bounds, mode)
            }
            InteractionMode::Marquee | InteractionMode::StickyProgress => {
                Ok(Self::pass_through(element, mode))
            }
        };

        match mounted {
            Err(MotionError::CapabilityUnavailable(capability)) => {
                warn!(element, capability, %mode, "interaction: capability missing, passing through");
                Ok(Self::pass_through(element, mode))
            }
            other => other,
        }
    }

    fn pass_through(element: ElementId, mode: InteractionMode) -> Self {
        Self {
            element,
            mode,
            behavior: Behavior::PassThrough,
            watcher: None,
            detach: None,
        }
    }

    fn mount_parallax(
        surface: &Surface,
        element: ElementId,
        bounds: ElementBounds,
        mode: InteractionMode,
        speed: f64,
    ) -> Result<Self> {
        let config = surface.config().parallax.clone();
        let viewport_height = surface.viewport_handle();
        let initial = ParallaxFrame::compute(
            surface.telemetry().offset(),
            viewport_height.get(),
            &bounds,
            speed,
            &config,
        );
        let state = Rc::new(ParallaxState {
            bounds: Cell::new(bounds),
            speed,
            config,
            viewport_height,
            frame: signal(initial),
        });

        let weak = Rc::downgrade(&state);
        let detach = surface.telemetry().subscribe(move |sample| {
            if let Some(state) = weak.upgrade() {
                state.update(sample.offset);
            }
        })?;

        Ok(Self {
            element,
            mode,
            behavior: Behavior::Parallax(state),
            watcher: None,
            detach: Some(detach),
        })
    }

    fn mount_one_shot(
        surface: &Surface,
        element: ElementId,
        bounds: ElementBounds,
        mode: InteractionMode,
    ) -> Result<Self> {
        let Some((initial, target, transition)) = one_shot_styles(mode, surface.config()) else {
            return Ok(Self::pass_through(element, mode));
        };

        let state = Rc::new(RefCell::new(OneShotState {
            revealed: false,
            tween: Tween::settled(initial),
            target,
            transition,
        }));

        let weak = Rc::downgrade(&state);
        let detach = surface.watcher().observe(
            element,
            bounds,
            ViewportMargin::ZERO,
            ObserveMode::Once,
            move |event| {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let mut state = state.borrow_mut();
                if state.revealed || !event.is_intersecting {
                    return;
                }
                state.revealed = true;
                state.tween = Tween::new(state.tween.sample(event.time), state.target, state.transition, event.time);
                debug!(element = event.element, "interaction one-shot started");
            },
        )?;

        Ok(Self {
            element,
            mode,
            behavior: Behavior::OneShot(state),
            watcher: Some(surface.watcher().clone()),
            detach: Some(detach),
        })
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Whether children render untouched (pass-through mode, reduced motion,
    /// or missing capability).
    pub fn is_pass_through(&self) -> bool {
        matches!(self.behavior, Behavior::PassThrough)
    }

    /// Whether this interaction holds a telemetry or watcher subscription.
    pub fn is_subscribed(&self) -> bool {
        self.detach.is_some()
    }

    /// Style to paint at `now`.
    pub fn style_at(&self, now: f64) -> MotionStyle {
        match &self.behavior {
            Behavior::PassThrough => MotionStyle::IDENTITY,
            Behavior::Parallax(state) => state.frame.get().style(),
            Behavior::OneShot(state) => state.borrow().tween.sample(now),
        }
    }

    /// Latest parallax outputs, for parallax mode.
    pub fn parallax_frame(&self) -> Option<ParallaxFrame> {
        match &self.behavior {
            Behavior::Parallax(state) => Some(state.frame.get()),
            _ => None,
        }
    }

    /// Reactive view of the parallax outputs, for parallax mode.
    pub fn parallax_signal(&self) -> Option<Signal<ParallaxFrame>> {
        match &self.behavior {
            Behavior::Parallax(state) => Some(state.frame.clone()),
            _ => None,
        }
    }

    /// Whether a one-shot mode has been triggered.
    pub fn is_revealed(&self) -> bool {
        match &self.behavior {
            Behavior::OneShot(state) => state.borrow().revealed,
            _ => false,
        }
    }

    /// Whether no transition is in flight at `now`.
    pub fn is_settled(&self, now: f64) -> bool {
        match &self.behavior {
            Behavior::OneShot(state) => state.borrow().tween.is_complete(now),
            _ => true,
        }
    }

    /// Update the element's geometry after layout.
    ///
    /// Parallax recomputes on the next sample.
    pub fn set_bounds(&self, bounds: ElementBounds) {
        match &self.behavior {
            Behavior::Parallax(state) => state.bounds.set(bounds),
            Behavior::OneShot(_) => {
                if let Some(watcher) = &self.watcher {
                    watcher.set_bounds(self.element, bounds);
                }
            }
            Behavior::PassThrough => {}
        }
    }

    /// Detach from the surface. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
            debug!(element = self.element, mode = %self.mode, "interaction unmounted");
        }
    }
}

impl Drop for ScrollInteraction {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FixedPreference;

    const VIEWPORT: f64 = 800.0;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn setup() -> Surface {
        Surface::new(VIEWPORT, FixedPreference(false))
    }

    fn hero() -> ElementBounds {
        ElementBounds::new(0.0, 800.0)
    }

    fn below_fold() -> ElementBounds {
        ElementBounds::new(1200.0, 400.0)
    }

    fn scroll(surface: &Surface, offset: f64, time: f64) {
        surface.report_scroll(offset);
        surface.frame(time);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("text-reveal".parse::<InteractionMode>().unwrap(), InteractionMode::TextReveal);
        assert_eq!("clip-reveal".parse::<InteractionMode>().unwrap(), InteractionMode::ClipReveal);
        assert_eq!(
            "parallax".parse::<InteractionMode>().unwrap(),
            InteractionMode::Parallax { speed: 0.5 }
        );
        assert_eq!("marquee".parse::<InteractionMode>().unwrap(), InteractionMode::Marquee);
        assert_eq!(
            "sticky-progress".parse::<InteractionMode>().unwrap(),
            InteractionMode::StickyProgress
        );
        assert!(matches!(
            "spin".parse::<InteractionMode>(),
            Err(MotionError::UnknownMode(_))
        ));
        assert_eq!(InteractionMode::ClipReveal.to_string(), "clip-reveal");
    }

    #[test]
    fn test_mode_parse_with_configured_speed() {
        let config = ParallaxConfig {
            default_speed: 0.25,
            ..ParallaxConfig::default()
        };
        assert_eq!(
            InteractionMode::parse_with("parallax", &config).unwrap(),
            InteractionMode::Parallax { speed: 0.25 }
        );
        assert_eq!(
            InteractionMode::parse_with(" marquee ", &config).unwrap(),
            InteractionMode::Marquee
        );

        let config = ParallaxConfig {
            default_speed: -1.0,
            ..ParallaxConfig::default()
        };
        assert!(matches!(
            InteractionMode::parse_with("parallax", &config),
            Err(MotionError::InvalidSpeed(_))
        ));
    }

    #[test]
    fn test_mount_named_uses_configured_speed() {
        let config = MotionConfig::from_toml_str("[parallax]\ndefault_speed = 0.25\n").unwrap();
        let surface = Surface::with_config(VIEWPORT, FixedPreference(false), config).unwrap();
        let parallax = ScrollInteraction::mount_named(&surface, 1, below_fold(), "parallax").unwrap();
        assert_eq!(parallax.mode(), InteractionMode::Parallax { speed: 0.25 });

        // Past the tracked range: full drift, scaled by the configured speed
        scroll(&surface, 3000.0, 0.1);
        assert!(approx_eq(parallax.parallax_frame().unwrap().local_offset, -25.0));

        let stock = setup();
        let parallax = ScrollInteraction::mount_named(&stock, 1, below_fold(), "parallax").unwrap();
        scroll(&stock, 3000.0, 0.1);
        assert!(approx_eq(parallax.parallax_frame().unwrap().local_offset, -50.0));
    }

    #[test]
    fn test_mount_named_rejects_unknown_mode() {
        let surface = setup();
        let result = ScrollInteraction::mount_named(&surface, 1, hero(), "spin");
        assert!(matches!(result, Err(MotionError::UnknownMode(_))));
        assert_eq!(surface.active_subscriptions(), 0);
    }

    #[test]
    fn test_mode_props() {
        assert!(InteractionMode::ClipReveal.animated_props().contains(StyleProps::OPACITY));
        assert!(InteractionMode::Marquee.animated_props().is_empty());
        assert!(InteractionMode::TextReveal.is_one_shot());
        assert!(!InteractionMode::Parallax { speed: 1.0 }.is_one_shot());
    }

    #[test]
    fn test_parallax_settle_clamped() {
        let config = ParallaxConfig::default();
        let at_800 = ParallaxFrame::compute(800.0, VIEWPORT, &hero(), 0.5, &config);
        let at_1000 = ParallaxFrame::compute(1000.0, VIEWPORT, &hero(), 0.5, &config);

        assert_eq!(at_800.scale, 1.0);
        assert_eq!(at_800.translate_y, 40.0);
        assert_eq!(at_1000.scale, 1.0);
        assert_eq!(at_1000.translate_y, 40.0);

        let at_0 = ParallaxFrame::compute(0.0, VIEWPORT, &hero(), 0.5, &config);
        assert_eq!(at_0.scale, 1.1);
        assert_eq!(at_0.translate_y, 0.0);

        let at_400 = ParallaxFrame::compute(400.0, VIEWPORT, &hero(), 0.5, &config);
        assert!(approx_eq(at_400.scale, 1.05));
        assert!(approx_eq(at_400.translate_y, 20.0));
    }

    #[test]
    fn test_parallax_local_drift() {
        let config = ParallaxConfig::default();
        let bounds = below_fold();
        // Tracked range: 400 to 1600

        let before = ParallaxFrame::compute(100.0, VIEWPORT, &bounds, 0.5, &config);
        assert_eq!(before.progress, 0.0);
        assert_eq!(before.local_offset, 0.0);

        let middle = ParallaxFrame::compute(1000.0, VIEWPORT, &bounds, 0.5, &config);
        assert!(approx_eq(middle.progress, 0.5));
        assert!(approx_eq(middle.local_offset, -25.0));

        let after = ParallaxFrame::compute(3000.0, VIEWPORT, &bounds, 2.0, &config);
        assert_eq!(after.local_offset, -200.0);
    }

    #[test]
    fn test_parallax_follows_telemetry() {
        let surface = setup();
        let parallax = ScrollInteraction::mount(&surface, 1, hero(), InteractionMode::Parallax { speed: 0.5 }).unwrap();

        assert_eq!(parallax.style_at(0.0).scale, 1.1);
        assert_eq!(surface.telemetry().subscriber_count(), 1);

        scroll(&surface, 400.0, 0.1);
        let style = parallax.style_at(0.1);
        assert!(approx_eq(style.scale, 1.05));
        assert!(approx_eq(style.translate_y, 20.0));

        scroll(&surface, 1000.0, 0.2);
        let frame = parallax.parallax_frame().unwrap();
        assert_eq!(frame.scale, 1.0);
        assert_eq!(frame.translate_y, 40.0);
        assert_eq!(parallax.parallax_signal().unwrap().get(), frame);
    }

    #[test]
    fn test_parallax_mounts_at_current_offset() {
        let surface = setup();
        scroll(&surface, 800.0, 0.0);

        let parallax = ScrollInteraction::mount(&surface, 1, hero(), InteractionMode::Parallax { speed: 0.5 }).unwrap();
        assert_eq!(parallax.style_at(0.0).scale, 1.0);
    }

    #[test]
    fn test_parallax_uses_live_viewport_and_bounds() {
        let surface = setup();
        let parallax =
            ScrollInteraction::mount(&surface, 1, below_fold(), InteractionMode::Parallax { speed: 1.0 }).unwrap();

        parallax.set_bounds(ElementBounds::new(2000.0, 400.0));
        surface.resize(1000.0);
        // Tracked range now 1000 to 2400
        scroll(&surface, 1700.0, 0.1);

        let frame = parallax.parallax_frame().unwrap();
        assert!(approx_eq(frame.progress, 0.5));
        assert!(approx_eq(frame.local_offset, -50.0));
    }

    #[test]
    fn test_parallax_rejects_bad_speed() {
        let surface = setup();
        let result = ScrollInteraction::mount(&surface, 1, hero(), InteractionMode::Parallax { speed: f64::NAN });
        assert!(matches!(result, Err(MotionError::InvalidSpeed(_))));
        assert!(InteractionMode::parallax(-1.0).is_err());
        assert_eq!(surface.active_subscriptions(), 0);
    }

    #[test]
    fn test_text_reveal_one_shot() {
        let surface = setup();
        let text = ScrollInteraction::mount(&surface, 1, below_fold(), InteractionMode::TextReveal).unwrap();
        surface.frame(0.0);

        let start = text.style_at(0.0);
        assert_eq!(start.clip.unwrap().to_string(), "polygon(0% 100%, 100% 100%, 100% 100%, 0% 100%)");
        assert_eq!(start.translate_y, 20.0);
        assert!(!text.is_revealed());

        scroll(&surface, 500.0, 1.0);
        assert!(text.is_revealed());
        assert!(!text.is_settled(1.4));

        let end = text.style_at(1.8);
        assert_eq!(end.clip.unwrap().to_string(), "polygon(0% 0%, 100% 0%, 100% 100%, 0% 100%)");
        assert_eq!(end.translate_y, 0.0);
        assert!(text.is_settled(1.8));
        assert_eq!(surface.watcher().observation_count(), 0);
    }

    #[test]
    fn test_clip_reveal_end_state_exact() {
        let surface = setup();
        let clip = ScrollInteraction::mount(&surface, 1, below_fold(), InteractionMode::ClipReveal).unwrap();

        let start = clip.style_at(0.0);
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.clip, Some(ClipPath::inset(10.0)));

        scroll(&surface, 500.0, 2.0);

        // Never past the final values on the way there
        for step in 0..=20 {
            let style = clip.style_at(2.0 + step as f64 * 0.05);
            assert!(style.opacity <= 1.0);
            if let Some(ClipPath::Inset { top, .. }) = style.clip {
                assert!(top >= 0.0);
            }
        }

        assert!(clip.is_settled(3.0));
        let end = clip.style_at(3.0);
        assert_eq!(end.opacity, 1.0);
        assert_eq!(end.clip.unwrap().to_string(), "inset(0% 0% 0% 0%)");
        assert_eq!(clip.style_at(100.0), end);
    }

    #[test]
    fn test_one_shot_ignores_exit() {
        let surface = setup();
        let clip = ScrollInteraction::mount(&surface, 1, below_fold(), InteractionMode::ClipReveal).unwrap();

        scroll(&surface, 500.0, 0.0);
        scroll(&surface, 0.0, 5.0);

        assert!(clip.is_revealed());
        assert_eq!(clip.style_at(5.0).opacity, 1.0);
    }

    #[test]
    fn test_pass_through_modes() {
        let surface = setup();
        for mode in [InteractionMode::Marquee, InteractionMode::StickyProgress] {
            let interaction = ScrollInteraction::mount(&surface, 1, hero(), mode).unwrap();
            assert!(interaction.is_pass_through());
            assert!(!interaction.is_subscribed());
            assert_eq!(interaction.style_at(0.0), MotionStyle::IDENTITY);
        }
        assert_eq!(surface.active_subscriptions(), 0);
    }

    #[test]
    fn test_reduced_motion_creates_no_subscriptions() {
        let surface = Surface::new(VIEWPORT, FixedPreference(true));
        let modes = [
            InteractionMode::Parallax { speed: 0.5 },
            InteractionMode::TextReveal,
            InteractionMode::ClipReveal,
            InteractionMode::Marquee,
            InteractionMode::StickyProgress,
        ];

        let mounted: Vec<ScrollInteraction> = modes
            .iter()
            .enumerate()
            .map(|(i, mode)| ScrollInteraction::mount(&surface, i, below_fold(), *mode).unwrap())
            .collect();

        scroll(&surface, 1000.0, 0.0);

        assert_eq!(surface.active_subscriptions(), 0);
        for interaction in &mounted {
            assert!(interaction.is_pass_through());
            assert_eq!(interaction.style_at(0.0), MotionStyle::IDENTITY);
        }
    }

    #[test]
    fn test_missing_capability_passes_through() {
        let surface = Surface::without_observers(VIEWPORT, FixedPreference(false));
        let parallax = ScrollInteraction::mount(&surface, 1, hero(), InteractionMode::Parallax { speed: 0.5 }).unwrap();
        let clip = ScrollInteraction::mount(&surface, 2, below_fold(), InteractionMode::ClipReveal).unwrap();

        assert!(parallax.is_pass_through());
        assert!(clip.is_pass_through());
        assert_eq!(clip.style_at(0.0), MotionStyle::IDENTITY);
    }

    #[test]
    fn test_unmount_detaches() {
        let surface = setup();
        let mut parallax =
            ScrollInteraction::mount(&surface, 1, hero(), InteractionMode::Parallax { speed: 0.5 }).unwrap();
        let mut clip = ScrollInteraction::mount(&surface, 2, below_fold(), InteractionMode::ClipReveal).unwrap();
        assert_eq!(surface.active_subscriptions(), 2);

        parallax.unmount();
        clip.unmount();
        assert_eq!(surface.active_subscriptions(), 0);

        // Frozen at the last computed values
        scroll(&surface, 600.0, 0.1);
        assert_eq!(parallax.style_at(0.1).scale, 1.1);
        assert!(!clip.is_revealed());
    }
}
