//! Reveal - Fade-and-rise on viewport entry
//!
//! Wraps one element. The element starts hidden (transparent, pushed down by
//! the configured distance) and transitions to its resting style the first
//! time it intersects the viewport, after an optional delay.
//!
//! # Lifecycle
//!
//! ```text
//! mount ──► Hidden ──(enters viewport)──► Visible ──(once: terminal)
//!                  ◄──(leaves, repeat only)──
//! ```
//!
//! With reduced motion (or a host that cannot observe intersections) the
//! element mounts directly in its resting style: no watcher, no delay, no
//! intermediate frame.
//!
//! # Example
//!
//! ```ignore
//! let mut reveal = Reveal::mount(&surface, id, bounds, RevealProps::delayed(0.2))?;
//! // each paint
//! let style = reveal.style_at(now);
//! // element removed
//! reveal.unmount();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::{debug, warn};

use crate::error::{MotionError, Result};
use crate::motion::transition::{Transition, Tween};
use crate::pipeline::Surface;
use crate::state::{IntersectionEvent, IntersectionWatcher, ObserveMode};
use crate::types::{Cleanup, ElementBounds, ElementId, MotionStyle};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Visible,
}

/// Reveal parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealProps {
    /// Seconds between entering the viewport and starting to move.
    pub delay: f64,
    /// Stay visible after the first reveal.
    pub once: bool,
}

impl Default for RevealProps {
    fn default() -> Self {
        Self {
            delay: 0.0,
            once: true,
        }
    }
}

impl RevealProps {
    pub fn delayed(delay: f64) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Hide again whenever the element leaves the viewport.
    pub fn repeat(mut self) -> Self {
        self.once = false;
        self
    }
}

/// Listener for reveal state changes.
pub type RevealListener = Rc<dyn Fn(ElementId, RevealState)>;

struct RevealInner {
    state: RevealState,
    tween: Tween,
    hidden: MotionStyle,
    enter: Transition,
    exit: Transition,
    once: bool,
    listener: Option<RevealListener>,
}

impl RevealInner {
    /// Apply an intersection event. Returns the new state if it changed.
    fn on_intersection(&mut self, event: &IntersectionEvent) -> Option<RevealState> {
        match (self.state, event.is_intersecting) {
            (RevealState::Hidden, true) => {
                self.tween = self.tween.retarget(MotionStyle::IDENTITY, self.enter, event.time);
                self.state = RevealState::Visible;
                Some(RevealState::Visible)
            }
            (RevealState::Visible, false) if !self.once => {
                self.tween = self.tween.retarget(self.hidden, self.exit, event.time);
                self.state = RevealState::Hidden;
                Some(RevealState::Hidden)
            }
            _ => None,
        }
    }
}

// =============================================================================
// REVEAL
// =============================================================================

/// A mounted reveal. Detaches from the surface on [`unmount`](Self::unmount)
/// or drop.
pub struct Reveal {
    element: ElementId,
    inner: Rc<RefCell<RevealInner>>,
    state: Signal<RevealState>,
    watcher: Option<IntersectionWatcher>,
    detach: Option<Cleanup>,
}

impl Reveal {
    pub fn mount(
        surface: &Surface,
        element: ElementId,
        bounds: ElementBounds,
        props: RevealProps,
    ) -> Result<Self> {
        if !props.delay.is_finite() || props.delay < 0.0 {
            return Err(MotionError::InvalidDelay(props.delay));
        }

        let config = surface.config();
        let hidden = MotionStyle {
            opacity: 0.0,
            translate_y: config.reveal.distance,
            ..MotionStyle::IDENTITY
        };

        if surface.prefers_reduced_motion() {
            debug!(element, "reveal: reduced motion, rendering final state");
            return Ok(Self::settled(element, hidden, props.once));
        }

        let easing = config.easing();
        let inner = Rc::new(RefCell::new(RevealInner {
            state: RevealState::Hidden,
            tween: Tween::settled(hidden),
            hidden,
            enter: Transition::new(config.reveal.duration, easing).with_delay(props.delay),
            exit: Transition::new(config.reveal.duration, easing),
            once: props.once,
            listener: None,
        }));
        let state = signal(RevealState::Hidden);

        let mode = if props.once {
            ObserveMode::Once
        } else {
            ObserveMode::Repeat
        };

        let weak = Rc::downgrade(&inner);
        let state_signal = state.clone();
        let observed = surface.watcher().observe(
            element,
            bounds,
            surface.reveal_margin(),
            mode,
            move |event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let (changed, listener) = {
                    let mut inner = inner.borrow_mut();
                    (inner.on_intersection(event), inner.listener.clone())
                };
                if let Some(next) = changed {
                    debug!(element = event.element, state = ?next, "reveal transition");
                    state_signal.set(next);
                    if let Some(listener) = listener {
                        listener(event.element, next);
                    }
                }
            },
        );

        match observed {
            Ok(detach) => Ok(Self {
                element,
                inner,
                state,
                watcher: Some(surface.watcher().clone()),
                detach: Some(detach),
            }),
            Err(MotionError::CapabilityUnavailable(capability)) => {
                warn!(element, capability, "reveal: capability missing, rendering final state");
                Ok(Self::settled(element, hidden, props.once))
            }
            Err(e) => Err(e),
        }
    }

    /// A reveal resting in its final style with nothing attached.
    fn settled(element: ElementId, hidden: MotionStyle, once: bool) -> Self {
        let inner = RevealInner {
            state: RevealState::Visible,
            tween: Tween::settled(MotionStyle::IDENTITY),
            hidden,
            enter: Transition::instant(),
            exit: Transition::instant(),
            once,
            listener: None,
        };
        Self {
            element,
            inner: Rc::new(RefCell::new(inner)),
            state: signal(RevealState::Visible),
            watcher: None,
            detach: None,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn state(&self) -> RevealState {
        self.state.get()
    }

    /// Reactive view of the reveal state.
    pub fn state_signal(&self) -> Signal<RevealState> {
        self.state.clone()
    }

    /// Style to paint at `now`.
    pub fn style_at(&self, now: f64) -> MotionStyle {
        self.inner.borrow().tween.sample(now)
    }

    /// Whether no transition is in flight at `now`.
    pub fn is_settled(&self, now: f64) -> bool {
        self.inner.borrow().tween.is_complete(now)
    }

    /// Whether this reveal is attached to an intersection watcher.
    pub fn is_observing(&self) -> bool {
        self.detach.is_some()
            && self
                .watcher
                .as_ref()
                .is_some_and(|w| w.is_observing(self.element))
    }

    /// Called after each state change.
    pub fn on_state_change(&self, listener: impl Fn(ElementId, RevealState) + 'static) {
        self.inner.borrow_mut().listener = Some(Rc::new(listener));
    }

    /// Update the element's geometry after layout.
    pub fn set_bounds(&self, bounds: ElementBounds) {
        if let Some(watcher) = &self.watcher {
            watcher.set_bounds(self.element, bounds);
        }
    }

    /// Detach from the surface. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
            debug!(element = self.element, "reveal unmounted");
        }
        self.inner.borrow_mut().listener = None;
    }
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// TESTS
// =============================================================================
