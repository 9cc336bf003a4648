//! Intersection Watcher - Per-element viewport entry detection
//!
//! Each observed element gets an "entered / left the viewport" signal, tested
//! against a viewport adjusted by the observation's margin. The surface runs
//! [`IntersectionWatcher::check`] once per frame with the current scroll
//! offset; callbacks fire only when an element's status changed since the
//! previous check (the first check always reports).
//!
//! # Modes
//!
//! - [`ObserveMode::Once`] - detaches right after the first intersecting event
//! - [`ObserveMode::Repeat`] - keeps reporting every crossing
//!
//! # Cleanup
//!
//! `observe` returns a [`Cleanup`]. Detaching is synchronous: an element whose
//! observation was removed never fires again, even later in the same check.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::error::{MotionError, Result};
use crate::types::{Cleanup, ElementBounds, ElementId, ViewportMargin};

// =============================================================================
// TYPES
// =============================================================================

/// Whether an observation survives its first intersecting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveMode {
    Once,
    Repeat,
}

/// Delivered when an element's intersection status changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEvent {
    pub element: ElementId,
    pub is_intersecting: bool,
    pub margin: ViewportMargin,
    /// Frame time of the check that produced this event.
    pub time: f64,
}

/// Intersection callback (Rc so a check can release the registry borrow
/// before calling out).
pub type IntersectionCallback = Rc<dyn Fn(&IntersectionEvent)>;

struct Observation {
    token: usize,
    element: ElementId,
    bounds: ElementBounds,
    margin: ViewportMargin,
    mode: ObserveMode,
    last: Option<bool>,
    callback: IntersectionCallback,
}

struct WatcherState {
    available: bool,
    observations: Vec<Observation>,
    next_token: usize,
}

impl WatcherState {
    fn position(&self, token: usize) -> Option<usize> {
        self.observations.iter().position(|o| o.token == token)
    }
}

/// Whether `bounds` overlaps the window `[top, bottom]`.
///
/// Zero-height elements count when they sit on or inside the window edges.
pub fn intersects(bounds: &ElementBounds, top: f64, bottom: f64) -> bool {
    if bounds.height <= 0.0 {
        bounds.top >= top && bounds.top <= bottom
    } else {
        bounds.top < bottom && bounds.bottom() > top
    }
}

// =============================================================================
// WATCHER
// =============================================================================

/// Registry of per-element observations for one surface.
#[derive(Clone)]
pub struct IntersectionWatcher {
    state: Rc<RefCell<WatcherState>>,
}

impl IntersectionWatcher {
    pub fn new() -> Self {
        Self::with_availability(true)
    }

    /// Watcher for a host without intersection observation. `observe` fails.
    pub fn unavailable() -> Self {
        Self::with_availability(false)
    }

    fn with_availability(available: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(WatcherState {
                available,
                observations: Vec::new(),
                next_token: 0,
            })),
        }
    }

    pub fn is_available(&self) -> bool {
        self.state.borrow().available
    }

    /// Start watching `element`.
    ///
    /// The margin is fixed for the lifetime of the observation. An element can
    /// only have one observation at a time.
    pub fn observe(
        &self,
        element: ElementId,
        bounds: ElementBounds,
        margin: ViewportMargin,
        mode: ObserveMode,
        callback: impl Fn(&IntersectionEvent) + 'static,
    ) -> Result<Cleanup> {
        let token = {
            let mut state = self.state.borrow_mut();
            if !state.available {
                return Err(MotionError::CapabilityUnavailable("intersection observer"));
            }
            if state.observations.iter().any(|o| o.element == element) {
                return Err(MotionError::AlreadyObserved(element));
            }

            let token = state.next_token;
            state.next_token += 1;
            state.observations.push(Observation {
                token,
                element,
                bounds,
                margin,
                mode,
                last: None,
                callback: Rc::new(callback),
            });
            token
        };
        trace!(element, ?mode, "intersection observe");

        let weak = Rc::downgrade(&self.state);
        Ok(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                let mut state = state.borrow_mut();
                if let Some(pos) = state.position(token) {
                    state.observations.remove(pos);
                    trace!(element, "intersection detach");
                }
            }
        }))
    }

    /// Stop watching `element`. Returns false if it was not observed.
    pub fn unobserve(&self, element: ElementId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.observations.len();
        state.observations.retain(|o| o.element != element);
        before != state.observations.len()
    }

    /// Update an observed element's geometry (after layout changes).
    pub fn set_bounds(&self, element: ElementId, bounds: ElementBounds) -> bool {
        let mut state = self.state.borrow_mut();
        match state.observations.iter_mut().find(|o| o.element == element) {
            Some(observation) => {
                observation.bounds = bounds;
                true
            }
            None => false,
        }
    }

    pub fn is_observing(&self, element: ElementId) -> bool {
        self.state
            .borrow()
            .observations
            .iter()
            .any(|o| o.element == element)
    }

    /// Number of live observations.
    pub fn observation_count(&self) -> usize {
        self.state.borrow().observations.len()
    }

    /// Test every observation against the viewport and deliver changes.
    ///
    /// Returns the number of callbacks invoked.
    pub fn check(&self, scroll_offset: f64, viewport_height: f64, time: f64) -> usize {
        let pending: Vec<(usize, IntersectionCallback, IntersectionEvent)> = {
            let mut state = self.state.borrow_mut();
            let mut pending = Vec::new();
            for observation in state.observations.iter_mut() {
                let (top, bottom) = observation.margin.window(scroll_offset, viewport_height);
                let hit = intersects(&observation.bounds, top, bottom);
                if observation.last == Some(hit) {
                    continue;
                }
                observation.last = Some(hit);
                pending.push((
                    observation.token,
                    observation.callback.clone(),
                    IntersectionEvent {
                        element: observation.element,
                        is_intersecting: hit,
                        margin: observation.margin,
                        time,
                    },
                ));
            }
            pending
        };

        let mut fired = 0;
        for (token, callback, event) in pending {
            let live = {
                let mut state = self.state.borrow_mut();
                match state.position(token) {
                    Some(pos) => {
                        if event.is_intersecting && state.observations[pos].mode == ObserveMode::Once {
                            state.observations.remove(pos);
                            trace!(element = event.element, "intersection once-detach");
                        }
                        true
                    }
                    None => false,
                }
            };

            if live {
                callback(&event);
                fired += 1;
            }
        }
        fired
    }
}

impl Default for IntersectionWatcher {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
