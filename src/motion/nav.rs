//! Nav Visibility - Hide the fixed nav while scrolling down
//!
//! Every scroll sample is classified on its own, with no debouncing:
//!
//! - `Hidden` when moving down (`offset > previous_offset`) past the threshold
//! - `Shown` otherwise (moving up, standing still, or near the top)
//!
//! The nav slides by its own height: 0% when shown, -100% when hidden, over
//! the configured duration. A flip mid-slide restarts from the current
//! position.
//!
//! With reduced motion the nav simply stays shown and nothing is subscribed.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::{debug, warn};

use crate::error::MotionError;
use crate::motion::transition::{Transition, Tween};
use crate::pipeline::Surface;
use crate::types::{Cleanup, MotionStyle, ScrollSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavVisibility {
    Shown,
    Hidden,
}

impl NavVisibility {
    /// Classify one sample against `threshold`.
    pub fn from_sample(sample: &ScrollSample, threshold: f64) -> Self {
        if sample.offset > sample.previous_offset && sample.offset > threshold {
            Self::Hidden
        } else {
            Self::Shown
        }
    }

    /// Resting translate, in percent of the nav height.
    pub fn translate_percent(&self) -> f64 {
        match self {
            Self::Shown => 0.0,
            Self::Hidden => -100.0,
        }
    }

    fn resting_style(&self) -> MotionStyle {
        MotionStyle {
            translate_y: self.translate_percent(),
            ..MotionStyle::IDENTITY
        }
    }
}

/// Listener for nav visibility flips.
pub type NavListener = Rc<dyn Fn(NavVisibility)>;

struct NavInner {
    visibility: NavVisibility,
    /// `translate_y` holds percent of the nav height.
    tween: Tween,
    transition: Transition,
    threshold: f64,
    listener: Option<NavListener>,
}

impl NavInner {
    fn on_sample(&mut self, sample: &ScrollSample) -> Option<NavVisibility> {
        let next = NavVisibility::from_sample(sample, self.threshold);
        if next == self.visibility {
            return None;
        }
        self.visibility = next;
        self.tween = self
            .tween
            .retarget(next.resting_style(), self.transition, sample.time);
        Some(next)
    }
}

/// A mounted nav controller. Detaches on [`unmount`](Self::unmount) or drop.
pub struct NavController {
    inner: Rc<RefCell<NavInner>>,
    visibility: Signal<NavVisibility>,
    detach: Option<Cleanup>,
}

impl NavController {
    pub fn mount(surface: &Surface) -> Self {
        let config = surface.config();
        let inner = Rc::new(RefCell::new(NavInner {
            visibility: NavVisibility::Shown,
            tween: Tween::settled(NavVisibility::Shown.resting_style()),
            transition: Transition::new(config.nav.duration, config.easing()),
            threshold: config.nav.threshold,
            listener: None,
        }));
        let visibility = signal(NavVisibility::Shown);

        if surface.prefers_reduced_motion() {
            debug!("nav: reduced motion, staying shown");
            return Self {
                inner,
                visibility,
                detach: None,
            };
        }

        let weak = Rc::downgrade(&inner);
        let visibility_signal = visibility.clone();
        let subscribed = surface.telemetry().subscribe(move |sample| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let (changed, listener) = {
                let mut inner = inner.borrow_mut();
                (inner.on_sample(sample), inner.listener.clone())
            };
            if let Some(next) = changed {
                debug!(visibility = ?next, offset = sample.offset, "nav visibility");
                visibility_signal.set(next);
                if let Some(listener) = listener {
                    listener(next);
                }
            }
        });

        let detach = match subscribed {
            Ok(detach) => Some(detach),
            Err(MotionError::CapabilityUnavailable(capability)) => {
                warn!(capability, "nav: capability missing, staying shown");
                None
            }
            Err(e) => {
                warn!("nav: subscribe failed: {}", e);
                None
            }
        };

        Self {
            inner,
            visibility,
            detach,
        }
    }

    pub fn visibility(&self) -> NavVisibility {
        self.visibility.get()
    }

    /// Reactive view of the visibility decision.
    pub fn visibility_signal(&self) -> Signal<NavVisibility> {
        self.visibility.clone()
    }

    /// Nav translate at `now`, in percent of its height (0 to -100).
    pub fn translate_percent_at(&self, now: f64) -> f64 {
        self.inner.borrow().tween.sample(now).translate_y
    }

    pub fn is_settled(&self, now: f64) -> bool {
        self.inner.borrow().tween.is_complete(now)
    }

    pub fn is_subscribed(&self) -> bool {
        self.detach.is_some()
    }

    /// Called after each visibility flip.
    pub fn on_change(&self, listener: impl Fn(NavVisibility) + 'static) {
        self.inner.borrow_mut().listener = Some(Rc::new(listener));
    }

    /// Detach from the surface. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
            debug!("nav unmounted");
        }
        self.inner.borrow_mut().listener = None;
    }
}

impl Drop for NavController {
    fn drop(&mut self) {
        self.unmount();
    }
}
