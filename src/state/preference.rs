//! Motion Preference - Reduced-motion capability
//!
//! The host decides whether the user asked for reduced motion; engines only
//! consume the answer. Every engine asks once, at mount, and keeps the answer
//! for its whole lifetime. The answer is never cached across mounts, so a
//! preference the host flips between mounts is honoured by the next mount.
//!
//! # Example
//!
//! ```ignore
//! use spark_motion::state::{FixedPreference, MotionPreference};
//!
//! let pref = FixedPreference(true);
//! assert!(pref.prefers_reduced_motion());
//!
//! // Any closure works too
//! let from_host = || std::env::var("REDUCE_MOTION").is_ok();
//! let _ = from_host.prefers_reduced_motion();
//! ```

use spark_signals::{signal, Signal};

/// Source of the user's reduced-motion preference.
pub trait MotionPreference {
    /// Whether non-essential motion should be suppressed.
    fn prefers_reduced_motion(&self) -> bool;
}

impl<F> MotionPreference for F
where
    F: Fn() -> bool,
{
    fn prefers_reduced_motion(&self) -> bool {
        self()
    }
}

/// A preference that never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedPreference(pub bool);

impl MotionPreference for FixedPreference {
    fn prefers_reduced_motion(&self) -> bool {
        self.0
    }
}

/// A preference backed by a signal the host updates (e.g. from a media query
/// listener). Reading it at mount does not subscribe the engine to changes.
#[derive(Clone)]
pub struct SignalPreference {
    reduced: Signal<bool>,
}

impl SignalPreference {
    pub fn new(initial: bool) -> Self {
        Self {
            reduced: signal(initial),
        }
    }

    /// Update the preference. Takes effect on the next mount.
    pub fn set(&self, reduced: bool) {
        self.reduced.set(reduced);
    }

    pub fn signal(&self) -> Signal<bool> {
        self.reduced.clone()
    }
}

impl MotionPreference for SignalPreference {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_fixed_preference() {
        assert!(FixedPreference(true).prefers_reduced_motion());
        assert!(!FixedPreference(false).prefers_reduced_motion());
        assert!(!FixedPreference::default().prefers_reduced_motion());
    }

    #[test]
    fn test_closure_preference_reads_every_call() {
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let pref = move || {
            calls_clone.set(calls_clone.get() + 1);
            true
        };

        assert!(pref.prefers_reduced_motion());
        assert!(pref.prefers_reduced_motion());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_signal_preference_tracks_host_updates() {
        let pref = SignalPreference::new(false);
        assert!(!pref.prefers_reduced_motion());

        pref.set(true);
        assert!(pref.prefers_reduced_motion());
        assert!(pref.signal().get());
    }
}
