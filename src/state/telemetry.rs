//! Scroll Telemetry - Per-surface scroll offset stream
//!
//! Raw scroll events are reported as they arrive; once per frame the surface
//! flushes them into at most one [`ScrollSample`]. Subscribers get every
//! emitted sample in emission order.
//!
//! # Guarantees
//!
//! - `previous_offset` of sample N is the `offset` of sample N-1 (0 for the first)
//! - Intra-frame reports coalesce to the latest offset
//! - No sample is emitted when the offset did not change
//! - Every subscriber sees sample N before anyone sees N+1 (reports and
//!   flushes issued from inside a callback wait for the next frame)
//! - A subscriber removed during delivery is not called afterwards
//!
//! # Example
//!
//! ```ignore
//! let telemetry = ScrollTelemetry::new();
//! let unsubscribe = telemetry.subscribe(|sample| {
//!     println!("{} -> {}", sample.previous_offset, sample.offset);
//! })?;
//!
//! telemetry.report(40.0);
//! telemetry.report(120.0);
//! telemetry.flush_frame(0.016); // one sample: 0 -> 120
//!
//! unsubscribe();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::{trace, warn};

use crate::error::{MotionError, Result};
use crate::types::{Cleanup, ScrollSample};

/// Scroll sample callback (Rc so delivery can snapshot the subscriber list).
pub type SampleCallback = Rc<dyn Fn(&ScrollSample)>;

// =============================================================================
// STATE
// =============================================================================

struct TelemetryState {
    available: bool,
    subscribers: Vec<(usize, SampleCallback)>,
    next_id: usize,
    /// Latest raw offset reported since the last flush.
    pending: Option<f64>,
    /// Offset of the last emitted sample.
    last_offset: f64,
    sequence: u64,
    dispatching: bool,
}

impl TelemetryState {
    fn new(available: bool) -> Self {
        Self {
            available,
            subscribers: Vec::new(),
            next_id: 0,
            pending: None,
            last_offset: 0.0,
            sequence: 0,
            dispatching: false,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn is_subscribed(&self, id: usize) -> bool {
        self.subscribers.iter().any(|(sid, _)| *sid == id)
    }
}

/// Clears the dispatching flag even if a subscriber panics.
struct DispatchGuard<'a>(&'a RefCell<TelemetryState>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.borrow_mut().dispatching = false;
    }
}

// =============================================================================
// SCROLL TELEMETRY
// =============================================================================

/// Observable scroll offset of one rendering surface.
///
/// Cloning yields another handle to the same stream.
#[derive(Clone)]
pub struct ScrollTelemetry {
    state: Rc<RefCell<TelemetryState>>,
    current: Signal<Option<ScrollSample>>,
}

impl ScrollTelemetry {
    pub fn new() -> Self {
        Self::with_availability(true)
    }

    /// Telemetry for a host that cannot observe scrolling.
    ///
    /// Reports are still tracked but `subscribe` fails, which makes every
    /// consumer fall back to static rendering.
    pub fn unavailable() -> Self {
        Self::with_availability(false)
    }

    fn with_availability(available: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(TelemetryState::new(available))),
            current: signal(None),
        }
    }

    pub fn is_available(&self) -> bool {
        self.state.borrow().available
    }

    /// Subscribe to every future sample.
    ///
    /// Returns the unsubscribe function. It is safe to call from inside a
    /// sample callback and after the telemetry itself is dropped.
    pub fn subscribe(&self, callback: impl Fn(&ScrollSample) + 'static) -> Result<Cleanup> {
        let id = {
            let mut state = self.state.borrow_mut();
            if !state.available {
                return Err(MotionError::CapabilityUnavailable("scroll telemetry"));
            }
            let id = state.next_id();
            state.subscribers.push((id, Rc::new(callback)));
            id
        };
        trace!(subscriber = id, "scroll telemetry subscribe");

        let weak = Rc::downgrade(&self.state);
        Ok(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                trace!(subscriber = id, "scroll telemetry unsubscribe");
            }
        }))
    }

    /// Record a raw scroll event. Takes effect at the next [`flush_frame`].
    ///
    /// [`flush_frame`]: Self::flush_frame
    pub fn report(&self, offset: f64) {
        if !offset.is_finite() {
            warn!(offset, "dropping non-finite scroll offset");
            return;
        }
        self.state.borrow_mut().pending = Some(offset);
    }

    /// Emit at most one sample for this frame and deliver it to subscribers.
    ///
    /// Returns the emitted sample, or `None` when nothing changed or when
    /// called re-entrantly from a subscriber.
    pub fn flush_frame(&self, time: f64) -> Option<ScrollSample> {
        let (sample, subscribers) = {
            let mut state = self.state.borrow_mut();
            if state.dispatching {
                return None;
            }
            let offset = state.pending.take()?;
            if offset == state.last_offset {
                return None;
            }

            state.sequence += 1;
            let sample = ScrollSample {
                offset,
                previous_offset: state.last_offset,
                sequence: state.sequence,
                time,
            };
            state.last_offset = offset;
            state.dispatching = true;

            let snapshot: Vec<(usize, SampleCallback)> = state
                .subscribers
                .iter()
                .map(|(id, callback)| (*id, callback.clone()))
                .collect();
            (sample, snapshot)
        };

        let _guard = DispatchGuard(&self.state);
        self.current.set(Some(sample));

        for (id, callback) in subscribers {
            // Skip subscribers removed by an earlier callback in this pass
            if self.state.borrow().is_subscribed(id) {
                callback(&sample);
            }
        }

        Some(sample)
    }

    /// Report and flush in one step.
    pub fn scroll_to(&self, offset: f64, time: f64) -> Option<ScrollSample> {
        self.report(offset);
        self.flush_frame(time)
    }

    /// The most recently emitted sample.
    pub fn current(&self) -> Option<ScrollSample> {
        self.current.get()
    }

    /// Reactive view of the most recently emitted sample.
    pub fn current_signal(&self) -> Signal<Option<ScrollSample>> {
        self.current.clone()
    }

    /// Offset of the most recently emitted sample (0 before the first).
    pub fn offset(&self) -> f64 {
        self.state.borrow().last_offset
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }
}

impl Default for ScrollTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder(telemetry: &ScrollTelemetry) -> (Rc<RefCell<Vec<ScrollSample>>>, Cleanup) {
        let samples = Rc::new(RefCell::new(Vec::new()));
        let samples_clone = samples.clone();
        let unsubscribe = telemetry
            .subscribe(move |s| samples_clone.borrow_mut().push(*s))
            .unwrap();
        (samples, unsubscribe)
    }

    #[test]
    fn test_previous_offset_chains() {
        let telemetry = ScrollTelemetry::new();
        let (samples, _unsub) = recorder(&telemetry);

        for (frame, offset) in [30.0, 90.0, 60.0, 400.0, 0.0].into_iter().enumerate() {
            telemetry.scroll_to(offset, frame as f64);
        }

        let samples = samples.borrow();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].previous_offset, 0.0);
        for pair in samples.windows(2) {
            assert_eq!(pair[1].previous_offset, pair[0].offset);
            assert!(pair[1].sequence > pair[0].sequence);
        }
    }

    #[test]
    fn test_intra_frame_reports_coalesce() {
        let telemetry = ScrollTelemetry::new();
        let (samples, _unsub) = recorder(&telemetry);

        telemetry.report(10.0);
        telemetry.report(20.0);
        telemetry.report(35.0);
        let sample = telemetry.flush_frame(1.0).unwrap();

        assert_eq!(sample.offset, 35.0);
        assert_eq!(sample.previous_offset, 0.0);
        assert_eq!(samples.borrow().len(), 1);
    }

    #[test]
    fn test_no_sample_without_change() {
        let telemetry = ScrollTelemetry::new();
        let (samples, _unsub) = recorder(&telemetry);

        assert!(telemetry.flush_frame(0.0).is_none());

        telemetry.scroll_to(50.0, 1.0);
        // Scrolled away and back within one frame
        telemetry.report(80.0);
        telemetry.report(50.0);
        assert!(telemetry.flush_frame(2.0).is_none());

        assert_eq!(samples.borrow().len(), 1);
        assert_eq!(telemetry.offset(), 50.0);
    }

    #[test]
    fn test_multiple_subscribers_each_receive() {
        let telemetry = ScrollTelemetry::new();
        let (a, _ua) = recorder(&telemetry);
        let (b, _ub) = recorder(&telemetry);

        telemetry.scroll_to(10.0, 0.0);
        telemetry.scroll_to(20.0, 1.0);

        assert_eq!(*a.borrow(), *b.borrow());
        assert_eq!(telemetry.subscriber_count(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let telemetry = ScrollTelemetry::new();
        let (samples, unsubscribe) = recorder(&telemetry);

        telemetry.scroll_to(10.0, 0.0);
        unsubscribe();
        telemetry.scroll_to(20.0, 1.0);

        assert_eq!(samples.borrow().len(), 1);
        assert_eq!(telemetry.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_other_during_delivery() {
        let telemetry = ScrollTelemetry::new();
        let victim_calls = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));

        let slot_clone = slot.clone();
        let _first = telemetry
            .subscribe(move |_| {
                if let Some(unsub) = slot_clone.borrow_mut().take() {
                    unsub();
                }
            })
            .unwrap();

        let calls = victim_calls.clone();
        let victim = telemetry
            .subscribe(move |_| calls.set(calls.get() + 1))
            .unwrap();
        *slot.borrow_mut() = Some(victim);

        telemetry.scroll_to(10.0, 0.0);
        telemetry.scroll_to(20.0, 1.0);

        assert_eq!(victim_calls.get(), 0);
        assert_eq!(telemetry.subscriber_count(), 1);
    }

    #[test]
    fn test_reentrant_report_waits_for_next_frame() {
        let telemetry = ScrollTelemetry::new();
        let inner = telemetry.clone();
        let _echo = telemetry
            .subscribe(move |s| {
                if s.offset < 100.0 {
                    inner.report(s.offset + 100.0);
                    assert!(inner.flush_frame(s.time).is_none());
                }
            })
            .unwrap();
        let (samples, _unsub) = recorder(&telemetry);

        telemetry.scroll_to(10.0, 0.0);
        assert_eq!(samples.borrow().len(), 1);

        telemetry.flush_frame(1.0);
        let samples = samples.borrow();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].offset, 110.0);
        assert_eq!(samples[1].previous_offset, 10.0);
    }

    #[test]
    fn test_non_finite_offsets_dropped() {
        let telemetry = ScrollTelemetry::new();
        telemetry.report(f64::NAN);
        telemetry.report(f64::INFINITY);
        assert!(telemetry.flush_frame(0.0).is_none());
        assert!(telemetry.current().is_none());
    }

    #[test]
    fn test_current_tracks_latest_sample() {
        let telemetry = ScrollTelemetry::new();
        telemetry.scroll_to(75.0, 0.5);

        let current = telemetry.current().unwrap();
        assert_eq!(current.offset, 75.0);
        assert_eq!(current.sequence, 1);
        assert_eq!(telemetry.current_signal().get(), Some(current));
    }

    #[test]
    fn test_unavailable_rejects_subscribe() {
        let telemetry = ScrollTelemetry::unavailable();
        assert!(!telemetry.is_available());
        assert!(matches!(
            telemetry.subscribe(|_| {}),
            Err(MotionError::CapabilityUnavailable(_))
        ));
        assert_eq!(telemetry.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_after_drop_is_noop() {
        let telemetry = ScrollTelemetry::new();
        let unsubscribe = telemetry.subscribe(|_| {}).unwrap();
        drop(telemetry);
        unsubscribe();
    }
}
