//! Frame Pipeline
//!
//! Connects the host's scroll events and frame ticks to the motion engines.
//!
//! # Per-frame Order
//!
//! ```text
//! report_scroll* → frame(time) → telemetry flush → subscribers (parallax, nav)
//!                              → intersection check → watchers (reveal, one-shot modes)
//! ```
//!
//! Engines only compute state inside these callbacks; hosts sample the
//! resulting styles whenever they paint.

pub mod surface;

pub use surface::{FrameReport, Surface};
