//! # spark-motion
//!
//! Scroll-orchestrated motion for Rust hosts.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) so engine
//! state can be read reactively as well as sampled per frame.
//!
//! ## Architecture
//!
//! A [`Surface`] owns one scrollable area. The host forwards raw scroll events
//! and ticks one frame at a time; engines mounted against the surface turn the
//! resulting samples and intersection events into [`MotionStyle`]s:
//!
//! ```text
//! host scroll events → ScrollTelemetry (one sample per frame) → parallax, nav
//!                    → IntersectionWatcher (entry/exit)       → reveal, one-shot modes
//! ```
//!
//! Every engine checks the reduced-motion preference once when it mounts. With
//! reduced motion, or without the observation capabilities, engines render
//! their final state and subscribe to nothing.
//!
//! ## Modules
//!
//! - [`types`] - Core types (ElementBounds, ScrollSample, ViewportMargin, MotionStyle, etc.)
//! - [`state`] - Event sources: motion preference, scroll telemetry, intersection watcher
//! - [`motion`] - Reveal, scroll interaction and nav engines, easing and mapping
//! - [`pipeline`] - The per-frame driver
//! - [`config`] - Motion configuration, loadable from TOML
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod motion;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{
    ClipRevealConfig, MotionConfig, NavConfig, ParallaxConfig, RevealConfig, TextRevealConfig,
};

pub use error::{MotionError, Result};

pub use motion::{
    // Math
    map_clamped, scroll_progress, Easing, Transition, Tween,
    // Reveal
    Reveal, RevealListener, RevealProps, RevealState,
    // Scroll interactions
    InteractionMode, ParallaxFrame, ScrollInteraction, DEFAULT_PARALLAX_SPEED,
    // Nav
    NavController, NavListener, NavVisibility,
};

pub use pipeline::{FrameReport, Surface};

pub use state::{
    // Preference
    FixedPreference, MotionPreference, SignalPreference,
    // Telemetry
    SampleCallback, ScrollTelemetry,
    // Intersection
    intersects, IntersectionCallback, IntersectionEvent, IntersectionWatcher, ObserveMode,
};
