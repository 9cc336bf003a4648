//! Motion Engines - Scroll-driven styles for mounted elements
//!
//! Three engines, all mounted against a [`Surface`](crate::pipeline::Surface):
//!
//! - **Reveal** - Fade and slide an element in when it enters the viewport
//! - **Interaction** - One of the preset scroll behaviours (text reveal, clip
//!   reveal, parallax, marquee, sticky progress)
//! - **Nav** - Hide the fixed nav while scrolling down, show it on the way up
//!
//! Plus the shared math they animate with:
//!
//! - **Transition** - Cubic-bezier easing, durations and retargetable tweens
//! - **Mapping** - Clamped range mapping and scroll progress
//!
//! Every engine reads the reduced-motion preference once, at mount. When it is
//! set, or when the surface cannot observe scrolling, the engine renders its
//! final state and subscribes to nothing.

pub mod mapping;
pub mod transition;

mod interaction;
mod nav;
mod reveal;

pub use interaction::*;
pub use mapping::{map_clamped, scroll_progress};
pub use nav::*;
pub use reveal::*;
pub use transition::{Easing, Transition, Tween};
