//! State Module - Event sources and capabilities
//!
//! The inputs every motion engine consumes:
//!
//! - **Preference** - Reduced-motion capability, read once per mount
//! - **Telemetry** - Per-surface scroll sample stream
//! - **Intersection** - Per-element viewport entry detection

mod intersection;
mod preference;
mod telemetry;

pub use intersection::*;
pub use preference::*;
pub use telemetry::*;
