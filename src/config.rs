//! Motion configuration.
//!
//! Every constant the engines use lives here so a host can retune motion from
//! a TOML file. The defaults are the stock values:
//!
//! ```toml
//! easing = [0.22, 1.0, 0.36, 1.0]
//!
//! [reveal]
//! distance = 30.0
//! duration = 1.0
//! margin_start = "0px"
//! margin_end = "-50px"
//!
//! [text_reveal]
//! distance = 20.0
//! duration = 0.8
//!
//! [clip_reveal]
//! inset = 10.0
//! duration = 1.0
//!
//! [parallax]
//! default_speed = 0.5
//! drift = 100.0
//! settle_distance = 800.0
//! settle_scale = 1.1
//! settle_translate = 40.0
//!
//! [nav]
//! threshold = 100.0
//! duration = 0.4
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MotionError, Result};
use crate::motion::{Easing, DEFAULT_PARALLAX_SPEED};
use crate::types::ViewportMargin;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Cubic-bezier control points shared by every transition
    #[serde(default = "default_easing")]
    pub easing: [f64; 4],
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub text_reveal: TextRevealConfig,
    #[serde(default)]
    pub clip_reveal: ClipRevealConfig,
    #[serde(default)]
    pub parallax: ParallaxConfig,
    #[serde(default)]
    pub nav: NavConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            easing: default_easing(),
            reveal: RevealConfig::default(),
            text_reveal: TextRevealConfig::default(),
            clip_reveal: ClipRevealConfig::default(),
            parallax: ParallaxConfig::default(),
            nav: NavConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Downward offset of hidden content
    #[serde(default = "default_reveal_distance")]
    pub distance: f64,
    #[serde(default = "default_reveal_duration")]
    pub duration: f64,
    /// Top-edge viewport margin
    #[serde(default = "default_margin_start")]
    pub margin_start: String,
    /// Bottom-edge viewport margin (negative shrinks the viewport, so entry
    /// fires once the element is that far inside the true bottom)
    #[serde(default = "default_margin_end")]
    pub margin_end: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            distance: default_reveal_distance(),
            duration: default_reveal_duration(),
            margin_start: default_margin_start(),
            margin_end: default_margin_end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRevealConfig {
    #[serde(default = "default_text_distance")]
    pub distance: f64,
    #[serde(default = "default_text_duration")]
    pub duration: f64,
}

impl Default for TextRevealConfig {
    fn default() -> Self {
        Self {
            distance: default_text_distance(),
            duration: default_text_duration(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRevealConfig {
    /// Starting inset on every side, percent
    #[serde(default = "default_clip_inset")]
    pub inset: f64,
    #[serde(default = "default_clip_duration")]
    pub duration: f64,
}

impl Default for ClipRevealConfig {
    fn default() -> Self {
        Self {
            inset: default_clip_inset(),
            duration: default_clip_duration(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    /// Speed for a `parallax` mode named without one (see `InteractionMode::parse_with`)
    #[serde(default = "default_parallax_speed")]
    pub default_speed: f64,
    /// Element-local drift at speed 1.0
    #[serde(default = "default_parallax_drift")]
    pub drift: f64,
    /// Page offset over which the hero settles
    #[serde(default = "default_settle_distance")]
    pub settle_distance: f64,
    #[serde(default = "default_settle_scale")]
    pub settle_scale: f64,
    #[serde(default = "default_settle_translate")]
    pub settle_translate: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            default_speed: default_parallax_speed(),
            drift: default_parallax_drift(),
            settle_distance: default_settle_distance(),
            settle_scale: default_settle_scale(),
            settle_translate: default_settle_translate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Offset below which the nav is always shown
    #[serde(default = "default_nav_threshold")]
    pub threshold: f64,
    #[serde(default = "default_nav_duration")]
    pub duration: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            threshold: default_nav_threshold(),
            duration: default_nav_duration(),
        }
    }
}

fn default_easing() -> [f64; 4] {
    [0.22, 1.0, 0.36, 1.0]
}

fn default_reveal_distance() -> f64 { 30.0 }
fn default_reveal_duration() -> f64 { 1.0 }
fn default_margin_start() -> String { "0px".to_string() }
fn default_margin_end() -> String { "-50px".to_string() }
fn default_text_distance() -> f64 { 20.0 }
fn default_text_duration() -> f64 { 0.8 }
fn default_clip_inset() -> f64 { 10.0 }
fn default_clip_duration() -> f64 { 1.0 }
fn default_parallax_speed() -> f64 { DEFAULT_PARALLAX_SPEED }
fn default_parallax_drift() -> f64 { 100.0 }
fn default_settle_distance() -> f64 { 800.0 }
fn default_settle_scale() -> f64 { 1.1 }
fn default_settle_translate() -> f64 { 40.0 }
fn default_nav_threshold() -> f64 { 100.0 }
fn default_nav_duration() -> f64 { 0.4 }

impl MotionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No motion config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn easing(&self) -> Easing {
        Easing::from_points(self.easing)
    }

    /// Margin applied to reveal watchers.
    pub fn reveal_margin(&self) -> Result<ViewportMargin> {
        ViewportMargin::parse(&self.reveal.margin_start, &self.reveal.margin_end)
    }

    /// Reject values the engines cannot animate with.
    pub fn validate(&self) -> Result<()> {
        if self.easing.iter().any(|v| !v.is_finite()) {
            return Err(MotionError::Config("easing points must be finite".into()));
        }
        let [x1, _, x2, _] = self.easing;
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(MotionError::Config(format!(
                "easing x coordinates must be within [0, 1], got {x1} and {x2}"
            )));
        }

        let durations = [
            ("reveal.duration", self.reveal.duration),
            ("text_reveal.duration", self.text_reveal.duration),
            ("clip_reveal.duration", self.clip_reveal.duration),
            ("nav.duration", self.nav.duration),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(MotionError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        let finite = [
            ("reveal.distance", self.reveal.distance),
            ("text_reveal.distance", self.text_reveal.distance),
            ("clip_reveal.inset", self.clip_reveal.inset),
            ("parallax.drift", self.parallax.drift),
            ("parallax.settle_scale", self.parallax.settle_scale),
            ("parallax.settle_translate", self.parallax.settle_translate),
            ("nav.threshold", self.nav.threshold),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(MotionError::Config(format!("{name} must be finite")));
            }
        }

        if !self.parallax.default_speed.is_finite() || self.parallax.default_speed < 0.0 {
            return Err(MotionError::Config(
                "parallax.default_speed must be a non-negative number".into(),
            ));
        }
        if !self.parallax.settle_distance.is_finite() || self.parallax.settle_distance <= 0.0 {
            return Err(MotionError::Config(
                "parallax.settle_distance must be positive".into(),
            ));
        }

        self.reveal_margin()?;
        Ok(())
    }
}
