use thiserror::Error;

use crate::types::ElementId;

#[derive(Error, Debug)]
pub enum MotionError {
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(&'static str),

    #[error("Element {0} already has an active intersection watcher")]
    AlreadyObserved(ElementId),

    #[error("Invalid viewport margin: {0:?}")]
    InvalidMargin(String),

    #[error("Unknown interaction mode: {0:?}")]
    UnknownMode(String),

    #[error("Invalid parallax speed: {0}")]
    InvalidSpeed(f64),

    #[error("Invalid reveal delay: {0}")]
    InvalidDelay(f64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MotionError>;
