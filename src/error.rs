//! Unified error types for the robot program.
//!
//! Startup is the only place that can fail: a bad config, a clashing
//! channel, or a device that refuses to come up.  All of those funnel into
//! [`Error`] and are fatal.  Once the control loop is running, per-tick
//! reads and writes are treated as infallible (see [`crate::app::ports`]).

use core::fmt;

use crate::app::ports::ConfigError;
use crate::vision::VisionError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible startup operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A device could not be constructed on its assigned channel.
    Init(InitError),
    /// The camera pipeline could not be started.
    Vision(VisionError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Vision(e) => write!(f, "vision: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

impl From<VisionError> for Error {
    fn from(e: VisionError) -> Self {
        Self::Vision(e)
    }
}

// ---------------------------------------------------------------------------
// Device construction errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// A motor group was configured with no PWM channels.
    EmptyMotorGroup(&'static str),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMotorGroup(name) => write!(f, "motor group '{name}' has no channels"),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
