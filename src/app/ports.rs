//! Port traits: the hexagonal boundary between control logic and devices.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TeleopService (domain)
//! ```
//!
//! Driven adapters (gamepads, motor controllers, solenoids, limit switches,
//! event sinks, config storage) implement these traits.  The
//! [`TeleopService`](super::service::TeleopService) consumes them via
//! generics, so the control core never touches hardware directly.
//!
//! ## Failure model
//!
//! Per-tick calls on [`ControllerPort`], [`SensorPort`] and [`ActuatorPort`]
//! are infallible by contract.  Device faults belong to construction time,
//! where they are fatal.  An adapter whose device *can* fail mid-match must
//! resolve the failure itself (log it and report the safe value) rather
//! than hand an error to the control loop.

use core::fmt;

use crate::app::context::{MotorId, SolenoidPosition};
use crate::config::RobotConfig;
use crate::input::{ControllerId, ControllerSnapshot};
use crate::safety::LimitSnapshot;

// ───────────────────────────────────────────────────────────────
// Controller port (driven adapter: driver station → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for gamepads.
pub trait ControllerPort {
    /// Sample every axis, button and the hat of one gamepad.  A gamepad
    /// that is not plugged in reads as all-neutral.
    fn snapshot(&mut self, id: ControllerId) -> ControllerSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for robot sensors.
pub trait SensorPort {
    /// Sample every limit switch.
    fn read_limit_switches(&mut self) -> LimitSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port.  Every call is idempotent: issuing the same command
/// twice leaves the device exactly as issuing it once.
pub trait ActuatorPort {
    /// Set a motor group's speed in [-1, 1].
    fn set_motor(&mut self, motor: MotorId, speed: f32);

    /// Move both double solenoids.
    fn set_pistons(&mut self, position: SolenoidPosition);

    /// `true`: start the compressor with closed-loop pressure control.
    /// `false`: stop it and disable closed-loop control.
    fn set_compressor(&mut self, running: bool);

    /// Stop every motor, release the solenoids, stop the compressor.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists robot configuration.
///
/// Implementations MUST call [`RobotConfig::validate`] before handing a
/// config out of `load` and before persisting in `save`.  Invalid wiring
/// is rejected, never silently corrected.
pub trait ConfigPort {
    /// Load configuration.  [`ConfigError::NotFound`] when nothing has been
    /// stored yet; the caller decides whether defaults are acceptable.
    fn load(&self) -> Result<RobotConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &RobotConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations and config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage.
    NotFound,
    /// Stored config could not be parsed.
    Corrupted,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Two devices of the same kind share a channel.
    DuplicateChannel { kind: &'static str, channel: u8 },
    /// A channel is beyond what the hardware provides.
    ChannelOutOfRange { kind: &'static str, channel: u8 },
    /// Generic I/O error from the storage backend.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::DuplicateChannel { kind, channel } => {
                write!(f, "{} channel {} assigned twice", kind, channel)
            }
            Self::ChannelOutOfRange { kind, channel } => {
                write!(f, "{} channel {} out of range", kind, channel)
            }
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
