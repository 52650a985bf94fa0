//! Outbound application events.
//!
//! The [`TeleopService`](super::service::TeleopService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::app::context::{MotorId, SolenoidPosition};
use crate::safety::LimitSwitchId;

/// Whether the control loop is driving actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotMode {
    Disabled,
    Teleop,
}

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The robot was enabled or disabled.
    ModeChanged { from: RobotMode, to: RobotMode },

    /// A limit switch closed or opened.
    LimitChanged { id: LimitSwitchId, triggered: bool },

    /// A latched toggle flipped.  `index` is its position in the profile.
    ToggleFlipped { index: usize, on: bool },

    /// A new control profile was installed.
    ProfileLoaded(String),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub mode: RobotMode,
    pub tick: u64,
    /// Speeds sent to each motor group, indexed by [`MotorId::index`].
    pub outputs: [f32; MotorId::COUNT],
    pub pistons: SolenoidPosition,
    pub compressor: bool,
    /// Triggered limit switches as a bitmask of [`LimitSwitchId::mask`].
    pub limit_flags: u8,
}

impl TelemetryData {
    pub fn output(&self, motor: MotorId) -> f32 {
        self.outputs[motor.index()]
    }
}
