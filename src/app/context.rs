//! Control context threaded through every tick.
//!
//! `ControlContext` is the explicit record that replaces per-device fields
//! scattered across a robot class.  It is owned by the
//! [`TeleopService`](super::service::TeleopService), which in turn is owned
//! by the top-level loop; nothing here is global.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::control::toggle::EdgeToggle;
use crate::input::InputTracker;
use crate::profile::{ControlProfile, MAX_TOGGLES};
use crate::safety::{LimitGuard, LimitSwitchId};

// ---------------------------------------------------------------------------
// Actuator identities
// ---------------------------------------------------------------------------

/// Motor groups.  Every controller in a group receives the same command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MotorId {
    LeftDrive = 0,
    RightDrive = 1,
    BallLauncher = 2,
    BallHand = 3,
    HatchHand = 4,
}

impl MotorId {
    pub const COUNT: usize = 5;
    pub const ALL: [Self; Self::COUNT] = [
        Self::LeftDrive,
        Self::RightDrive,
        Self::BallLauncher,
        Self::BallHand,
        Self::HatchHand,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftDrive => "left_drive",
            Self::RightDrive => "right_drive",
            Self::BallLauncher => "ball_launcher",
            Self::BallHand => "ball_hand",
            Self::HatchHand => "hatch_hand",
        }
    }
}

impl fmt::Display for MotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Double-solenoid valve position.  Both pistons always move together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolenoidPosition {
    #[default]
    Off,
    Forward,
    Reverse,
}

// ---------------------------------------------------------------------------
// Commands (written by bindings; applied at the end of each tick)
// ---------------------------------------------------------------------------

/// A requested motor speed and the switch, if any, that must stay open for
/// it to be applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotorCommand {
    pub speed: f32,
    pub limit: Option<LimitSwitchId>,
}

impl MotorCommand {
    pub const STOP: Self = Self {
        speed: 0.0,
        limit: None,
    };
}

/// Everything the tick wants the hardware to do.  Persists across ticks:
/// an actuator nobody touched this tick keeps its last command and is
/// re-issued with it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActuatorCommands {
    pub motors: [MotorCommand; MotorId::COUNT],
    pub pistons: SolenoidPosition,
    pub compressor: bool,
}

impl ActuatorCommands {
    /// All actuators off.
    pub fn all_off() -> Self {
        Self::default()
    }

    pub fn motor(&self, id: MotorId) -> MotorCommand {
        self.motors[id.index()]
    }

    pub fn set_motor(&mut self, id: MotorId, speed: f32, limit: Option<LimitSwitchId>) {
        self.motors[id.index()] = MotorCommand {
            speed: speed.clamp(-1.0, 1.0),
            limit,
        };
    }
}

// ---------------------------------------------------------------------------
// ControlContext
// ---------------------------------------------------------------------------

pub struct ControlContext {
    /// Active control mapping.
    pub profile: ControlProfile,
    /// Previous controller snapshots for edge detection.
    pub inputs: InputTracker,
    /// One latch per entry in `profile.toggles`, same order.
    pub toggles: heapless::Vec<EdgeToggle, MAX_TOGGLES>,
    /// Requested commands.
    pub commands: ActuatorCommands,
    /// Speeds actually sent last tick, after limit gating.
    pub outputs: [f32; MotorId::COUNT],
    /// Limit switch supervisor.
    pub limits: LimitGuard,
}

impl ControlContext {
    pub fn new(profile: ControlProfile) -> Self {
        let toggles = profile
            .toggles
            .iter()
            .map(|t| EdgeToggle::new(t.initial))
            .collect();
        Self {
            profile,
            inputs: InputTracker::new(),
            toggles,
            commands: ActuatorCommands::all_off(),
            outputs: [0.0; MotorId::COUNT],
            limits: LimitGuard::new(),
        }
    }
}
