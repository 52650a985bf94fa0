//! Drivetrain mapping: stick readings to left/right side commands.
//!
//! | Scheme  | Left side       | Right side      |
//! |---------|-----------------|-----------------|
//! | Tank    | `left` axis     | `-right` axis   |
//! | Split   | vertical: `-y`  | vertical: `y`   |
//! |         | spin: `x`       | spin: `x`       |
//!
//! Both schemes assume the right gearbox is mounted mirrored, so equal
//! signs on both sides spin the robot in place and opposite signs drive it
//! straight.  Tank sides may also be shaped: a 0.02 deadband rescaled to
//! the full range, then squared with the sign kept, for finer control at
//! low speed.

use serde::{Deserialize, Serialize};

use super::deadzone::{DeadZone, DeadZonePolicy};
use crate::input::{Axis, ControllerSnapshot};

/// An axis, optionally sign-flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSource {
    pub axis: Axis,
    #[serde(default)]
    pub inverted: bool,
}

impl AxisSource {
    pub const fn new(axis: Axis) -> Self {
        Self {
            axis,
            inverted: false,
        }
    }

    pub const fn inverted(axis: Axis) -> Self {
        Self {
            axis,
            inverted: true,
        }
    }

    pub fn read(&self, pad: &ControllerSnapshot) -> f32 {
        let v = pad.axis(self.axis);
        if self.inverted { -v } else { v }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveScheme {
    /// One axis per side, the right one negated for the mirrored gearbox.
    /// With `gated`, each side is dead-zone filtered on its own.  With
    /// `squared` (the default), each side goes through [`shape_tank_input`].
    Tank {
        left: AxisSource,
        right: AxisSource,
        #[serde(default)]
        gated: bool,
        #[serde(default = "squared_by_default")]
        squared: bool,
    },
    /// One stick: `forward` drives straight, `turn` spins in place.
    /// When both are deflected, forward wins.
    Split { forward: AxisSource, turn: AxisSource },
}

/// Side commands for one tick.  `None` leaves that side's previous
/// command in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveOutput {
    pub left: Option<f32>,
    pub right: Option<f32>,
}

impl DriveOutput {
    fn sides(left: f32, right: f32) -> Self {
        Self {
            left: Some(left.clamp(-1.0, 1.0)),
            right: Some(right.clamp(-1.0, 1.0)),
        }
    }
}

/// Drive straight: left side runs reversed relative to the right.
pub fn vertical(value: f32) -> DriveOutput {
    DriveOutput::sides(-value, value)
}

/// Spin in place.
pub fn horizontal(value: f32) -> DriveOutput {
    DriveOutput::sides(value, value)
}

/// Stick travel below this reads as zero in a shaped tank side.
pub const TANK_DEADBAND: f32 = 0.02;

fn squared_by_default() -> bool {
    true
}

/// Deadband, rescale what is left to the full range, then square keeping
/// the sign.  Full deflection stays at 1.0.
pub fn shape_tank_input(value: f32) -> f32 {
    let v = value.clamp(-1.0, 1.0);
    if v.abs() <= TANK_DEADBAND {
        return 0.0;
    }
    let v = (v - TANK_DEADBAND.copysign(v)) / (1.0 - TANK_DEADBAND);
    v * v.abs()
}

fn inactive(policy: DeadZonePolicy) -> Option<f32> {
    match policy {
        DeadZonePolicy::Hold => None,
        DeadZonePolicy::Zero => Some(0.0),
    }
}

impl DriveScheme {
    /// Map one snapshot to side commands.  A single pass, no waiting: if
    /// the stick is inside the dead zone this tick, `policy` decides.
    pub fn evaluate(
        &self,
        pad: &ControllerSnapshot,
        dead_zone: &DeadZone,
        policy: DeadZonePolicy,
    ) -> DriveOutput {
        match *self {
            Self::Tank {
                left,
                right,
                gated,
                squared,
            } => {
                let side = |v: f32| {
                    let v = if gated { dead_zone.gate(v) } else { Some(v) };
                    match v {
                        Some(v) if squared => Some(shape_tank_input(v)),
                        Some(v) => Some(v.clamp(-1.0, 1.0)),
                        None => inactive(policy),
                    }
                };
                DriveOutput {
                    left: side(left.read(pad)),
                    right: side(-right.read(pad)),
                }
            }
            Self::Split { forward, turn } => {
                let mut out = None;
                if let Some(x) = dead_zone.gate(turn.read(pad)) {
                    out = Some(horizontal(x));
                }
                if let Some(y) = dead_zone.gate(forward.read(pad)) {
                    out = Some(vertical(y));
                }
                out.unwrap_or_else(|| {
                    let v = inactive(policy);
                    DriveOutput { left: v, right: v }
                })
            }
        }
    }
}
