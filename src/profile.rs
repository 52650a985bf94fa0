//! Control profiles: the table that maps gamepad input to actuator effects.
//!
//! A profile is plain data.  The [`TeleopService`] walks it once per tick:
//!
//! ```text
//!   drive scheme ──▶ axis bindings ──▶ button/POV bindings ──▶ toggles
//!                    (later entries override earlier ones per actuator)
//! ```
//!
//! Three presets cover the robot's history: a single-joystick split drive,
//! a momentary-button layout, and the competition layout with limit
//! switches and a latched compressor.  Any of them can be dumped to JSON,
//! edited, and loaded back through the config file.
//!
//! [`TeleopService`]: crate::app::service::TeleopService

use serde::{Deserialize, Serialize};

use crate::app::context::{MotorId, SolenoidPosition};
use crate::control::deadzone::{DeadZone, DeadZonePolicy};
use crate::control::drive::{AxisSource, DriveScheme};
use crate::input::{Axis, Button, ControllerId, GamepadState};
use crate::safety::LimitSwitchId;

pub const MAX_BINDINGS: usize = 24;
pub const MAX_AXIS_BINDINGS: usize = 4;
pub const MAX_TOGGLES: usize = 4;

// ---------------------------------------------------------------------------
// Table entries
// ---------------------------------------------------------------------------

/// Input condition that fires a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// Rising edge.
    Pressed(Button),
    /// Falling edge.
    Released(Button),
    /// Every tick the button is down.
    Held(Button),
    /// Hat at exactly this angle.
    PovAt(u16),
    /// Hat released.
    PovCentered,
    /// Hat at any angle.
    PovActive,
}

impl Trigger {
    pub fn fires(&self, pad: &GamepadState) -> bool {
        match *self {
            Self::Pressed(b) => pad.button(b).is_now_pressed(),
            Self::Released(b) => pad.button(b).is_now_released(),
            Self::Held(b) => pad.button(b).is_pressed(),
            Self::PovAt(angle) => pad.pov().angle() == Some(angle % 360),
            Self::PovCentered => pad.pov().is_centered(),
            Self::PovActive => !pad.pov().is_centered(),
        }
    }
}

/// What a fired binding does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Command a motor group.  When `limit` is set, the command is held at
    /// zero while that switch is triggered.
    Motor {
        motor: MotorId,
        speed: f32,
        #[serde(default)]
        limit: Option<LimitSwitchId>,
    },
    /// Move both pistons.
    Pistons(SolenoidPosition),
    /// Start (with closed-loop pressure control) or stop the compressor.
    Compressor(bool),
}

impl Effect {
    pub const fn motor(motor: MotorId, speed: f32) -> Self {
        Self::Motor {
            motor,
            speed,
            limit: None,
        }
    }

    pub const fn guarded(motor: MotorId, speed: f32, limit: LimitSwitchId) -> Self {
        Self::Motor {
            motor,
            speed,
            limit: Some(limit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub controller: ControllerId,
    pub trigger: Trigger,
    pub effect: Effect,
}

/// Analog passthrough from an axis to a motor.  Several bindings on the
/// same motor are summed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBinding {
    pub controller: ControllerId,
    pub axis: Axis,
    pub motor: MotorId,
    pub scale: f32,
    /// Apply the profile's dead zone to this axis.
    #[serde(default)]
    pub gated: bool,
}

/// Device a latched toggle drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleTarget {
    /// On = running under closed-loop control.
    Compressor,
    /// On = forward, off = reverse.
    Pistons,
}

impl ToggleTarget {
    pub fn effect(self, on: bool) -> Effect {
        match self {
            Self::Compressor => Effect::Compressor(on),
            Self::Pistons => Effect::Pistons(if on {
                SolenoidPosition::Forward
            } else {
                SolenoidPosition::Reverse
            }),
        }
    }
}

/// A button that flips a latched state on each press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleBinding {
    pub controller: ControllerId,
    pub button: Button,
    pub initial: bool,
    pub target: ToggleTarget,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlProfile {
    pub name: String,
    pub dead_zone: DeadZone,
    #[serde(default)]
    pub dead_zone_policy: DeadZonePolicy,
    pub drive_controller: ControllerId,
    pub drive: DriveScheme,
    #[serde(default)]
    pub axis_bindings: heapless::Vec<AxisBinding, MAX_AXIS_BINDINGS>,
    #[serde(default)]
    pub bindings: heapless::Vec<Binding, MAX_BINDINGS>,
    #[serde(default)]
    pub toggles: heapless::Vec<ToggleBinding, MAX_TOGGLES>,
}

const fn on(trigger: Trigger, effect: Effect) -> Binding {
    Binding {
        controller: ControllerId::Operator,
        trigger,
        effect,
    }
}

fn operator_tank() -> DriveScheme {
    DriveScheme::Tank {
        left: AxisSource::inverted(Axis::LeftY),
        right: AxisSource::inverted(Axis::RightY),
        gated: false,
        squared: true,
    }
}

impl ControlProfile {
    /// One joystick: Y drives straight, X spins in place, 0.3 dead zone.
    pub fn single_stick() -> Self {
        Self {
            name: "single-stick".into(),
            dead_zone: DeadZone::new(0.3),
            dead_zone_policy: DeadZonePolicy::Zero,
            drive_controller: ControllerId::Operator,
            drive: DriveScheme::Split {
                forward: AxisSource::new(Axis::LeftY),
                turn: AxisSource::new(Axis::LeftX),
            },
            axis_bindings: heapless::Vec::new(),
            bindings: heapless::Vec::new(),
            toggles: heapless::Vec::new(),
        }
    }

    /// Tank drive with every mechanism on press/release edges.  Triggers
    /// spin the launcher, the compressor runs while B is held.
    ///
    /// Both trigger bindings target the launcher and are summed, so right
    /// and left together cancel out instead of the later one winning.
    pub fn momentary() -> Self {
        use Button::{A, B, X, Y};
        use Trigger::{PovAt, PovCentered, Pressed, Released};

        let launcher = |axis, scale| AxisBinding {
            controller: ControllerId::Operator,
            axis,
            motor: MotorId::BallLauncher,
            scale,
            gated: false,
        };

        Self {
            name: "momentary".into(),
            dead_zone: DeadZone::new(0.3),
            dead_zone_policy: DeadZonePolicy::Zero,
            drive_controller: ControllerId::Operator,
            drive: operator_tank(),
            axis_bindings: [
                launcher(Axis::RightTrigger, -1.0),
                launcher(Axis::LeftTrigger, 1.0),
            ]
            .into_iter()
            .collect(),
            bindings: [
                on(Pressed(A), Effect::Pistons(SolenoidPosition::Forward)),
                on(Released(A), Effect::Pistons(SolenoidPosition::Reverse)),
                on(Pressed(B), Effect::Compressor(true)),
                on(Released(B), Effect::Compressor(false)),
                on(Pressed(Y), Effect::motor(MotorId::BallHand, 0.5)),
                on(Released(Y), Effect::motor(MotorId::BallHand, 0.0)),
                on(Pressed(X), Effect::motor(MotorId::BallHand, -0.5)),
                on(Released(X), Effect::motor(MotorId::BallHand, 0.0)),
                on(PovAt(0), Effect::motor(MotorId::HatchHand, 0.5)),
                on(PovAt(180), Effect::motor(MotorId::HatchHand, -0.5)),
                on(PovCentered, Effect::motor(MotorId::HatchHand, 0.0)),
            ]
            .into_iter()
            .collect(),
            toggles: heapless::Vec::new(),
        }
    }

    /// Competition layout: bumpers run the launcher, A works the pistons,
    /// B latches the compressor (on at boot), Y/X and the hat drive the
    /// arms at full speed up to their limit switches.
    pub fn competition() -> Self {
        use Button::{A, B, LeftBumper, RightBumper, X, Y};
        use LimitSwitchId::{BallBack, BallFront, HatchBack, HatchFront};
        use Trigger::{Held, PovAt, PovCentered, Pressed, Released};

        Self {
            name: "competition".into(),
            dead_zone: DeadZone::new(0.3),
            dead_zone_policy: DeadZonePolicy::Zero,
            drive_controller: ControllerId::Operator,
            drive: operator_tank(),
            axis_bindings: heapless::Vec::new(),
            bindings: [
                on(Pressed(LeftBumper), Effect::motor(MotorId::BallLauncher, -0.3)),
                on(Released(LeftBumper), Effect::motor(MotorId::BallLauncher, 0.0)),
                on(Pressed(RightBumper), Effect::motor(MotorId::BallLauncher, 1.0)),
                on(Released(RightBumper), Effect::motor(MotorId::BallLauncher, 0.0)),
                on(Pressed(A), Effect::Pistons(SolenoidPosition::Forward)),
                on(Released(A), Effect::Pistons(SolenoidPosition::Reverse)),
                on(Held(Y), Effect::guarded(MotorId::BallHand, 1.0, BallFront)),
                on(Held(X), Effect::guarded(MotorId::BallHand, -1.0, BallBack)),
                on(Released(X), Effect::motor(MotorId::BallHand, 0.0)),
                on(Released(Y), Effect::motor(MotorId::BallHand, 0.0)),
                on(PovAt(0), Effect::guarded(MotorId::HatchHand, 1.0, HatchFront)),
                on(PovAt(180), Effect::guarded(MotorId::HatchHand, -1.0, HatchBack)),
                on(PovCentered, Effect::motor(MotorId::HatchHand, 0.0)),
            ]
            .into_iter()
            .collect(),
            toggles: [ToggleBinding {
                controller: ControllerId::Operator,
                button: B,
                initial: true,
                target: ToggleTarget::Compressor,
            }]
            .into_iter()
            .collect(),
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "single-stick" => Some(Self::single_stick()),
            "momentary" => Some(Self::momentary()),
            "competition" => Some(Self::competition()),
            _ => None,
        }
    }

    /// Every speed and scale in the table must lie in [-1, 1].
    pub fn speeds_in_range(&self) -> bool {
        let ok = |v: f32| (-1.0..=1.0).contains(&v);
        self.bindings.iter().all(|b| match b.effect {
            Effect::Motor { speed, .. } => ok(speed),
            _ => true,
        }) && self.axis_bindings.iter().all(|a| ok(a.scale))
    }
}

impl Default for ControlProfile {
    fn default() -> Self {
        Self::competition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ControllerSnapshot, Pov};

    fn pad(prev: ControllerSnapshot, cur: ControllerSnapshot) -> GamepadState {
        GamepadState {
            current: cur,
            previous: prev,
        }
    }

    #[test]
    fn presets_fit_and_are_in_range() {
        for name in ["single-stick", "momentary", "competition"] {
            let p = ControlProfile::preset(name).unwrap();
            assert_eq!(p.name, name);
            assert!(p.speeds_in_range(), "{name}");
        }
        assert!(ControlProfile::preset("nope").is_none());
    }

    #[test]
    fn triggers_fire_on_expected_edges() {
        let up = ControllerSnapshot::default();
        let down = up.with_button(Button::X, true);

        assert!(Trigger::Pressed(Button::X).fires(&pad(up, down)));
        assert!(!Trigger::Pressed(Button::X).fires(&pad(down, down)));
        assert!(Trigger::Held(Button::X).fires(&pad(down, down)));
        assert!(Trigger::Released(Button::X).fires(&pad(down, up)));
        assert!(!Trigger::Released(Button::X).fires(&pad(up, up)));
    }

    #[test]
    fn pov_triggers() {
        let centered = ControllerSnapshot::default();
        let up = centered.with_pov(Pov::at(0));
        assert!(Trigger::PovCentered.fires(&pad(centered, centered)));
        assert!(Trigger::PovAt(0).fires(&pad(centered, up)));
        assert!(Trigger::PovAt(360).fires(&pad(centered, up)));
        assert!(!Trigger::PovAt(180).fires(&pad(centered, up)));
        assert!(Trigger::PovActive.fires(&pad(centered, up)));
    }

    #[test]
    fn json_roundtrip() {
        let p = ControlProfile::competition();
        let json = serde_json::to_string_pretty(&p).unwrap();
        let p2: ControlProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(p, p2);
    }

    #[test]
    fn out_of_range_speed_is_detected() {
        let mut p = ControlProfile::single_stick();
        p.bindings
            .push(on(Trigger::Held(Button::A), Effect::motor(MotorId::HatchHand, 1.5)))
            .unwrap();
        assert!(!p.speeds_in_range());
    }
}
