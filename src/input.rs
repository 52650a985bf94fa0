//! Gamepad input model.
//!
//! A [`ControllerSnapshot`] is what the driver station reports for one
//! gamepad on one tick: raw levels only, no edges.  [`InputTracker`] keeps
//! the previous snapshot per controller so that press and release edges
//! can be derived locally, whatever the input layer underneath reports.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

/// Logical gamepads.  The USB slot each one occupies comes from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ControllerId {
    Driver = 0,
    Operator = 1,
}

impl ControllerId {
    pub const COUNT: usize = 2;
    pub const ALL: [Self; Self::COUNT] = [Self::Driver, Self::Operator];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Digital buttons on an Xbox-layout gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Button {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    LeftBumper = 4,
    RightBumper = 5,
    Back = 6,
    Start = 7,
    LeftStick = 8,
    RightStick = 9,
}

impl Button {
    pub const COUNT: usize = 10;

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Analog axes, numbered as the driver station numbers raw Xbox axes.
///
/// Sticks report [-1, 1] with up being negative on the Y axes.  Triggers
/// report [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Axis {
    LeftX = 0,
    LeftY = 1,
    LeftTrigger = 2,
    RightTrigger = 3,
    RightX = 4,
    RightY = 5,
}

impl Axis {
    pub const COUNT: usize = 6;

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Hat switch reading: an angle in degrees, or centered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pov(Option<u16>);

impl Pov {
    pub const CENTERED: Self = Self(None);

    /// Build from the driver station's raw value, where `-1` means centered.
    pub fn from_raw(raw: i16) -> Self {
        if raw < 0 {
            Self::CENTERED
        } else {
            Self(Some(raw as u16 % 360))
        }
    }

    pub const fn at(angle: u16) -> Self {
        Self(Some(angle % 360))
    }

    pub const fn angle(self) -> Option<u16> {
        self.0
    }

    pub const fn is_centered(self) -> bool {
        self.0.is_none()
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One tick's worth of raw readings from a single gamepad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSnapshot {
    pub axes: [f32; Axis::COUNT],
    pub buttons: [bool; Button::COUNT],
    pub pov: Pov,
}

impl ControllerSnapshot {
    pub fn axis(&self, axis: Axis) -> f32 {
        self.axes[axis.index()]
    }

    pub fn button(&self, button: Button) -> bool {
        self.buttons[button.index()]
    }

    #[must_use]
    pub fn with_axis(mut self, axis: Axis, value: f32) -> Self {
        self.axes[axis.index()] = value;
        self
    }

    #[must_use]
    pub fn with_button(mut self, button: Button, pressed: bool) -> Self {
        self.buttons[button.index()] = pressed;
        self
    }

    #[must_use]
    pub fn with_pov(mut self, pov: Pov) -> Self {
        self.pov = pov;
        self
    }
}

// ---------------------------------------------------------------------------
// Edge derivation
// ---------------------------------------------------------------------------

/// Current and previous level of one button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    is_pressed: bool,
    prev_is_pressed: bool,
}

impl ButtonState {
    pub const fn is_pressed(self) -> bool {
        self.is_pressed
    }

    /// Released on the previous tick, pressed now.
    pub const fn is_now_pressed(self) -> bool {
        !self.prev_is_pressed && self.is_pressed
    }

    /// Pressed on the previous tick, released now.
    pub const fn is_now_released(self) -> bool {
        self.prev_is_pressed && !self.is_pressed
    }
}

/// A gamepad's current snapshot paired with the one before it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadState {
    pub current: ControllerSnapshot,
    pub previous: ControllerSnapshot,
}

impl GamepadState {
    pub fn button(&self, button: Button) -> ButtonState {
        ButtonState {
            is_pressed: self.current.button(button),
            prev_is_pressed: self.previous.button(button),
        }
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        self.current.axis(axis)
    }

    pub fn pov(&self) -> Pov {
        self.current.pov
    }
}

/// Remembers the last snapshot of every controller.
#[derive(Debug, Default)]
pub struct InputTracker {
    previous: [ControllerSnapshot; ControllerId::COUNT],
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `snapshot` as the latest for `id` and return it paired with
    /// the snapshot from the previous call.
    pub fn update(&mut self, id: ControllerId, snapshot: ControllerSnapshot) -> GamepadState {
        let slot = &mut self.previous[id.index()];
        let state = GamepadState {
            current: snapshot,
            previous: *slot,
        };
        *slot = snapshot;
        state
    }
}
