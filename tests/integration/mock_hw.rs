//! Mock adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real devices.

use hatchbot::app::context::{MotorId, SolenoidPosition};
use hatchbot::app::events::AppEvent;
use hatchbot::app::ports::{ActuatorPort, ControllerPort, EventSink, SensorPort};
use hatchbot::input::{ControllerId, ControllerSnapshot};
use hatchbot::safety::{LimitSnapshot, LimitSwitchId};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetMotor { motor: MotorId, speed: f32 },
    SetPistons(SolenoidPosition),
    SetCompressor(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub limits: LimitSnapshot,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            limits: LimitSnapshot::empty(),
        }
    }

    pub fn set_limit(&mut self, id: LimitSwitchId, triggered: bool) {
        self.limits = self.limits.with(id, triggered);
    }

    /// Last speed written to `motor`, `AllOff` counting as 0.
    pub fn motor(&self, motor: MotorId) -> f32 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match *c {
                ActuatorCall::SetMotor { motor: m, speed } if m == motor => Some(speed),
                ActuatorCall::AllOff => Some(0.0),
                _ => None,
            })
            .unwrap_or(0.0)
    }

    pub fn pistons(&self) -> SolenoidPosition {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match *c {
                ActuatorCall::SetPistons(p) => Some(p),
                ActuatorCall::AllOff => Some(SolenoidPosition::Off),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn compressor(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match *c {
                ActuatorCall::SetCompressor(on) => Some(on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for MockHardware {
    fn set_motor(&mut self, motor: MotorId, speed: f32) {
        self.calls.push(ActuatorCall::SetMotor { motor, speed });
    }

    fn set_pistons(&mut self, position: SolenoidPosition) {
        self.calls.push(ActuatorCall::SetPistons(position));
    }

    fn set_compressor(&mut self, running: bool) {
        self.calls.push(ActuatorCall::SetCompressor(running));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

impl SensorPort for MockHardware {
    fn read_limit_switches(&mut self) -> LimitSnapshot {
        self.limits
    }
}

// ── MockPads ──────────────────────────────────────────────────

/// Gamepads whose snapshots the test sets directly.
#[derive(Default)]
pub struct MockPads {
    pub pads: [ControllerSnapshot; ControllerId::COUNT],
}

#[allow(dead_code)]
impl MockPads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: ControllerId, snap: ControllerSnapshot) {
        self.pads[id.index()] = snap;
    }

    pub fn operator(&mut self, snap: ControllerSnapshot) {
        self.set(ControllerId::Operator, snap);
    }
}

impl ControllerPort for MockPads {
    fn snapshot(&mut self, id: ControllerId) -> ControllerSnapshot {
        self.pads[id.index()]
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
