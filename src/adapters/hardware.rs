//! Hardware adapter: bridges device drivers to domain port traits.
//!
//! Owns every motor group, the pneumatics module and the limit switches,
//! exposing them through [`SensorPort`] and [`ActuatorPort`].  This is the
//! only module that touches devices; channel numbers come from
//! [`RobotConfig`] and were validated before construction.

use embedded_hal::digital::InputPin;
use log::info;

use crate::app::context::{MotorId, SolenoidPosition};
use crate::app::ports::{ActuatorPort, SensorPort};
use crate::config::RobotConfig;
use crate::drivers::limit_switch::{LimitSwitch, SimInputPin};
use crate::drivers::motor::PwmMotorGroup;
use crate::drivers::pneumatics::Pneumatics;
use crate::error::Result;
use crate::safety::{LimitSnapshot, LimitSwitchId};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P> {
    motors: Vec<PwmMotorGroup>,
    pneumatics: Pneumatics,
    limits: Vec<(LimitSwitchId, LimitSwitch<P>)>,
}

impl<P: InputPin> HardwareAdapter<P> {
    /// `pins` holds one input per switch, in [`LimitSwitchId::ALL`] order.
    pub fn new(config: &RobotConfig, pins: [P; LimitSwitchId::COUNT]) -> Result<Self> {
        let motors = MotorId::ALL
            .iter()
            .map(|&id| PwmMotorGroup::new(id.name(), config.motors.group(id)))
            .collect::<core::result::Result<Vec<_>, _>>()?;

        let limits = LimitSwitchId::ALL
            .into_iter()
            .zip(pins)
            .map(|(id, pin)| (id, LimitSwitch::new(pin, config.limit_switches.switch(id))))
            .collect();

        info!(
            "Hardware up: {} motor groups, {} limit switches, PCM {}",
            MotorId::COUNT,
            LimitSwitchId::COUNT,
            config.pneumatics.pcm
        );

        Ok(Self {
            motors,
            pneumatics: Pneumatics::new(&config.pneumatics),
            limits,
        })
    }

    pub fn motor(&self, id: MotorId) -> &PwmMotorGroup {
        &self.motors[id.index()]
    }

    pub fn pneumatics(&self) -> &Pneumatics {
        &self.pneumatics
    }
}

impl HardwareAdapter<SimInputPin> {
    /// Adapter over in-memory pins, all switches open.  The returned pins
    /// share state with the adapter's.
    pub fn simulated(config: &RobotConfig) -> Result<(Self, [SimInputPin; LimitSwitchId::COUNT])> {
        let pins: [SimInputPin; LimitSwitchId::COUNT] = LimitSwitchId::ALL.map(|id| {
            let open_high = config.limit_switches.switch(id).active_low;
            let pin = SimInputPin::default();
            pin.set_high(open_high);
            pin
        });
        let hw = Self::new(config, pins.clone())?;
        Ok((hw, pins))
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: InputPin> SensorPort for HardwareAdapter<P> {
    fn read_limit_switches(&mut self) -> LimitSnapshot {
        self.limits
            .iter_mut()
            .fold(LimitSnapshot::empty(), |snap, (id, sw)| snap.with(*id, sw.is_triggered()))
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: InputPin> ActuatorPort for HardwareAdapter<P> {
    fn set_motor(&mut self, motor: MotorId, speed: f32) {
        self.motors[motor.index()].set(speed);
    }

    fn set_pistons(&mut self, position: SolenoidPosition) {
        self.pneumatics.set_pistons(position);
    }

    fn set_compressor(&mut self, running: bool) {
        self.pneumatics.set_compressor(running);
    }

    fn all_off(&mut self) {
        for m in &mut self.motors {
            m.stop();
        }
        self.pneumatics.set_pistons(SolenoidPosition::Off);
        self.pneumatics.set_compressor(false);
    }
}
