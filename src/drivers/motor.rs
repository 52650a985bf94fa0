//! PWM speed controller group.
//!
//! Every channel in a group receives the same command.  Speed in [-1, 1] is
//! mapped to a standard servo pulse: 1000 µs full reverse, 1500 µs neutral,
//! 2000 µs full forward.
//!
//! ## Dual-target design
//!
//! The pulse generator belongs to the robot controller's firmware; this
//! driver keeps the last commanded pulse per channel in memory so the host
//! build and the tests can observe it.

use log::debug;

use crate::config::{MAX_GROUP_SIZE, MotorGroupConfig};
use crate::error::InitError;

pub const NEUTRAL_PULSE_US: u16 = 1500;
pub const PULSE_RANGE_US: u16 = 500;

/// Map a speed in [-1, 1] to a pulse width in microseconds.
pub fn pulse_width_us(speed: f32) -> u16 {
    let speed = if speed.is_finite() { speed.clamp(-1.0, 1.0) } else { 0.0 };
    (f32::from(NEUTRAL_PULSE_US) + speed * f32::from(PULSE_RANGE_US)).round() as u16
}

#[derive(Debug, Clone)]
pub struct PwmMotorGroup {
    channels: heapless::Vec<u8, MAX_GROUP_SIZE>,
    inverted: bool,
    speed: f32,
    pulses: [u16; MAX_GROUP_SIZE],
}

impl PwmMotorGroup {
    pub fn new(name: &'static str, config: &MotorGroupConfig) -> Result<Self, InitError> {
        if config.channels.is_empty() {
            return Err(InitError::EmptyMotorGroup(name));
        }
        debug!(
            "Motor '{}': {:?} on PWM {:?}{}",
            name,
            config.kind,
            config.channels.as_slice(),
            if config.inverted { " (inverted)" } else { "" }
        );
        Ok(Self {
            channels: config.channels.clone(),
            inverted: config.inverted,
            speed: 0.0,
            pulses: [NEUTRAL_PULSE_US; MAX_GROUP_SIZE],
        })
    }

    /// Command every controller in the group.  Non-finite input stops it.
    pub fn set(&mut self, speed: f32) {
        let speed = if speed.is_finite() { speed.clamp(-1.0, 1.0) } else { 0.0 };
        let out = if self.inverted { -speed } else { speed };
        let pulse = pulse_width_us(out);
        for slot in &mut self.pulses[..self.channels.len()] {
            *slot = pulse;
        }
        self.speed = speed;
    }

    pub fn stop(&mut self) {
        self.set(0.0);
    }

    /// Last commanded speed, before inversion.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// (channel, pulse width) for each controller in the group.
    pub fn pulses(&self) -> impl Iterator<Item = (u8, u16)> + '_ {
        self.channels.iter().copied().zip(self.pulses.iter().copied())
    }
}
