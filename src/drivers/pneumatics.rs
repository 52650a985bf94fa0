//! Pneumatics control module: two double solenoids and the compressor.
//!
//! The compressor runs under the module's closed-loop pressure switch when
//! started and is fully off when stopped.  Commands are idempotent and only
//! state changes are logged.

use log::info;

use crate::app::context::SolenoidPosition;
use crate::config::PneumaticsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleSolenoid {
    forward: u8,
    reverse: u8,
    position: SolenoidPosition,
}

impl DoubleSolenoid {
    pub fn new(forward: u8, reverse: u8) -> Self {
        Self {
            forward,
            reverse,
            position: SolenoidPosition::Off,
        }
    }

    pub fn set(&mut self, position: SolenoidPosition) {
        self.position = position;
    }

    pub fn position(&self) -> SolenoidPosition {
        self.position
    }

    /// Energised state of the (forward, reverse) coils.
    pub fn coils(&self) -> (bool, bool) {
        match self.position {
            SolenoidPosition::Off => (false, false),
            SolenoidPosition::Forward => (true, false),
            SolenoidPosition::Reverse => (false, true),
        }
    }

    pub fn channels(&self) -> (u8, u8) {
        (self.forward, self.reverse)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compressor {
    running: bool,
    closed_loop: bool,
}

impl Compressor {
    pub fn start(&mut self) {
        self.running = true;
        self.closed_loop = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.closed_loop = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn closed_loop(&self) -> bool {
        self.closed_loop
    }
}

pub struct Pneumatics {
    module: u8,
    pistons: [DoubleSolenoid; 2],
    compressor: Compressor,
}

impl Pneumatics {
    pub fn new(config: &PneumaticsConfig) -> Self {
        let [(a_fwd, a_rev), (b_fwd, b_rev)] = config.pistons;
        Self {
            module: config.pcm,
            pistons: [DoubleSolenoid::new(a_fwd, a_rev), DoubleSolenoid::new(b_fwd, b_rev)],
            compressor: Compressor::default(),
        }
    }

    /// Move both pistons together.
    pub fn set_pistons(&mut self, position: SolenoidPosition) {
        if self.pistons[0].position() != position {
            info!("PCM {} | pistons -> {:?}", self.module, position);
        }
        for p in &mut self.pistons {
            p.set(position);
        }
    }

    pub fn set_compressor(&mut self, running: bool) {
        if self.compressor.is_running() == running {
            return;
        }
        if running {
            self.compressor.start();
        } else {
            self.compressor.stop();
        }
        info!("PCM {} | compressor {}", self.module, if running { "ON" } else { "OFF" });
    }

    pub fn pistons(&self) -> &[DoubleSolenoid; 2] {
        &self.pistons
    }

    pub fn compressor(&self) -> Compressor {
        self.compressor
    }
}
