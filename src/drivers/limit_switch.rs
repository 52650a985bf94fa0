//! Limit switch inputs over `embedded-hal` digital pins.
//!
//! A pin that cannot be read counts as triggered: the mechanism it guards
//! stops rather than driving blind into its hard stop.

use core::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{ErrorType, InputPin};
use log::warn;

use crate::config::LimitSwitchConfig;

pub struct LimitSwitch<P> {
    pin: P,
    active_low: bool,
    faulted: bool,
}

impl<P: InputPin> LimitSwitch<P> {
    pub fn new(pin: P, config: LimitSwitchConfig) -> Self {
        Self {
            pin,
            active_low: config.active_low,
            faulted: false,
        }
    }

    pub fn is_triggered(&mut self) -> bool {
        let level = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        match level {
            Ok(closed) => {
                self.faulted = false;
                closed
            }
            Err(_) => {
                if !self.faulted {
                    warn!("Limit switch read failed, treating as triggered");
                    self.faulted = true;
                }
                true
            }
        }
    }
}

/// In-memory digital input for the host build and tests.  Clones share the
/// same line, so a test can hold one end while the adapter owns the other.
#[derive(Debug, Clone, Default)]
pub struct SimInputPin(Arc<AtomicBool>);

impl SimInputPin {
    /// A line pulled high, as an open pull-up switch reads.
    pub fn pulled_up() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn set_high(&self, high: bool) {
        self.0.store(high, Ordering::Relaxed);
    }
}

impl ErrorType for SimInputPin {
    type Error = Infallible;
}

impl InputPin for SimInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.load(Ordering::Relaxed))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.load(Ordering::Relaxed))
    }
}
