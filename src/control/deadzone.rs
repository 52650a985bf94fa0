//! Stick dead zone.
//!
//! Small deflections around center are treated as "no intentional input".
//! An axis is active only when its magnitude is strictly greater than the
//! threshold; a reading exactly on the threshold is inactive.

use serde::{Deserialize, Serialize};

/// What an axis-driven actuator receives on a tick where its axis is
/// inside the dead zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadZonePolicy {
    /// Leave the previous command in place.  The motor keeps running at
    /// whatever it was last told until the stick leaves the dead zone again.
    Hold,
    /// Command 0.0.
    #[default]
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeadZone {
    threshold: f32,
}

impl DeadZone {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.abs(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// `true` when `value` is outside the dead zone.  NaN is never active.
    pub fn is_active(&self, value: f32) -> bool {
        value.abs() > self.threshold
    }

    /// `Some(value)` when active, `None` otherwise.
    pub fn gate(&self, value: f32) -> Option<f32> {
        self.is_active(value).then_some(value)
    }
}

impl Default for DeadZone {
    fn default() -> Self {
        Self::new(0.3)
    }
}
