//! End-of-travel protection.
//!
//! Each arm mechanism has a limit switch at both ends of its travel.  The
//! guard samples all of them **every tick before commands are applied** and
//! forces a motor command to zero when the switch guarding its direction of
//! travel is triggered.  Switch state is never cached across ticks: the
//! operator can back a mechanism off its stop at any time.
//!
//! ## Lifecycle of a switch
//!
//! 1. The mechanism hits its stop; the switch closes.
//! 2. [`LimitGuard::observe`] sets the switch's bit and logs it.
//! 3. Any command guarded by that switch is applied as 0.0.
//! 4. The switch opens again; the bit clears and guarded commands pass.

use core::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Limit switches, each a distinct bit in a [`LimitSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LimitSwitchId {
    /// Hatch arm fully extended.
    HatchFront = 0b0000_0001,
    /// Hatch arm fully retracted.
    HatchBack = 0b0000_0010,
    /// Ball arm fully raised.
    BallFront = 0b0000_0100,
    /// Ball arm fully lowered.
    BallBack = 0b0000_1000,
}

impl LimitSwitchId {
    pub const COUNT: usize = 4;
    pub const ALL: [Self; Self::COUNT] = [
        Self::HatchFront,
        Self::HatchBack,
        Self::BallFront,
        Self::BallBack,
    ];

    /// Return the bitmask for this switch.
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Position in [`Self::ALL`].
    pub const fn index(self) -> usize {
        (self as u8).trailing_zeros() as usize
    }
}

impl fmt::Display for LimitSwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HatchFront => write!(f, "hatch front"),
            Self::HatchBack => write!(f, "hatch back"),
            Self::BallFront => write!(f, "ball front"),
            Self::BallBack => write!(f, "ball back"),
        }
    }
}

/// Which switches are triggered on one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitSnapshot(u8);

impl LimitSnapshot {
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn with(self, id: LimitSwitchId, triggered: bool) -> Self {
        if triggered {
            Self(self.0 | id.mask())
        } else {
            Self(self.0 & !id.mask())
        }
    }

    pub const fn is_triggered(self, id: LimitSwitchId) -> bool {
        self.0 & id.mask() != 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Force `command` to zero when the guarding switch is triggered.
///
/// The sign of `command` is irrelevant: the caller picks which switch
/// guards which binding, so a triggered switch always wins.
pub fn gate(command: f32, triggered: bool) -> f32 {
    if triggered { 0.0 } else { command }
}

/// A switch that changed state between two observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitChange {
    pub id: LimitSwitchId,
    pub triggered: bool,
}

/// Limit-switch supervisor.
#[derive(Debug, Default)]
pub struct LimitGuard {
    /// Latest snapshot.
    current: LimitSnapshot,
}

impl LimitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this tick's switch states.  Returns the switches that changed
    /// since the previous call.
    pub fn observe(&mut self, snap: LimitSnapshot) -> heapless::Vec<LimitChange, { LimitSwitchId::COUNT }> {
        let mut changes = heapless::Vec::new();
        let diff = self.current.bits() ^ snap.bits();
        for id in LimitSwitchId::ALL {
            if diff & id.mask() == 0 {
                continue;
            }
            let triggered = snap.is_triggered(id);
            if triggered {
                warn!("LIMIT ENGAGED: {id}");
            } else {
                info!("LIMIT RELEASED: {id}");
            }
            // One entry per switch, capacity is the switch count.
            let _ = changes.push(LimitChange { id, triggered });
        }
        self.current = snap;
        changes
    }

    /// Apply the guard to a command, given the switch (if any) that stops it.
    pub fn gate(&self, command: f32, limit: Option<LimitSwitchId>) -> f32 {
        match limit {
            Some(id) => gate(command, self.current.is_triggered(id)),
            None => command,
        }
    }

    pub fn snapshot(&self) -> LimitSnapshot {
        self.current
    }
}
