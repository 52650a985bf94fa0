//! Rising-edge toggle.
//!
//! Turns a level-sampled button into a latched on/off state that flips
//! once per press.  Holding the button for many ticks flips it once.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeToggle {
    state: bool,
    prev_level: bool,
}

impl EdgeToggle {
    pub const fn new(initial: bool) -> Self {
        Self {
            state: initial,
            prev_level: false,
        }
    }

    /// Feed this tick's raw button level.  Returns the (possibly flipped)
    /// state, which the caller applies to its device unconditionally.
    pub fn update(&mut self, level: bool) -> bool {
        if level && !self.prev_level {
            self.state = !self.state;
        }
        self.prev_level = level;
        self.state
    }

    /// Record `level` as the previous sample without flipping.  Used while
    /// the robot is disabled so a button held across enable does not count
    /// as a fresh press.
    pub fn sync_level(&mut self, level: bool) {
        self.prev_level = level;
    }

    pub const fn state(&self) -> bool {
        self.state
    }
}
