//! Scripted gamepad adapter.
//!
//! Replays controller input from a JSON-lines file, one step per line:
//!
//! ```text
//! {"ticks": 25, "driver": {"axes": {"LeftY": -0.5}}}
//! {"ticks": 5,  "operator": {"buttons": ["B"], "pov": 90}}
//! {"ticks": 10}
//! ```
//!
//! Each step holds for `ticks` control ticks (default 1).  A pad missing
//! from a step reads as neutral.  `pov` takes the driver station's raw
//! value, so `-1` (or leaving it out) means centered.  Once the script runs out every pad is
//! neutral.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::app::ports::ControllerPort;
use crate::input::{Axis, Button, ControllerId, ControllerSnapshot, Pov};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PadFrame {
    buttons: Vec<Button>,
    axes: HashMap<Axis, f32>,
    pov: Option<i16>,
}

impl PadFrame {
    fn snapshot(&self) -> ControllerSnapshot {
        let mut snap = ControllerSnapshot::default();
        for &b in &self.buttons {
            snap = snap.with_button(b, true);
        }
        for (&axis, &v) in &self.axes {
            snap = snap.with_axis(axis, v.clamp(-1.0, 1.0));
        }
        snap.with_pov(self.pov.map_or(Pov::CENTERED, Pov::from_raw))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Step {
    #[serde(default = "one")]
    ticks: u32,
    #[serde(default)]
    driver: PadFrame,
    #[serde(default)]
    operator: PadFrame,
}

fn one() -> u32 {
    1
}

pub struct ScriptedGamepads {
    steps: Vec<(u32, [ControllerSnapshot; ControllerId::COUNT])>,
    cursor: usize,
    held: u32,
}

impl ScriptedGamepads {
    /// Every pad neutral, forever.
    pub fn idle() -> Self {
        Self {
            steps: Vec::new(),
            cursor: 0,
            held: 0,
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("opening input script {}", path.display()))?;
        Self::from_reader(BufReader::new(file)).with_context(|| format!("in {}", path.display()))
    }

    pub fn from_reader(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut steps = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let step: Step = serde_json::from_str(line).with_context(|| format!("line {}", n + 1))?;
            if step.ticks == 0 {
                bail!("line {}: ticks must be at least 1", n + 1);
            }
            steps.push((step.ticks, [step.driver.snapshot(), step.operator.snapshot()]));
        }
        Ok(Self {
            steps,
            cursor: 0,
            held: 0,
        })
    }

    /// Move to the next control tick.
    pub fn advance(&mut self) {
        let Some(&(ticks, _)) = self.steps.get(self.cursor) else {
            return;
        };
        self.held += 1;
        if self.held >= ticks {
            self.cursor += 1;
            self.held = 0;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Ticks the whole script lasts.
    pub fn total_ticks(&self) -> u64 {
        self.steps.iter().map(|&(t, _)| u64::from(t)).sum()
    }
}

impl ControllerPort for ScriptedGamepads {
    fn snapshot(&mut self, id: ControllerId) -> ControllerSnapshot {
        self.steps
            .get(self.cursor)
            .map(|(_, pads)| pads[id.index()])
            .unwrap_or_default()
    }
}
