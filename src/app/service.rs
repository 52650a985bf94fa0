//! Application service: the hexagonal core.
//!
//! [`TeleopService`] owns the control context and runs the periodic
//! callback.  All I/O flows through port traits injected at call sites,
//! making the whole service testable with mock adapters.
//!
//! ```text
//!  ControllerPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!      SensorPort ──▶ │      TeleopService        │
//!    ActuatorPort ◀── │ drive · bindings · limits │
//!                     └──────────────────────────┘
//! ```
//!
//! A tick never blocks: it samples once, decides once, writes once.

use log::{info, warn};

use crate::control::deadzone::DeadZonePolicy;
use crate::input::{ControllerId, GamepadState};
use crate::profile::{ControlProfile, Effect};

use super::commands::AppCommand;
use super::context::{ActuatorCommands, ControlContext, MotorId};
use super::events::{AppEvent, RobotMode, TelemetryData};
use super::ports::{ActuatorPort, ControllerPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// TeleopService
// ───────────────────────────────────────────────────────────────

pub struct TeleopService {
    ctx: ControlContext,
    mode: RobotMode,
    tick_count: u64,
}

impl TeleopService {
    /// Construct the service in [`RobotMode::Disabled`].
    pub fn new(profile: ControlProfile) -> Self {
        info!("TeleopService using profile '{}'", profile.name);
        Self {
            ctx: ControlContext::new(profile),
            mode: RobotMode::Disabled,
            tick_count: 0,
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: sample gamepads → sample limit switches →
    /// drive → bindings → toggles → apply.
    ///
    /// While disabled only the input history is refreshed, so a button
    /// held across enable is not mistaken for a fresh press.
    pub fn tick(
        &mut self,
        pads: &mut impl ControllerPort,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Sample every gamepad once.
        let states = ControllerId::ALL.map(|id| self.ctx.inputs.update(id, pads.snapshot(id)));
        let all = &states;
        let pad = move |id: ControllerId| &all[id.index()];

        if self.mode == RobotMode::Disabled {
            for (latch, binding) in self.ctx.toggles.iter_mut().zip(&self.ctx.profile.toggles) {
                latch.sync_level(pad(binding.controller).button(binding.button).is_pressed());
            }
            return;
        }

        // 2. Limit switches, fresh every tick.
        let changes = self.ctx.limits.observe(hw.read_limit_switches());
        for c in &changes {
            sink.emit(&AppEvent::LimitChanged {
                id: c.id,
                triggered: c.triggered,
            });
        }

        // 3. Drivetrain.
        let profile = &self.ctx.profile;
        let commands = &mut self.ctx.commands;
        let drive = profile.drive.evaluate(
            &pad(profile.drive_controller).current,
            &profile.dead_zone,
            profile.dead_zone_policy,
        );
        if let Some(l) = drive.left {
            commands.set_motor(MotorId::LeftDrive, l, None);
        }
        if let Some(r) = drive.right {
            commands.set_motor(MotorId::RightDrive, r, None);
        }

        // 4. Analog passthrough.
        Self::apply_axis_bindings(profile, &states, commands);

        // 5. Button / hat bindings, in table order.
        for binding in &profile.bindings {
            if binding.trigger.fires(pad(binding.controller)) {
                Self::apply_effect(binding.effect, commands);
            }
        }

        // 6. Latched toggles.
        for (index, (latch, binding)) in self
            .ctx
            .toggles
            .iter_mut()
            .zip(&profile.toggles)
            .enumerate()
        {
            let before = latch.state();
            let on = latch.update(pad(binding.controller).button(binding.button).is_pressed());
            if on != before {
                info!("Toggle {} ({:?}) -> {}", index, binding.target, on);
                sink.emit(&AppEvent::ToggleFlipped { index, on });
            }
            Self::apply_effect(binding.target.effect(on), commands);
        }

        // 7. Apply through the limit guard.
        self.apply_actuators(hw);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::Enable => self.set_mode(RobotMode::Teleop, hw, sink),
            AppCommand::Disable => self.set_mode(RobotMode::Disabled, hw, sink),
            AppCommand::LoadProfile(profile) => {
                if self.mode != RobotMode::Disabled {
                    warn!("Profile '{}' rejected: robot is enabled", profile.name);
                    return;
                }
                let name = profile.name.clone();
                self.ctx = ControlContext::new(*profile);
                info!("Profile '{}' loaded", name);
                sink.emit(&AppEvent::ProfileLoaded(name));
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            mode: self.mode,
            tick: self.tick_count,
            outputs: self.ctx.outputs,
            pistons: self.ctx.commands.pistons,
            compressor: self.ctx.commands.compressor,
            limit_flags: self.ctx.limits.snapshot().bits(),
        }
    }

    pub fn mode(&self) -> RobotMode {
        self.mode
    }

    /// Total ticks executed since startup, enabled or not.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Commands as requested by the bindings, before limit gating.
    pub fn commands(&self) -> &ActuatorCommands {
        &self.ctx.commands
    }

    /// Speed sent to `motor` on the last enabled tick.
    pub fn output(&self, motor: MotorId) -> f32 {
        self.ctx.outputs[motor.index()]
    }

    /// Current state of the toggle at `index` in the profile.
    pub fn toggle_state(&self, index: usize) -> Option<bool> {
        self.ctx.toggles.get(index).map(|t| t.state())
    }

    pub fn profile(&self) -> &ControlProfile {
        &self.ctx.profile
    }

    // ── Internal ──────────────────────────────────────────────

    fn set_mode(&mut self, to: RobotMode, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let from = self.mode;
        if from == to {
            return;
        }
        self.mode = to;
        if to == RobotMode::Disabled {
            // Toggles keep their latched state; everything else restarts
            // from rest on the next enable.
            self.ctx.commands = ActuatorCommands::all_off();
            self.ctx.outputs = [0.0; MotorId::COUNT];
            hw.all_off();
        }
        info!("Mode {:?} -> {:?}", from, to);
        sink.emit(&AppEvent::ModeChanged { from, to });
    }

    fn apply_effect(effect: Effect, commands: &mut ActuatorCommands) {
        match effect {
            Effect::Motor {
                motor,
                speed,
                limit,
            } => commands.set_motor(motor, speed, limit),
            Effect::Pistons(position) => commands.pistons = position,
            Effect::Compressor(running) => commands.compressor = running,
        }
    }

    /// Sum every axis binding per motor.  A motor whose gated axes are all
    /// inside the dead zone follows the dead-zone policy.
    fn apply_axis_bindings(
        profile: &ControlProfile,
        states: &[GamepadState; ControllerId::COUNT],
        commands: &mut ActuatorCommands,
    ) {
        for motor in MotorId::ALL {
            let mut bound = false;
            let mut active = false;
            let mut sum = 0.0;
            for b in profile.axis_bindings.iter().filter(|b| b.motor == motor) {
                bound = true;
                let raw = states[b.controller.index()].axis(b.axis);
                let value = if b.gated { profile.dead_zone.gate(raw) } else { Some(raw) };
                if let Some(v) = value {
                    active = true;
                    sum += v * b.scale;
                }
            }
            if !bound {
                continue;
            }
            if active {
                commands.set_motor(motor, sum, None);
            } else if profile.dead_zone_policy == DeadZonePolicy::Zero {
                commands.set_motor(motor, 0.0, None);
            }
        }
    }

    /// Translate commands into port calls.  Every actuator is re-issued
    /// every tick; limit switches are re-checked every tick.
    fn apply_actuators(&mut self, hw: &mut impl ActuatorPort) {
        for motor in MotorId::ALL {
            let cmd = self.ctx.commands.motor(motor);
            let speed = self.ctx.limits.gate(cmd.speed, cmd.limit);
            self.ctx.outputs[motor.index()] = speed;
            hw.set_motor(motor, speed);
        }
        hw.set_pistons(self.ctx.commands.pistons);
        hw.set_compressor(self.ctx.commands.compressor);
    }
}
