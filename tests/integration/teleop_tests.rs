//! Integration tests for the TeleopService → actuators pipeline.
//!
//! These run on the host and drive the full tick (sample, decide, gate,
//! apply) through mock adapters.

use super::mock_hw::{ActuatorCall, MockHardware, MockPads, RecordingSink};

use hatchbot::app::commands::AppCommand;
use hatchbot::app::context::{MotorId, SolenoidPosition};
use hatchbot::app::events::{AppEvent, RobotMode};
use hatchbot::app::service::TeleopService;
use hatchbot::control::deadzone::DeadZonePolicy;
use hatchbot::input::{Axis, Button, ControllerSnapshot, Pov};
use hatchbot::profile::ControlProfile;
use hatchbot::safety::LimitSwitchId;

struct Rig {
    app: TeleopService,
    pads: MockPads,
    hw: MockHardware,
    sink: RecordingSink,
}

impl Rig {
    fn enabled(profile: ControlProfile) -> Self {
        let mut rig = Self {
            app: TeleopService::new(profile),
            pads: MockPads::new(),
            hw: MockHardware::new(),
            sink: RecordingSink::new(),
        };
        rig.command(AppCommand::Enable);
        rig
    }

    fn command(&mut self, cmd: AppCommand) {
        self.app.handle_command(cmd, &mut self.hw, &mut self.sink);
    }

    fn tick(&mut self) {
        self.app.tick(&mut self.pads, &mut self.hw, &mut self.sink);
    }

    fn operator(&mut self, snap: ControllerSnapshot) {
        self.pads.operator(snap);
    }
}

fn pressed(button: Button) -> ControllerSnapshot {
    ControllerSnapshot::default().with_button(button, true)
}

// ── Mode handling ─────────────────────────────────────────────

#[test]
fn enable_emits_mode_change() {
    let rig = Rig::enabled(ControlProfile::competition());
    assert_eq!(rig.app.mode(), RobotMode::Teleop);
    assert_eq!(
        rig.sink.events,
        vec![AppEvent::ModeChanged {
            from: RobotMode::Disabled,
            to: RobotMode::Teleop
        }]
    );
}

#[test]
fn disabled_ticks_touch_no_actuator() {
    let mut app = TeleopService::new(ControlProfile::competition());
    let mut pads = MockPads::new();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    pads.operator(pressed(Button::RightBumper));
    for _ in 0..3 {
        app.tick(&mut pads, &mut hw, &mut sink);
    }
    assert!(hw.calls.is_empty());
    assert_eq!(app.tick_count(), 3);
}

#[test]
fn disable_forces_everything_off() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.operator(pressed(Button::RightBumper).with_button(Button::A, true));
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::BallLauncher), 1.0);
    assert_eq!(rig.hw.pistons(), SolenoidPosition::Forward);

    rig.command(AppCommand::Disable);
    assert_eq!(rig.hw.calls.last(), Some(&ActuatorCall::AllOff));
    assert_eq!(rig.app.output(MotorId::BallLauncher), 0.0);
    assert_eq!(rig.app.commands().motor(MotorId::BallLauncher).speed, 0.0);

    rig.hw.clear();
    rig.tick();
    assert!(rig.hw.calls.is_empty(), "disabled tick must not write actuators");
}

#[test]
fn every_actuator_reissued_every_tick() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.tick();
    rig.tick();
    let motor_writes = rig
        .hw
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::SetMotor { .. }))
        .count();
    assert_eq!(motor_writes, 2 * MotorId::COUNT);
    let compressor_writes = rig
        .hw
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::SetCompressor(_)))
        .count();
    assert_eq!(compressor_writes, 2);
}

#[test]
fn repeated_tick_with_same_input_is_idempotent() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.operator(pressed(Button::Y).with_axis(Axis::LeftY, -0.8));
    rig.tick();
    rig.hw.clear();

    rig.tick();
    let first = rig.hw.calls.clone();
    rig.hw.clear();
    rig.tick();
    assert_eq!(rig.hw.calls, first);
}

// ── Drive ─────────────────────────────────────────────────────

#[test]
fn split_stick_vertical_drive() {
    let mut rig = Rig::enabled(ControlProfile::single_stick());
    rig.operator(ControllerSnapshot::default().with_axis(Axis::LeftY, 0.5));
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::LeftDrive), -0.5);
    assert_eq!(rig.hw.motor(MotorId::RightDrive), 0.5);
}

#[test]
fn split_stick_spins_on_x() {
    let mut rig = Rig::enabled(ControlProfile::single_stick());
    rig.operator(ControllerSnapshot::default().with_axis(Axis::LeftX, -0.7));
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::LeftDrive), -0.7);
    assert_eq!(rig.hw.motor(MotorId::RightDrive), -0.7);
}

#[test]
fn split_stick_dead_zone_policies() {
    let mut rig = Rig::enabled(ControlProfile::single_stick());
    rig.operator(ControllerSnapshot::default().with_axis(Axis::LeftY, 0.5));
    rig.tick();
    rig.operator(ControllerSnapshot::default().with_axis(Axis::LeftY, 0.3));
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::RightDrive), 0.0, "Zero policy stops inside the dead zone");

    let mut profile = ControlProfile::single_stick();
    profile.dead_zone_policy = DeadZonePolicy::Hold;
    let mut rig = Rig::enabled(profile);
    rig.operator(ControllerSnapshot::default().with_axis(Axis::LeftY, 0.5));
    rig.tick();
    rig.operator(ControllerSnapshot::default().with_axis(Axis::LeftY, 0.1));
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::RightDrive), 0.5, "Hold policy keeps the last command");
}

#[test]
fn competition_tank_both_sticks_forward_drives_straight() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.operator(
        ControllerSnapshot::default()
            .with_axis(Axis::LeftY, -1.0)
            .with_axis(Axis::RightY, -1.0),
    );
    rig.tick();
    // Mirrored right gearbox: opposite signs move the robot forward.
    assert_eq!(rig.hw.motor(MotorId::LeftDrive), 1.0);
    assert_eq!(rig.hw.motor(MotorId::RightDrive), -1.0);
}

#[test]
fn competition_tank_squares_half_stick_and_drops_noise() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.operator(
        ControllerSnapshot::default()
            .with_axis(Axis::LeftY, -0.5)
            .with_axis(Axis::RightY, 0.01),
    );
    rig.tick();
    let left = rig.hw.motor(MotorId::LeftDrive);
    assert!((left - 0.25).abs() < 0.02, "half stick gives about a quarter, got {left}");
    assert_eq!(rig.hw.motor(MotorId::RightDrive), 0.0);
}

#[test]
fn momentary_triggers_sum_on_launcher() {
    let mut rig = Rig::enabled(ControlProfile::momentary());
    rig.operator(
        ControllerSnapshot::default()
            .with_axis(Axis::LeftTrigger, 0.75)
            .with_axis(Axis::RightTrigger, 0.25),
    );
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::BallLauncher), 0.5);
}

// ── Edge bindings ─────────────────────────────────────────────

#[test]
fn launcher_runs_from_press_until_release() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.operator(pressed(Button::LeftBumper));
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::BallLauncher), -0.3);

    // Still held: the command persists without a new edge.
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::BallLauncher), -0.3);

    rig.operator(ControllerSnapshot::default());
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::BallLauncher), 0.0);
}

#[test]
fn pistons_follow_a_edges() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.tick();
    assert_eq!(rig.hw.pistons(), SolenoidPosition::Off);

    rig.operator(pressed(Button::A));
    rig.tick();
    assert_eq!(rig.hw.pistons(), SolenoidPosition::Forward);

    rig.operator(ControllerSnapshot::default());
    rig.tick();
    assert_eq!(rig.hw.pistons(), SolenoidPosition::Reverse);
}

#[test]
fn button_held_through_enable_is_not_a_press() {
    let mut app = TeleopService::new(ControlProfile::competition());
    let mut pads = MockPads::new();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    pads.operator(pressed(Button::A));
    app.tick(&mut pads, &mut hw, &mut sink);
    app.handle_command(AppCommand::Enable, &mut hw, &mut sink);
    app.tick(&mut pads, &mut hw, &mut sink);
    assert_eq!(hw.pistons(), SolenoidPosition::Off);
}

// ── Toggle ────────────────────────────────────────────────────

#[test]
fn toggle_held_five_ticks_flips_once() {
    let mut profile = ControlProfile::competition();
    profile.toggles[0].initial = false;
    let mut rig = Rig::enabled(profile);

    rig.operator(pressed(Button::B));
    rig.tick();
    assert_eq!(rig.app.toggle_state(0), Some(true));
    assert!(rig.hw.compressor());
    for _ in 0..4 {
        rig.tick();
        assert_eq!(rig.app.toggle_state(0), Some(true));
    }

    let flips = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ToggleFlipped { .. }))
        .count();
    assert_eq!(flips, 1);
}

#[test]
fn compressor_starts_on_and_toggles_per_press() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.tick();
    assert!(rig.hw.compressor());

    for expected in [false, true, false] {
        rig.operator(pressed(Button::B));
        rig.tick();
        rig.operator(ControllerSnapshot::default());
        rig.tick();
        assert_eq!(rig.hw.compressor(), expected);
    }
}

// ── Limit switches ────────────────────────────────────────────

#[test]
fn ball_hand_stops_at_front_limit_and_resumes_on_release() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.operator(pressed(Button::Y));
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::BallHand), 1.0);

    rig.hw.set_limit(LimitSwitchId::BallFront, true);
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::BallHand), 0.0);
    assert_eq!(rig.app.commands().motor(MotorId::BallHand).speed, 1.0);

    rig.hw.set_limit(LimitSwitchId::BallFront, false);
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::BallHand), 1.0);
}

#[test]
fn triggered_limit_does_not_block_the_other_direction() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.hw.set_limit(LimitSwitchId::BallFront, true);
    rig.operator(pressed(Button::X));
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::BallHand), -1.0);
}

#[test]
fn hatch_follows_hat_within_limits() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.operator(ControllerSnapshot::default().with_pov(Pov::at(180)));
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::HatchHand), -1.0);

    rig.hw.set_limit(LimitSwitchId::HatchBack, true);
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::HatchHand), 0.0);

    rig.operator(ControllerSnapshot::default().with_pov(Pov::at(0)));
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::HatchHand), 1.0);

    rig.operator(ControllerSnapshot::default());
    rig.tick();
    assert_eq!(rig.hw.motor(MotorId::HatchHand), 0.0);
}

#[test]
fn limit_changes_are_reported_once() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.hw.set_limit(LimitSwitchId::HatchFront, true);
    rig.tick();
    rig.tick();
    rig.hw.set_limit(LimitSwitchId::HatchFront, false);
    rig.tick();

    let changes: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::LimitChanged { id, triggered } => Some((*id, *triggered)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![(LimitSwitchId::HatchFront, true), (LimitSwitchId::HatchFront, false)]
    );
}

#[test]
fn telemetry_reflects_applied_outputs() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.hw.set_limit(LimitSwitchId::BallBack, true);
    rig.operator(pressed(Button::RightBumper));
    rig.tick();

    let t = rig.app.build_telemetry();
    assert_eq!(t.mode, RobotMode::Teleop);
    assert_eq!(t.tick, 1);
    assert_eq!(t.output(MotorId::BallLauncher), 1.0);
    assert!(t.compressor);
    assert_eq!(t.limit_flags, LimitSwitchId::BallBack.mask());
}

// ── Profiles ──────────────────────────────────────────────────

#[test]
fn profile_swap_only_while_disabled() {
    let mut rig = Rig::enabled(ControlProfile::competition());
    rig.command(AppCommand::LoadProfile(Box::new(ControlProfile::single_stick())));
    assert_eq!(rig.app.profile().name, "competition");

    rig.command(AppCommand::Disable);
    rig.command(AppCommand::LoadProfile(Box::new(ControlProfile::single_stick())));
    assert_eq!(rig.app.profile().name, "single-stick");
    assert_eq!(
        rig.sink.events.last(),
        Some(&AppEvent::ProfileLoaded("single-stick".into()))
    );
}
