//! The service driving the real hardware adapter over simulated pins, and
//! scripted input end to end.

use super::mock_hw::RecordingSink;

use hatchbot::adapters::gamepad::ScriptedGamepads;
use hatchbot::adapters::hardware::HardwareAdapter;
use hatchbot::app::commands::AppCommand;
use hatchbot::app::context::{MotorId, SolenoidPosition};
use hatchbot::app::service::TeleopService;
use hatchbot::config::RobotConfig;
use hatchbot::drivers::motor::NEUTRAL_PULSE_US;
use hatchbot::safety::LimitSwitchId;

const SCRIPT: &str = r#"
{"ticks": 3, "operator": {"axes": {"LeftY": -1.0, "RightY": -1.0}}}
{"ticks": 2, "operator": {"buttons": ["Y", "A"]}}
{"ticks": 2, "operator": {"pov": 180}}
"#;

#[test]
fn scripted_match_reaches_the_motors() {
    let config = RobotConfig::default();
    let (mut hw, pins) = HardwareAdapter::simulated(&config).unwrap();
    let mut pads = ScriptedGamepads::from_reader(SCRIPT.as_bytes()).unwrap();
    let mut sink = RecordingSink::new();
    let mut app = TeleopService::new(config.profile.clone());
    app.handle_command(AppCommand::Enable, &mut hw, &mut sink);

    // Full forward on both sticks.
    for _ in 0..3 {
        app.tick(&mut pads, &mut hw, &mut sink);
        pads.advance();
    }
    assert_eq!(hw.motor(MotorId::LeftDrive).speed(), 1.0);
    assert!(hw.motor(MotorId::LeftDrive).pulses().all(|(_, us)| us == 2000));
    // The right gearbox is mirrored, so straight ahead is full reverse there.
    assert_eq!(hw.motor(MotorId::RightDrive).speed(), -1.0);
    assert!(hw.motor(MotorId::RightDrive).pulses().all(|(_, us)| us == 1000));

    // Ball arm up with A extending the pistons; then the front limit closes.
    app.tick(&mut pads, &mut hw, &mut sink);
    pads.advance();
    assert_eq!(hw.motor(MotorId::BallHand).speed(), 1.0);
    assert_eq!(hw.pneumatics().pistons()[1].position(), SolenoidPosition::Forward);
    assert_eq!(hw.motor(MotorId::LeftDrive).speed(), 0.0);

    pins[LimitSwitchId::BallFront.index()].set_high(false);
    app.tick(&mut pads, &mut hw, &mut sink);
    pads.advance();
    assert_eq!(hw.motor(MotorId::BallHand).speed(), 0.0);

    // Hat down: hatch retracts, Y and A released.
    app.tick(&mut pads, &mut hw, &mut sink);
    pads.advance();
    assert_eq!(hw.motor(MotorId::HatchHand).speed(), -1.0);
    assert_eq!(hw.motor(MotorId::BallHand).speed(), 0.0);
    assert_eq!(hw.pneumatics().pistons()[0].position(), SolenoidPosition::Reverse);
    assert!(hw.pneumatics().compressor().closed_loop());

    app.tick(&mut pads, &mut hw, &mut sink);
    pads.advance();
    assert!(pads.is_finished());

    app.handle_command(AppCommand::Disable, &mut hw, &mut sink);
    for id in MotorId::ALL {
        assert!(hw.motor(id).pulses().all(|(_, us)| us == NEUTRAL_PULSE_US));
    }
    assert!(!hw.pneumatics().compressor().is_running());
}
