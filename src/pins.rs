//! Channel assignments for the robot's control system wiring.
//!
//! Single source of truth for the default wiring.  [`RobotConfig`] starts
//! from these values; a config file may override any of them, after which
//! [`RobotConfig::validate`] checks that every channel is still unique and
//! within range.
//!
//! [`RobotConfig`]: crate::config::RobotConfig
//! [`RobotConfig::validate`]: crate::config::RobotConfig::validate

// ---------------------------------------------------------------------------
// PWM motor controllers (roboRIO PWM header 0–9)
// ---------------------------------------------------------------------------

/// Highest usable PWM header channel.
pub const PWM_CHANNEL_MAX: u8 = 9;

/// Left drive, front (master) controller.
pub const DRIVE_LEFT_MASTER_PWM: u8 = 0;
/// Left drive, rear (slave) controller.
pub const DRIVE_LEFT_SLAVE_PWM: u8 = 1;
/// Right drive, front (master) controller.
pub const DRIVE_RIGHT_MASTER_PWM: u8 = 2;
/// Right drive, rear (slave) controller.
pub const DRIVE_RIGHT_SLAVE_PWM: u8 = 3;

/// Ball intake arm, primary motor.
pub const BALL_HAND_PWM: u8 = 4;
/// Ball launcher flywheel.
pub const BALL_LAUNCHER_PWM: u8 = 5;
/// Ball intake arm, secondary motor (mechanically coupled to the primary).
pub const BALL_HAND_SECONDARY_PWM: u8 = 6;
/// Hatch panel arm (Spark controller).
pub const HATCH_HAND_PWM: u8 = 7;

// ---------------------------------------------------------------------------
// Digital inputs (DIO 0–9), limit switches
// ---------------------------------------------------------------------------

/// Highest usable DIO header channel.
pub const DIO_CHANNEL_MAX: u8 = 9;

pub const HATCH_BACK_LIMIT_DIO: u8 = 0;
pub const HATCH_FRONT_LIMIT_DIO: u8 = 1;
pub const BALL_FRONT_LIMIT_DIO: u8 = 2;
pub const BALL_BACK_LIMIT_DIO: u8 = 3;

// ---------------------------------------------------------------------------
// Pneumatics control module
// ---------------------------------------------------------------------------

/// Highest solenoid channel on a PCM.
pub const PCM_CHANNEL_MAX: u8 = 7;

/// CAN id of the pneumatics control module that owns the compressor.
pub const COMPRESSOR_PCM: u8 = 0;

/// First double solenoid (forward, reverse).
pub const PISTON_A_CHANNELS: (u8, u8) = (0, 1);
/// Second double solenoid (forward, reverse).
pub const PISTON_B_CHANNELS: (u8, u8) = (2, 3);

// ---------------------------------------------------------------------------
// Driver station USB slots
// ---------------------------------------------------------------------------

/// Highest driver station joystick slot.
pub const USB_SLOT_MAX: u8 = 5;

/// Gamepad that runs the drivetrain and every mechanism.
pub const OPERATOR_USB_SLOT: u8 = 0;
/// Second gamepad, reserved for a dedicated driver.
pub const DRIVER_USB_SLOT: u8 = 1;
