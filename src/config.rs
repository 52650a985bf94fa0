//! Robot configuration.
//!
//! Wiring, timing, camera settings and the control profile.  Defaults come
//! from [`crate::pins`]; a JSON file can override any of it.  Wiring is
//! checked once by [`RobotConfig::validate`] at startup and never again.

use serde::{Deserialize, Serialize};

use crate::app::context::MotorId;
use crate::app::ports::ConfigError;
use crate::pins;
use crate::profile::ControlProfile;
use crate::safety::LimitSwitchId;

/// Most controllers a single motor group can drive.
pub const MAX_GROUP_SIZE: usize = 4;

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// PWM speed controller model.  Both take a standard 1–2 ms servo pulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerKind {
    #[default]
    VictorSpx,
    Spark,
}

/// A set of PWM channels driven with one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorGroupConfig {
    pub channels: heapless::Vec<u8, MAX_GROUP_SIZE>,
    #[serde(default)]
    pub kind: ControllerKind,
    #[serde(default)]
    pub inverted: bool,
}

impl MotorGroupConfig {
    fn victor(channels: &[u8]) -> Self {
        Self {
            channels: channels.iter().copied().collect(),
            kind: ControllerKind::VictorSpx,
            inverted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorWiring {
    pub left_drive: MotorGroupConfig,
    pub right_drive: MotorGroupConfig,
    pub ball_launcher: MotorGroupConfig,
    pub ball_hand: MotorGroupConfig,
    pub hatch_hand: MotorGroupConfig,
}

impl MotorWiring {
    pub fn group(&self, id: MotorId) -> &MotorGroupConfig {
        match id {
            MotorId::LeftDrive => &self.left_drive,
            MotorId::RightDrive => &self.right_drive,
            MotorId::BallLauncher => &self.ball_launcher,
            MotorId::BallHand => &self.ball_hand,
            MotorId::HatchHand => &self.hatch_hand,
        }
    }
}

impl Default for MotorWiring {
    fn default() -> Self {
        Self {
            left_drive: MotorGroupConfig::victor(&[pins::DRIVE_LEFT_MASTER_PWM, pins::DRIVE_LEFT_SLAVE_PWM]),
            right_drive: MotorGroupConfig::victor(&[pins::DRIVE_RIGHT_MASTER_PWM, pins::DRIVE_RIGHT_SLAVE_PWM]),
            ball_launcher: MotorGroupConfig::victor(&[pins::BALL_LAUNCHER_PWM]),
            ball_hand: MotorGroupConfig::victor(&[pins::BALL_HAND_PWM, pins::BALL_HAND_SECONDARY_PWM]),
            hatch_hand: MotorGroupConfig {
                kind: ControllerKind::Spark,
                ..MotorGroupConfig::victor(&[pins::HATCH_HAND_PWM])
            },
        }
    }
}

/// One limit switch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSwitchConfig {
    pub dio: u8,
    /// Closed switch pulls the line low (pull-up wiring).
    #[serde(default = "default_active_low")]
    pub active_low: bool,
}

fn default_active_low() -> bool {
    true
}

impl LimitSwitchConfig {
    const fn pull_up(dio: u8) -> Self {
        Self {
            dio,
            active_low: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitWiring {
    pub hatch_front: LimitSwitchConfig,
    pub hatch_back: LimitSwitchConfig,
    pub ball_front: LimitSwitchConfig,
    pub ball_back: LimitSwitchConfig,
}

impl LimitWiring {
    pub fn switch(&self, id: LimitSwitchId) -> LimitSwitchConfig {
        match id {
            LimitSwitchId::HatchFront => self.hatch_front,
            LimitSwitchId::HatchBack => self.hatch_back,
            LimitSwitchId::BallFront => self.ball_front,
            LimitSwitchId::BallBack => self.ball_back,
        }
    }
}

impl Default for LimitWiring {
    fn default() -> Self {
        Self {
            hatch_front: LimitSwitchConfig::pull_up(pins::HATCH_FRONT_LIMIT_DIO),
            hatch_back: LimitSwitchConfig::pull_up(pins::HATCH_BACK_LIMIT_DIO),
            ball_front: LimitSwitchConfig::pull_up(pins::BALL_FRONT_LIMIT_DIO),
            ball_back: LimitSwitchConfig::pull_up(pins::BALL_BACK_LIMIT_DIO),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PneumaticsConfig {
    /// CAN id of the pneumatics control module.
    pub pcm: u8,
    /// (forward, reverse) solenoid channels for each piston.
    pub pistons: [(u8, u8); 2],
}

impl Default for PneumaticsConfig {
    fn default() -> Self {
        Self {
            pcm: pins::COMPRESSOR_PCM,
            pistons: [pins::PISTON_A_CHANNELS, pins::PISTON_B_CHANNELS],
        }
    }
}

/// Driver station USB slot of each logical gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerWiring {
    pub driver: u8,
    pub operator: u8,
}

impl Default for ControllerWiring {
    fn default() -> Self {
        Self {
            driver: pins::DRIVER_USB_SLOT,
            operator: pins::OPERATOR_USB_SLOT,
        }
    }
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub brightness: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Name the stream is published under.
    pub name: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionConfig {
    pub enabled: bool,
    pub camera: CameraConfig,
    pub stream: StreamConfig,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            camera: CameraConfig {
                width: 1920,
                height: 1080,
                fps: 60,
                brightness: 1,
            },
            stream: StreamConfig {
                name: "Blur".into(),
                width: 640,
                height: 480,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub motors: MotorWiring,
    pub limit_switches: LimitWiring,
    pub pneumatics: PneumaticsConfig,
    pub controllers: ControllerWiring,
    pub vision: VisionConfig,
    pub profile: ControlProfile,

    // --- Timing ---
    /// Control loop period (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (control ticks).
    pub telemetry_interval_ticks: u32,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            motors: MotorWiring::default(),
            limit_switches: LimitWiring::default(),
            pneumatics: PneumaticsConfig::default(),
            controllers: ControllerWiring::default(),
            vision: VisionConfig::default(),
            profile: ControlProfile::default(),

            control_loop_interval_ms: 20, // 50 Hz
            telemetry_interval_ticks: 50, // 1/s
        }
    }
}

/// Marks channels as used, reporting the first clash or overflow.
struct ChannelSet {
    kind: &'static str,
    max: u8,
    used: u32,
}

impl ChannelSet {
    fn new(kind: &'static str, max: u8) -> Self {
        Self { kind, max, used: 0 }
    }

    fn claim(&mut self, channel: u8) -> Result<(), ConfigError> {
        let kind = self.kind;
        if channel > self.max {
            return Err(ConfigError::ChannelOutOfRange { kind, channel });
        }
        let bit = 1u32 << channel;
        if self.used & bit != 0 {
            return Err(ConfigError::DuplicateChannel { kind, channel });
        }
        self.used |= bit;
        Ok(())
    }
}

impl RobotConfig {
    /// Check every invariant the control loop relies on: distinct, in-range
    /// channels and sane numeric parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut pwm = ChannelSet::new("PWM", pins::PWM_CHANNEL_MAX);
        for id in MotorId::ALL {
            let group = self.motors.group(id);
            if group.channels.is_empty() {
                return Err(ConfigError::ValidationFailed("motor group has no channels"));
            }
            for &ch in &group.channels {
                pwm.claim(ch)?;
            }
        }

        let mut dio = ChannelSet::new("DIO", pins::DIO_CHANNEL_MAX);
        for id in LimitSwitchId::ALL {
            dio.claim(self.limit_switches.switch(id).dio)?;
        }

        let mut pcm = ChannelSet::new("PCM", pins::PCM_CHANNEL_MAX);
        for (fwd, rev) in self.pneumatics.pistons {
            pcm.claim(fwd)?;
            pcm.claim(rev)?;
        }

        let mut usb = ChannelSet::new("USB", pins::USB_SLOT_MAX);
        usb.claim(self.controllers.driver)?;
        usb.claim(self.controllers.operator)?;

        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("control_loop_interval_ms must be > 0"));
        }
        if self.telemetry_interval_ticks == 0 {
            return Err(ConfigError::ValidationFailed("telemetry_interval_ticks must be > 0"));
        }

        let threshold = self.profile.dead_zone.threshold();
        if !(0.0..1.0).contains(&threshold) {
            return Err(ConfigError::ValidationFailed("dead zone must be in [0, 1)"));
        }
        if !self.profile.speeds_in_range() {
            return Err(ConfigError::ValidationFailed("binding speed outside [-1, 1]"));
        }

        let v = &self.vision;
        if v.camera.width == 0 || v.camera.height == 0 || v.stream.width == 0 || v.stream.height == 0 {
            return Err(ConfigError::ValidationFailed("vision resolution must be non-zero"));
        }
        if v.camera.fps == 0 {
            return Err(ConfigError::ValidationFailed("camera fps must be > 0"));
        }
        if v.stream.name.is_empty() {
            return Err(ConfigError::ValidationFailed("stream name must not be empty"));
        }

        Ok(())
    }
}
