//! Hatchbot: main entry point.
//!
//! Hexagonal architecture with a fixed-rate control loop and a detached
//! camera thread.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ScriptedGamepads  HardwareAdapter    LogEventSink             │
//! │  (ControllerPort)  (Sensor+Actuator)  (EventSink)              │
//! │  JsonConfigStore   TestPatternCamera → LogStream               │
//! │  (ConfigPort)      (vision thread)                             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            TeleopService (pure logic)                  │    │
//! │  │  Drive · Bindings · Toggles · Limit guard              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  PeriodicScheduler (20 ms cadence)                             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Environment:
//! - `HATCHBOT_CONFIG`: JSON config file (defaults when unset or missing)
//! - `HATCHBOT_PROFILE`: preset name overriding the config's profile
//! - `HATCHBOT_SCRIPT`: JSON-lines gamepad script; the run ends with it
//! - `RUST_LOG`: log filter (default `info`)

#![deny(unused_must_use)]

use std::env;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use log::{info, warn};

use hatchbot::adapters::config_store::JsonConfigStore;
use hatchbot::adapters::gamepad::ScriptedGamepads;
use hatchbot::adapters::hardware::HardwareAdapter;
use hatchbot::adapters::log_sink::LogEventSink;
use hatchbot::adapters::video::{LogStream, TestPatternCamera};
use hatchbot::app::commands::AppCommand;
use hatchbot::app::events::AppEvent;
use hatchbot::app::ports::{ConfigError, ConfigPort, EventSink};
use hatchbot::app::service::TeleopService;
use hatchbot::config::RobotConfig;
use hatchbot::drivers::limit_switch::SimInputPin;
use hatchbot::profile::ControlProfile;
use hatchbot::scheduler::PeriodicScheduler;
use hatchbot::vision::{self, VisionHandle};

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  Hatchbot v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config from file (or defaults) ─────────────────────
    let config = load_config()?;

    // ── 3. Devices and camera thread ──────────────────────────
    let (mut hw, vision) = bring_up(&config).context("startup failed")?;
    let mut pads = match env::var_os("HATCHBOT_SCRIPT") {
        Some(path) => ScriptedGamepads::from_path(Path::new(&path))?,
        None => {
            info!("No HATCHBOT_SCRIPT set, gamepads idle");
            ScriptedGamepads::idle()
        }
    };
    let scripted = !pads.is_finished();
    let mut sink = LogEventSink::new();

    // ── 4. Control core ───────────────────────────────────────
    let mut app = TeleopService::new(config.profile.clone());
    if let Ok(name) = env::var("HATCHBOT_PROFILE") {
        let profile = ControlProfile::preset(&name).ok_or_else(|| anyhow!("unknown profile preset '{}'", name))?;
        app.handle_command(AppCommand::LoadProfile(Box::new(profile)), &mut hw, &mut sink);
    }
    app.handle_command(AppCommand::Enable, &mut hw, &mut sink);

    // ── 5. Control loop ───────────────────────────────────────
    let period = Duration::from_millis(u64::from(config.control_loop_interval_ms));
    let telemetry_every = u64::from(config.telemetry_interval_ticks);
    let mut scheduler = PeriodicScheduler::new(period, Instant::now());
    info!(
        "Control loop at {} ms{}",
        config.control_loop_interval_ms,
        if scripted {
            format!(", script of {} ticks", pads.total_ticks())
        } else {
            String::new()
        }
    );

    loop {
        app.tick(&mut pads, &mut hw, &mut sink);
        pads.advance();

        if app.tick_count() % telemetry_every == 0 {
            sink.emit(&AppEvent::Telemetry(app.build_telemetry()));
        }
        if scripted && pads.is_finished() {
            break;
        }
        if let Some(sleep) = scheduler.next_sleep(Instant::now()) {
            thread::sleep(sleep);
        }
    }

    // ── 6. Shutdown ───────────────────────────────────────────
    app.handle_command(AppCommand::Disable, &mut hw, &mut sink);
    sink.emit(&AppEvent::Telemetry(app.build_telemetry()));
    if let Some(handle) = vision {
        let frames = handle.stop();
        info!("Vision published {} frames", frames);
    }
    info!(
        "Done: {} ticks, {} overruns",
        app.tick_count(),
        scheduler.overruns()
    );
    Ok(())
}

fn load_config() -> Result<RobotConfig> {
    let Some(path) = env::var_os("HATCHBOT_CONFIG") else {
        info!("No HATCHBOT_CONFIG set, using defaults");
        return Ok(RobotConfig::default());
    };
    let store = JsonConfigStore::new(path);
    match store.load() {
        Ok(cfg) => Ok(cfg),
        Err(ConfigError::NotFound) => {
            warn!("{} not found, using defaults", store.path().display());
            Ok(RobotConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("loading {}", store.path().display())),
    }
}

/// Construct every device and start the camera.  Any failure is fatal.
fn bring_up(config: &RobotConfig) -> hatchbot::error::Result<(HardwareAdapter<SimInputPin>, Option<VisionHandle>)> {
    let (hw, _limit_pins) = HardwareAdapter::simulated(config)?;

    if !config.vision.enabled {
        info!("Vision disabled");
        return Ok((hw, None));
    }
    let camera = TestPatternCamera::new(&config.vision.camera)?;
    let stream = LogStream::new(&config.vision.stream);
    let handle = vision::spawn(camera, stream, &config.vision)?;
    Ok((hw, Some(handle)))
}
