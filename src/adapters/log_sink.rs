//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! `log` facade.  A dashboard adapter would implement the same trait.

use log::info;

use crate::app::context::MotorId;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | mode={:?} tick={} | drive={:+.2}/{:+.2} launcher={:+.2} \
                     ball={:+.2} hatch={:+.2} | pistons={:?} compressor={} | limits=0b{:04b}",
                    t.mode,
                    t.tick,
                    t.output(MotorId::LeftDrive),
                    t.output(MotorId::RightDrive),
                    t.output(MotorId::BallLauncher),
                    t.output(MotorId::BallHand),
                    t.output(MotorId::HatchHand),
                    t.pistons,
                    if t.compressor { "ON" } else { "OFF" },
                    t.limit_flags,
                );
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {:?} -> {:?}", from, to);
            }
            AppEvent::LimitChanged { id, triggered } => {
                if *triggered {
                    info!("LIMIT | {} engaged", id);
                } else {
                    info!("LIMIT | {} released", id);
                }
            }
            AppEvent::ToggleFlipped { index, on } => {
                info!("TOGGLE | #{} -> {}", index, if *on { "ON" } else { "OFF" });
            }
            AppEvent::ProfileLoaded(name) => {
                info!("PROFILE | loaded '{}'", name);
            }
        }
    }
}
