//! Camera and stream adapters for the host build.
//!
//! [`TestPatternCamera`] stands in for the USB camera and paces itself to
//! the configured frame rate.  [`LogStream`] stands in for the stream
//! server: it counts frames and reports throughput once a second.

use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::config::{CameraConfig, StreamConfig};
use crate::vision::{Frame, FrameSink, FrameSource, PixelFormat, VisionError};

/// Moving colour bars at the configured resolution.
pub struct TestPatternCamera {
    width: u32,
    height: u32,
    brightness: u8,
    interval: Duration,
    next_frame: Option<Instant>,
    phase: u32,
}

impl TestPatternCamera {
    pub fn new(config: &CameraConfig) -> Result<Self, VisionError> {
        if config.width == 0 || config.height == 0 || config.fps == 0 {
            return Err(VisionError::NoCamera);
        }
        info!(
            "Camera: test pattern {}x{} @ {} fps, brightness {}",
            config.width, config.height, config.fps, config.brightness
        );
        Ok(Self {
            width: config.width,
            height: config.height,
            brightness: config.brightness,
            interval: Duration::from_secs(1) / config.fps,
            next_frame: None,
            phase: 0,
        })
    }

    fn pace(&mut self) {
        let now = Instant::now();
        let due = self.next_frame.unwrap_or(now);
        if due > now {
            thread::sleep(due - now);
        }
        self.next_frame = Some(due.max(now) + self.interval);
    }
}

impl FrameSource for TestPatternCamera {
    fn grab(&mut self, frame: &mut Frame) -> Result<(), VisionError> {
        self.pace();
        frame.reshape(self.width, self.height, PixelFormat::Bgr8);

        const BARS: [[u8; 3]; 4] = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]];
        let bar_width = (self.width / BARS.len() as u32).max(1);
        let lift = self.brightness;
        let row_len = self.width as usize * 3;
        for row in frame.data.chunks_exact_mut(row_len) {
            for (x, px) in row.chunks_exact_mut(3).enumerate() {
                let bar = ((x as u32 + self.phase) / bar_width) as usize % BARS.len();
                for (out, &c) in px.iter_mut().zip(&BARS[bar]) {
                    *out = c.saturating_add(lift);
                }
            }
        }
        self.phase = (self.phase + 1) % self.width;
        Ok(())
    }
}

/// Counts published frames under the stream's name.
pub struct LogStream {
    name: String,
    frames: u64,
    window_start: Instant,
    window_frames: u32,
}

impl LogStream {
    pub fn new(config: &StreamConfig) -> Self {
        info!("Stream '{}' at {}x{}", config.name, config.width, config.height);
        Self {
            name: config.name.clone(),
            frames: 0,
            window_start: Instant::now(),
            window_frames: 0,
        }
    }
}

impl FrameSink for LogStream {
    fn put(&mut self, frame: &Frame) {
        self.frames += 1;
        self.window_frames += 1;
        let elapsed = self.window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            info!(
                "STREAM | {} | {}x{} {:?} | {:.1} fps | {} total",
                self.name,
                frame.width,
                frame.height,
                frame.format,
                f64::from(self.window_frames) / elapsed.as_secs_f64(),
                self.frames
            );
            self.window_start = Instant::now();
            self.window_frames = 0;
        }
    }
}
