//! Camera relay.
//!
//! A background thread pulls frames from a [`FrameSource`], converts them to
//! grayscale, scales them to the stream resolution and publishes them to a
//! [`FrameSink`].  It shares nothing with the control loop except process
//! lifetime and a stop flag.
//!
//! ```text
//!  FrameSource ──▶ grab ──▶ BGR→gray ──▶ resize ──▶ put ──▶ FrameSink
//!      ▲                                                      │
//!      └───────────────── until stop flag set ◀───────────────┘
//! ```

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::config::VisionConfig;

// ───────────────────────────────────────────────────────────────
// Frames
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 3 bytes per pixel, blue first.
    Bgr8,
    /// 1 byte per pixel.
    Gray8,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bgr8 => 3,
            Self::Gray8 => 1,
        }
    }
}

/// An owned image buffer.  Reused across iterations so the steady-state
/// loop does not allocate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = width as usize * height as usize * format.bytes_per_pixel();
        Self {
            width,
            height,
            format,
            data: vec![0; len],
        }
    }

    /// Empty frame, to be filled by a source.
    pub fn empty() -> Self {
        Self::new(0, 0, PixelFormat::Gray8)
    }

    /// Resize the buffer in place, keeping its allocation where possible.
    pub fn reshape(&mut self, width: u32, height: u32, format: PixelFormat) {
        self.width = width;
        self.height = height;
        self.format = format;
        self.data
            .resize(width as usize * height as usize * format.bytes_per_pixel(), 0);
    }

    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }
}

// ───────────────────────────────────────────────────────────────
// Ports
// ───────────────────────────────────────────────────────────────

/// Capture device.
pub trait FrameSource: Send {
    /// Overwrite `frame` with the next captured image.
    fn grab(&mut self, frame: &mut Frame) -> Result<(), VisionError>;
}

/// Named output stream.
pub trait FrameSink: Send {
    fn put(&mut self, frame: &Frame);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisionError {
    /// No capture device is attached.
    NoCamera,
    /// The device did not deliver a frame this time.
    GrabFailed,
    /// A frame arrived in an unexpected format or with a short buffer.
    FormatMismatch,
    /// The OS refused to start the vision thread.
    SpawnFailed,
}

impl fmt::Display for VisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCamera => write!(f, "no camera attached"),
            Self::GrabFailed => write!(f, "frame grab failed"),
            Self::FormatMismatch => write!(f, "unexpected frame format"),
            Self::SpawnFailed => write!(f, "could not start vision thread"),
        }
    }
}

impl std::error::Error for VisionError {}

// ───────────────────────────────────────────────────────────────
// Transforms
// ───────────────────────────────────────────────────────────────

/// Luma of one BGR pixel in 14-bit fixed point (BT.601 weights).
#[inline]
pub fn luma(b: u8, g: u8, r: u8) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    ((u32::from(r) * R + u32::from(g) * G + u32::from(b) * B + (1 << 13)) >> 14) as u8
}

/// Convert a BGR frame to grayscale into `dst`.
pub fn bgr_to_gray(src: &Frame, dst: &mut Frame) -> Result<(), VisionError> {
    if src.format != PixelFormat::Bgr8 || !src.is_well_formed() {
        return Err(VisionError::FormatMismatch);
    }
    dst.reshape(src.width, src.height, PixelFormat::Gray8);
    for (out, px) in dst.data.iter_mut().zip(src.data.chunks_exact(3)) {
        *out = luma(px[0], px[1], px[2]);
    }
    Ok(())
}

/// Nearest-neighbour scale of `src` into a `width` x `height` frame.
pub fn resize_nearest(src: &Frame, width: u32, height: u32, dst: &mut Frame) -> Result<(), VisionError> {
    if !src.is_well_formed() || src.width == 0 || src.height == 0 {
        return Err(VisionError::FormatMismatch);
    }
    let bpp = src.format.bytes_per_pixel();
    dst.reshape(width, height, src.format);

    let (sw, sh) = (src.width as usize, src.height as usize);
    let (dw, dh) = (width as usize, height as usize);
    for y in 0..dh {
        let sy = y * sh / dh;
        let src_row = &src.data[sy * sw * bpp..(sy + 1) * sw * bpp];
        let dst_row = &mut dst.data[y * dw * bpp..(y + 1) * dw * bpp];
        for x in 0..dw {
            let sx = x * sw / dw;
            dst_row[x * bpp..(x + 1) * bpp].copy_from_slice(&src_row[sx * bpp..(sx + 1) * bpp]);
        }
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Pipeline
// ───────────────────────────────────────────────────────────────

/// One grab → gray → resize → put pass, with its scratch buffers.
pub struct VisionPipeline<S, K> {
    source: S,
    sink: K,
    width: u32,
    height: u32,
    raw: Frame,
    gray: Frame,
    out: Frame,
}

impl<S: FrameSource, K: FrameSink> VisionPipeline<S, K> {
    pub fn new(source: S, sink: K, config: &VisionConfig) -> Self {
        Self {
            source,
            sink,
            width: config.stream.width,
            height: config.stream.height,
            raw: Frame::empty(),
            gray: Frame::empty(),
            out: Frame::empty(),
        }
    }

    /// Publish one frame.  Errors mean this frame was dropped; the next call
    /// starts fresh.
    pub fn step(&mut self) -> Result<(), VisionError> {
        self.source.grab(&mut self.raw)?;
        let gray = match self.raw.format {
            PixelFormat::Bgr8 => {
                bgr_to_gray(&self.raw, &mut self.gray)?;
                &self.gray
            }
            PixelFormat::Gray8 => &self.raw,
        };
        resize_nearest(gray, self.width, self.height, &mut self.out)?;
        self.sink.put(&self.out);
        Ok(())
    }
}

/// Running vision thread.
pub struct VisionHandle {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<u64>,
}

impl VisionHandle {
    /// Ask the thread to finish its current frame and exit.  Returns the
    /// number of frames published.
    pub fn stop(self) -> u64 {
        self.stop.store(true, Ordering::Relaxed);
        match self.thread.join() {
            Ok(frames) => frames,
            Err(_) => {
                warn!("Vision thread panicked");
                0
            }
        }
    }

    pub fn is_running(&self) -> bool {
        !self.thread.is_finished()
    }
}

/// Start the vision thread.
pub fn spawn<S, K>(source: S, sink: K, config: &VisionConfig) -> Result<VisionHandle, VisionError>
where
    S: FrameSource + 'static,
    K: FrameSink + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    let mut pipeline = VisionPipeline::new(source, sink, config);
    let (w, h, name) = (config.stream.width, config.stream.height, config.stream.name.clone());

    let thread = thread::Builder::new()
        .name("vision".into())
        .spawn(move || {
            info!("Vision streaming '{}' at {}x{}", name, w, h);
            let mut published = 0u64;
            let mut dropped = 0u64;
            while !flag.load(Ordering::Relaxed) {
                match pipeline.step() {
                    Ok(()) => published += 1,
                    Err(VisionError::NoCamera) => {
                        warn!("Vision: camera gone, stopping");
                        break;
                    }
                    Err(e) => {
                        dropped += 1;
                        debug!("Vision: frame dropped ({})", e);
                    }
                }
            }
            info!("Vision stopped: {} published, {} dropped", published, dropped);
            published
        })
        .map_err(|_| VisionError::SpawnFailed)?;

    Ok(VisionHandle { stop, thread })
}
