#![no_std]

pub mod calibration;
pub mod color;
pub mod config;
pub mod control;
pub mod live_state;
pub mod pipeline;
pub mod protocol;
pub mod scheduler;
pub mod sink;
pub mod stats;

pub use calibration::{CalibrationEngine, CalibrationParams, CalibrationTables};
pub use color::{Rgb, Rgbw, scale8};
pub use config::{DeviceFamily, DeviceIdentity, StripConfig};
pub use control::{ControlChannel, ControlIntent, ControlQueueFull, ControlReceiver, ControlSender};
pub use live_state::{DEFAULT_STREAM_TIMEOUT, LiveState};
pub use pipeline::StreamPipeline;
pub use protocol::ddp::{DDP_PORT, DdpHeader, DdpReply};
pub use protocol::raw::RAW_PORT;
pub use protocol::realtime::REALTIME_PORT;
pub use protocol::{DecodeOutcome, MTU, StreamProtocol};
pub use scheduler::RenderScheduler;
pub use sink::{ClockedStrip, MAX_LUMINANCE, RgbStrip, RgbwStrip, StripDriver};
pub use stats::{FrameRates, RenderStats};

pub use embassy_time::{Duration, Instant};

/// Abstract LED output trait
///
/// Implement this trait to expose a concrete strip driver to the streaming
/// core. The decoders, scheduler, and pipeline are generic over it.
pub trait FrameSink {
    /// Number of addressable pixels.
    fn pixel_count(&self) -> usize;

    /// Write one RGB pixel. Out-of-range indexes are ignored.
    fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8);

    /// Write one pixel with an explicit fourth channel. Out-of-range
    /// indexes are ignored.
    fn set_pixel_w(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8);

    /// Whether the output can accept a presentation right now.
    fn can_render(&self) -> bool;

    /// Present the current buffer.
    fn render(&mut self);

    /// Set the brightness applied to subsequent writes.
    fn set_brightness(&mut self, _brightness: u8) {}

    /// Rebuild calibration tables, on sinks that synthesize white.
    fn apply_calibration(&mut self, _params: CalibrationParams) {}
}
