//! The streaming core wired together: decoders in front of a sink, a
//! scheduler behind it, live state on the side.

use embassy_time::Instant;
use log::debug;

use crate::FrameSink;
use crate::calibration::CalibrationParams;
use crate::color::Rgb;
use crate::config::{DeviceIdentity, StripConfig};
use crate::control::{ControlIntent, ControlReceiver};
use crate::live_state::LiveState;
use crate::protocol::ddp::DdpReply;
use crate::protocol::{self, StreamProtocol};
use crate::scheduler::RenderScheduler;
use crate::stats::FrameRates;

/// One instance per strip.
///
/// The embedding firmware owns the sockets and the control surface; it
/// feeds datagrams into [`decode`](Self::decode) and calls
/// [`tick`](Self::tick) periodically from the same task. Nothing here
/// blocks.
pub struct StreamPipeline<'a, S: FrameSink, const CONTROL: usize> {
    sink: S,
    scheduler: RenderScheduler,
    state: LiveState,
    identity: DeviceIdentity,
    intents: ControlReceiver<'a, CONTROL>,
}

impl<'a, S: FrameSink, const CONTROL: usize> StreamPipeline<'a, S, CONTROL> {
    pub fn new(
        mut sink: S,
        intents: ControlReceiver<'a, CONTROL>,
        config: &StripConfig,
        identity: DeviceIdentity,
    ) -> Self {
        sink.set_brightness(config.brightness);
        debug!("stream pipeline ready: {} pixels", sink.pixel_count());
        Self {
            sink,
            scheduler: RenderScheduler::new(),
            state: LiveState::new(config.brightness, config.idle_color),
            identity,
            intents,
        }
    }

    /// Decode one datagram.
    ///
    /// A live stream frame refreshes the timeout and requests a
    /// presentation. The returned reply, if any, goes back to the
    /// datagram's sender.
    pub fn decode(
        &mut self,
        protocol: StreamProtocol,
        datagram: &[u8],
        now: Instant,
    ) -> Option<DdpReply> {
        let outcome = protocol::decode(protocol, datagram, &mut self.sink, &self.identity);
        if outcome.stream_frame {
            self.state.mark_stream_frame(now);
            self.scheduler.request_render(&mut self.sink, true);
        }
        outcome.reply
    }

    /// One scheduler pass: apply pending intents, check the stream timeout,
    /// repaint idle state if anything changed, flush a deferred
    /// presentation, and roll statistics over.
    pub fn tick(&mut self, now: Instant) {
        self.drain_intents(now);
        self.state.check_stream_timeout(now);
        self.synchronize_idle();
        self.scheduler.flush(&mut self.sink);
        self.scheduler.roll_over(now);
    }

    /// Turn the output on or off.
    pub fn set_power(&mut self, on: bool, now: Instant) {
        self.state.update_power_on(on, now);
    }

    /// Set the output brightness.
    ///
    /// Takes effect for subsequent stream writes and for the next idle
    /// repaint.
    pub fn set_brightness(&mut self, brightness: u8) {
        self.state.update_brightness(brightness);
        self.sink.set_brightness(brightness);
    }

    /// Set the idle color and drop out of live mode.
    pub fn set_static_color(&mut self, color: Rgb) {
        self.state.update_static_color(color);
    }

    /// Rebuild the sink's calibration tables.
    pub fn apply_calibration(&mut self, params: CalibrationParams) {
        self.sink.apply_calibration(params);
    }

    /// Rates from the last completed one-second interval.
    pub fn stats(&self) -> FrameRates {
        self.scheduler.stats().rates()
    }

    pub fn live_state(&self) -> &LiveState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn drain_intents(&mut self, now: Instant) {
        while let Some(intent) = self.intents.try_receive() {
            match intent {
                ControlIntent::Power(on) => self.set_power(on, now),
                ControlIntent::Brightness(brightness) => self.set_brightness(brightness),
                ControlIntent::StaticColor(color) => self.set_static_color(color),
                ControlIntent::Calibration(params) => self.apply_calibration(params),
            }
        }
    }

    /// Repaint the whole buffer with the idle color (or off) when any state
    /// setter ran since the last pass. The repaint is queued, not rendered
    /// directly, so one pass never presents twice.
    fn synchronize_idle(&mut self) {
        if !self.state.take_changes() {
            return;
        }
        let color = if self.state.on() {
            self.state.idle_color()
        } else {
            Rgb::new(0, 0, 0)
        };
        for index in 0..self.sink.pixel_count() {
            self.sink.set_pixel(index, color.r, color.g, color.b);
        }
        self.scheduler.queue(false);
    }
}
