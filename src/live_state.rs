//! Power, brightness, idle color, and stream liveness.
//!
//! Setters raise one-shot change flags; the pipeline consumes them once per
//! pass so that any number of rapid configuration changes coalesce into a
//! single repaint.

use embassy_time::{Duration, Instant};

use crate::color::Rgb;

/// How long a stream stays live without new frames.
pub const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_millis(6500);

/// Mutable device state shared between the control surface and the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveState {
    on: bool,
    live: bool,
    brightness: u8,
    idle_color: Rgb,
    stream_deadline: Option<Instant>,
    power_changed: bool,
    brightness_changed: bool,
    color_changed: bool,
}

impl LiveState {
    /// State seeded from configuration: off, not live, no stream armed.
    pub fn new(brightness: u8, idle_color: Rgb) -> Self {
        Self {
            on: false,
            live: false,
            brightness,
            idle_color,
            stream_deadline: None,
            power_changed: false,
            brightness_changed: false,
            color_changed: false,
        }
    }

    /// Turn the output on or off.
    ///
    /// Turning on arms the stream timeout with the default duration so a
    /// stream that never arrives cannot keep the strip in live mode; turning
    /// off disarms it.
    pub fn update_power_on(&mut self, on: bool, now: Instant) {
        self.on = on;
        self.power_changed = true;
        if on {
            self.update_stream_timeout(DEFAULT_STREAM_TIMEOUT, now);
        } else {
            self.disarm_stream();
        }
    }

    /// Move the stream deadline `timeout` past `now` and mark the stream
    /// live. A zero `timeout` is the disarm sentinel and clears `live`.
    pub fn update_stream_timeout(&mut self, timeout: Duration, now: Instant) {
        if timeout == Duration::from_millis(0) {
            self.disarm_stream();
        } else {
            self.stream_deadline = Some(now + timeout);
            self.live = true;
        }
    }

    /// Refresh the deadline after a successfully decoded stream frame.
    pub fn mark_stream_frame(&mut self, now: Instant) {
        self.update_stream_timeout(DEFAULT_STREAM_TIMEOUT, now);
    }

    /// Power off once the armed deadline has passed.
    ///
    /// Reverts the strip to its idle behavior when the stream stops. Firing
    /// disarms the deadline, so repeated calls are no-ops until the stream
    /// is armed again.
    pub fn check_stream_timeout(&mut self, now: Instant) {
        let Some(deadline) = self.stream_deadline else {
            return;
        };
        if now >= deadline {
            self.update_power_on(false, now);
        }
    }

    /// Set the output brightness. Does not touch stream liveness.
    pub fn update_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
        self.brightness_changed = true;
    }

    /// Set the idle color and hand the strip back to idle behavior by
    /// disarming the stream.
    pub fn update_static_color(&mut self, color: Rgb) {
        self.idle_color = color;
        self.color_changed = true;
        self.disarm_stream();
    }

    /// Consume all pending change flags.
    ///
    /// Returns whether any setter ran since the last call.
    pub fn take_changes(&mut self) -> bool {
        let changed = self.power_changed || self.brightness_changed || self.color_changed;
        self.power_changed = false;
        self.brightness_changed = false;
        self.color_changed = false;
        changed
    }

    pub const fn on(&self) -> bool {
        self.on
    }

    pub const fn live(&self) -> bool {
        self.live
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn idle_color(&self) -> Rgb {
        self.idle_color
    }

    /// Whether a stream deadline is currently armed.
    pub const fn stream_armed(&self) -> bool {
        self.stream_deadline.is_some()
    }

    fn disarm_stream(&mut self) {
        self.stream_deadline = None;
        self.live = false;
    }
}

impl Default for LiveState {
    fn default() -> Self {
        Self::new(255, Rgb::new(0, 0, 0))
    }
}
