//! Frame sinks backed by a pixel transport.
//!
//! Exactly one strip variant is active per configuration: [`RgbStrip`] for
//! three-channel clockless strips, [`RgbwStrip`] for four-channel strips
//! with a synthesized white LED, and [`ClockedStrip`] for two-wire strips
//! with a per-pixel luminance field. All three own their frame buffer and
//! hand complete frames to a [`StripDriver`].

use heapless::Vec;
use log::warn;

use crate::FrameSink;
use crate::calibration::{CalibrationEngine, CalibrationParams};
use crate::color::{Rgb, Rgbw, scale8};
use crate::config::StripConfig;

/// Highest luminance value a clocked strip accepts (5-bit field).
pub const MAX_LUMINANCE: u8 = 31;

/// Pixel transport behind a strip.
///
/// Implement this for the platform peripheral that shifts frames out (RMT,
/// SPI, bit-banged GPIO). `P` is the pixel layout the transport expects.
pub trait StripDriver<P> {
    /// Whether the transport can accept a new frame right now.
    fn is_ready(&self) -> bool {
        true
    }

    /// Push one complete frame to the strip.
    fn show(&mut self, frame: &[P]);
}

/// Sink for three-channel strips. The white channel of four-channel writes
/// is dropped.
pub struct RgbStrip<D, const MAX_PIXELS: usize> {
    driver: D,
    frame: Vec<Rgb, MAX_PIXELS>,
    brightness: u8,
}

impl<D: StripDriver<Rgb>, const MAX_PIXELS: usize> RgbStrip<D, MAX_PIXELS> {
    pub fn new(driver: D, pixel_count: usize) -> Self {
        Self {
            driver,
            frame: blank_frame(pixel_count, Rgb::new(0, 0, 0)),
            brightness: 255,
        }
    }

    pub fn from_config(driver: D, config: &StripConfig) -> Self {
        let mut strip = Self::new(driver, usize::from(config.pixel_count));
        strip.brightness = config.brightness;
        strip
    }

    /// Current frame contents.
    pub fn frame(&self) -> &[Rgb] {
        &self.frame
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: StripDriver<Rgb>, const MAX_PIXELS: usize> FrameSink for RgbStrip<D, MAX_PIXELS> {
    fn pixel_count(&self) -> usize {
        self.frame.len()
    }

    fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) {
        let brightness = self.brightness;
        let Some(pixel) = self.frame.get_mut(index) else {
            return;
        };
        *pixel = scale_rgb(r, g, b, brightness);
    }

    fn set_pixel_w(&mut self, index: usize, r: u8, g: u8, b: u8, _w: u8) {
        self.set_pixel(index, r, g, b);
    }

    fn can_render(&self) -> bool {
        self.driver.is_ready()
    }

    fn render(&mut self) {
        self.driver.show(&self.frame);
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}

/// Sink for four-channel strips with a white LED.
///
/// Three-channel writes go through RGBW calibration so the common white
/// component lands on the dedicated channel; four-channel writes carry an
/// explicit white and bypass the conversion.
pub struct RgbwStrip<D, const MAX_PIXELS: usize> {
    driver: D,
    frame: Vec<Rgbw, MAX_PIXELS>,
    brightness: u8,
    calibration: CalibrationEngine,
}

impl<D: StripDriver<Rgbw>, const MAX_PIXELS: usize> RgbwStrip<D, MAX_PIXELS> {
    pub fn new(driver: D, pixel_count: usize, params: CalibrationParams) -> Self {
        let mut calibration = CalibrationEngine::new(params);
        calibration.rebuild(params);
        Self {
            driver,
            frame: blank_frame(pixel_count, Rgbw::default()),
            brightness: 255,
            calibration,
        }
    }

    pub fn from_config(driver: D, config: &StripConfig) -> Self {
        let mut strip = Self::new(driver, usize::from(config.pixel_count), config.calibration);
        strip.brightness = config.brightness;
        strip
    }

    /// Current frame contents.
    pub fn frame(&self) -> &[Rgbw] {
        &self.frame
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn calibration(&self) -> &CalibrationEngine {
        &self.calibration
    }
}

impl<D: StripDriver<Rgbw>, const MAX_PIXELS: usize> FrameSink for RgbwStrip<D, MAX_PIXELS> {
    fn pixel_count(&self) -> usize {
        self.frame.len()
    }

    /// Brightness is applied to the RGB triple before white extraction.
    fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) {
        let scaled = scale_rgb(r, g, b, self.brightness);
        let Some(pixel) = self.frame.get_mut(index) else {
            return;
        };
        *pixel = self.calibration.convert(scaled.r, scaled.g, scaled.b);
    }

    fn set_pixel_w(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) {
        let brightness = self.brightness;
        let Some(pixel) = self.frame.get_mut(index) else {
            return;
        };
        *pixel = if brightness == 255 {
            Rgbw::new(r, g, b, w)
        } else {
            Rgbw::new(
                scale8(r, brightness),
                scale8(g, brightness),
                scale8(b, brightness),
                scale8(w, brightness),
            )
        };
    }

    fn can_render(&self) -> bool {
        self.driver.is_ready()
    }

    fn render(&mut self) {
        self.driver.show(&self.frame);
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn apply_calibration(&mut self, params: CalibrationParams) {
        self.calibration.rebuild(params);
    }
}

/// Sink for two-wire clocked strips.
///
/// The fourth channel drives the 5-bit luminance field, not a white LED:
/// three-channel writes run at full luminance and explicit white values are
/// clamped to [`MAX_LUMINANCE`], never brightness-scaled.
pub struct ClockedStrip<D, const MAX_PIXELS: usize> {
    driver: D,
    frame: Vec<Rgbw, MAX_PIXELS>,
    brightness: u8,
}

impl<D: StripDriver<Rgbw>, const MAX_PIXELS: usize> ClockedStrip<D, MAX_PIXELS> {
    pub fn new(driver: D, pixel_count: usize) -> Self {
        Self {
            driver,
            frame: blank_frame(pixel_count, Rgbw::default()),
            brightness: 255,
        }
    }

    pub fn from_config(driver: D, config: &StripConfig) -> Self {
        let mut strip = Self::new(driver, usize::from(config.pixel_count));
        strip.brightness = config.brightness;
        strip
    }

    /// Current frame contents.
    pub fn frame(&self) -> &[Rgbw] {
        &self.frame
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: StripDriver<Rgbw>, const MAX_PIXELS: usize> FrameSink for ClockedStrip<D, MAX_PIXELS> {
    fn pixel_count(&self) -> usize {
        self.frame.len()
    }

    fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) {
        self.set_pixel_w(index, r, g, b, MAX_LUMINANCE);
    }

    fn set_pixel_w(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) {
        let brightness = self.brightness;
        let Some(pixel) = self.frame.get_mut(index) else {
            return;
        };
        let Rgb { r, g, b } = scale_rgb(r, g, b, brightness);
        *pixel = Rgbw::new(r, g, b, w.min(MAX_LUMINANCE));
    }

    fn can_render(&self) -> bool {
        self.driver.is_ready()
    }

    fn render(&mut self) {
        self.driver.show(&self.frame);
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}

fn blank_frame<P: Clone, const MAX_PIXELS: usize>(
    pixel_count: usize,
    blank: P,
) -> Vec<P, MAX_PIXELS> {
    let mut frame = Vec::new();
    if pixel_count > MAX_PIXELS {
        warn!("pixel count {pixel_count} exceeds capacity {MAX_PIXELS}, clamping");
    }
    let count = pixel_count.min(MAX_PIXELS);
    // Cannot fail: count <= MAX_PIXELS.
    let _ = frame.resize(count, blank);
    frame
}

fn scale_rgb(r: u8, g: u8, b: u8, brightness: u8) -> Rgb {
    if brightness == 255 {
        Rgb::new(r, g, b)
    } else {
        Rgb::new(
            scale8(r, brightness),
            scale8(g, brightness),
            scale8(b, brightness),
        )
    }
}
