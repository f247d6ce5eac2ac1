use crate::calibration::CalibrationParams;
use crate::color::Rgb;

/// Chipset family the strip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceFamily {
    /// Three-channel clockless strips (WS2812 and compatible).
    #[default]
    Ws2812,
    /// Four-channel clockless strips with a white LED (SK6812 RGBW).
    Sk6812,
    /// Two-wire clocked strips with a per-pixel luminance field (APA102).
    Apa102,
}

impl DeviceFamily {
    /// Channels shifted out per pixel.
    pub const fn channel_count(self) -> usize {
        match self {
            Self::Ws2812 => 3,
            Self::Sk6812 | Self::Apa102 => 4,
        }
    }

    /// Whether the white channel is synthesized from RGB via calibration.
    pub const fn has_synthesized_white(self) -> bool {
        matches!(self, Self::Sk6812)
    }
}

/// Static strip configuration, consumed once at startup.
///
/// Persistence and transport of this structure belong to the embedding
/// firmware; the core only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripConfig {
    pub family: DeviceFamily,
    pub pixel_count: u16,
    pub brightness: u8,
    pub idle_color: Rgb,
    pub calibration: CalibrationParams,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            family: DeviceFamily::Ws2812,
            pixel_count: 16,
            brightness: 255,
            idle_color: Rgb::new(196, 32, 8),
            calibration: CalibrationParams::default(),
        }
    }
}

/// Identity strings advertised in discovery replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub name: &'static str,
    pub model: &'static str,
    pub version: &'static str,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            model: "generic",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
