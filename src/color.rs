use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Four-channel pixel with a dedicated white component.
///
/// On clocked strips the `w` field carries the 5-bit luminance value instead
/// of a white LED level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }
}

/// Scale an 8-bit value by an 8-bit factor, where 255 means 1.0.
///
/// `scale8(v, 255) == v` and `scale8(v, 0) == 0` hold for all inputs.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}
