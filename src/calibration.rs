//! RGB to RGBW conversion tables.
//!
//! Strips with a dedicated white LED expect the common white component to be
//! carried on its own channel. The conversion extracts that component from an
//! RGB triple using four 256-entry lookup tables scaled from the configured
//! calibration parameters.

use log::debug;

use crate::color::Rgbw;

/// White calibration parameters.
///
/// `gain` scales the synthesized white output; `red`, `green` and `blue`
/// describe how much each color channel contributes to perceived white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationParams {
    pub gain: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            gain: 0xFF,
            red: 0xA0,
            green: 0xA0,
            blue: 0xA0,
        }
    }
}

/// Scaled lookup tables, one entry per 8-bit intensity level.
pub struct CalibrationTables {
    pub white: [u8; 256],
    pub red: [u8; 256],
    pub green: [u8; 256],
    pub blue: [u8; 256],
}

impl CalibrationTables {
    const fn zeroed() -> Self {
        Self {
            white: [0; 256],
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
        }
    }
}

/// Builds and owns the conversion tables for one strip.
pub struct CalibrationEngine {
    params: CalibrationParams,
    tables: Option<CalibrationTables>,
}

impl CalibrationEngine {
    /// Create an engine without tables.
    ///
    /// Tables are built on the first [`rebuild`](Self::rebuild) call.
    pub const fn new(params: CalibrationParams) -> Self {
        Self {
            params,
            tables: None,
        }
    }

    /// Recompute the lookup tables for `params`.
    ///
    /// Skipped when the parameters match the last build and tables already
    /// exist. Returns whether a rebuild happened.
    pub fn rebuild(&mut self, params: CalibrationParams) -> bool {
        if params == self.params && self.tables.is_some() {
            return false;
        }
        self.params = params;
        let tables = self.tables.get_or_insert(CalibrationTables::zeroed());
        for level in 0..tables.white.len() {
            tables.white[level] = scale_level(params.gain, level);
            tables.red[level] = scale_level(params.red, level);
            tables.green[level] = scale_level(params.green, level);
            tables.blue[level] = scale_level(params.blue, level);
        }
        debug!(
            "calibration rebuilt: gain {} red {} green {} blue {}",
            params.gain, params.red, params.green, params.blue
        );
        true
    }

    /// Drop the tables, keeping the parameters.
    ///
    /// Used when the strip is reconfigured to a family that does not
    /// synthesize white.
    pub fn release(&mut self) {
        self.tables = None;
    }

    /// Convert an RGB triple to RGBW.
    ///
    /// White is the smallest of the three per-channel lookups, and its
    /// contribution is subtracted from each color channel. Every table entry
    /// satisfies `table[i] <= i`, so the subtractions cannot underflow.
    /// Before the first rebuild the triple passes through with `w = 0`.
    pub fn convert(&self, r: u8, g: u8, b: u8) -> Rgbw {
        let Some(tables) = self.tables.as_ref() else {
            return Rgbw::new(r, g, b, 0);
        };
        let white = tables.red[usize::from(r)]
            .min(tables.green[usize::from(g)])
            .min(tables.blue[usize::from(b)]);
        let w = usize::from(white);
        Rgbw::new(
            r - tables.red[w],
            g - tables.green[w],
            b - tables.blue[w],
            tables.white[w],
        )
    }

    /// Parameters from the last build request.
    pub const fn params(&self) -> CalibrationParams {
        self.params
    }

    /// Read-only view of the current tables, if built.
    pub fn tables(&self) -> Option<&CalibrationTables> {
        self.tables.as_ref()
    }
}

/// Scale one table entry, rounding half up.
#[allow(clippy::cast_possible_truncation)]
fn scale_level(param: u8, level: usize) -> u8 {
    let scaled = (u32::from(param) * level as u32 + 127) / 255;
    scaled.min(255) as u8
}
