#![allow(dead_code)]

use ledstream::color::{Rgb, Rgbw};
use ledstream::sink::StripDriver;

/// Strip transport with a scriptable ready flag; counts pushed frames.
pub struct ScriptedDriver {
    pub ready: bool,
    pub frames_shown: usize,
}

impl ScriptedDriver {
    pub const fn new() -> Self {
        Self {
            ready: true,
            frames_shown: 0,
        }
    }
}

impl StripDriver<Rgb> for ScriptedDriver {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn show(&mut self, _frame: &[Rgb]) {
        self.frames_shown += 1;
    }
}

impl StripDriver<Rgbw> for ScriptedDriver {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn show(&mut self, _frame: &[Rgbw]) {
        self.frames_shown += 1;
    }
}
