use embassy_time::Instant;

/// Per-second render statistics.
///
/// Counters accumulate in the current one-second interval; the previous
/// interval stays readable through [`rates`](RenderStats::rates) until the
/// next rollover.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    rendered: u16,
    skipped: u16,
    interval_tag: u64,
    last_rendered: u16,
    last_skipped: u16,
}

/// Snapshot of the last completed one-second interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRates {
    /// Frames presented during the last interval.
    pub rendered_fps: u16,
    /// New frames dropped under backpressure during the last interval.
    pub skipped_fps: u16,
}

impl RenderStats {
    pub const fn new() -> Self {
        Self {
            rendered: 0,
            skipped: 0,
            interval_tag: 0,
            last_rendered: 0,
            last_skipped: 0,
        }
    }

    /// Count one presented frame.
    pub fn count_rendered(&mut self) {
        self.rendered = self.rendered.wrapping_add(1);
    }

    /// Count one new frame dropped under backpressure.
    pub fn count_skipped(&mut self) {
        self.skipped = self.skipped.wrapping_add(1);
    }

    /// Close the interval when `now` has crossed a wall-clock second boundary.
    ///
    /// Boundary detection compares second tags, so it tolerates passes that
    /// run late or not at all for a while.
    pub fn roll_over(&mut self, now: Instant) {
        let tag = now.as_millis() / 1000;
        if tag == self.interval_tag {
            return;
        }
        self.interval_tag = tag;
        self.last_rendered = self.rendered;
        self.last_skipped = self.skipped;
        self.rendered = 0;
        self.skipped = 0;
    }

    /// Rates from the last completed interval.
    pub const fn rates(&self) -> FrameRates {
        FrameRates {
            rendered_fps: self.last_rendered,
            skipped_fps: self.last_skipped,
        }
    }

    /// Frames presented in the current, still-open interval.
    pub const fn rendered(&self) -> u16 {
        self.rendered
    }

    /// Frames skipped in the current, still-open interval.
    pub const fn skipped(&self) -> u16 {
        self.skipped
    }
}
