//! Backpressure-aware render scheduling.
//!
//! The sink's transport may still be shifting out the previous frame when a
//! new presentation is requested. Requests are deferred rather than blocked
//! on, and a deferred presentation is flushed on a later pass once the
//! transport is ready again.

use embassy_time::Instant;

use crate::FrameSink;
use crate::stats::RenderStats;

/// Defers and coalesces presentation requests while the sink is busy.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    pending_render: bool,
    stats: RenderStats,
}

impl RenderScheduler {
    pub const fn new() -> Self {
        Self {
            pending_render: false,
            stats: RenderStats::new(),
        }
    }

    /// Present `sink` now, or defer when it is not ready.
    ///
    /// `is_new_frame` marks requests carrying fresh pixel data; deferring
    /// such a request on top of an already pending one counts one skipped
    /// frame.
    pub fn request_render<S: FrameSink>(&mut self, sink: &mut S, is_new_frame: bool) {
        if !sink.can_render() {
            self.queue(is_new_frame);
            return;
        }
        sink.render();
        self.pending_render = false;
        self.stats.count_rendered();
    }

    /// Mark a presentation as pending without touching the sink.
    pub fn queue(&mut self, is_new_frame: bool) {
        if is_new_frame && self.pending_render {
            self.stats.count_skipped();
        }
        self.pending_render = true;
    }

    /// Present a deferred frame once the sink is ready again.
    pub fn flush<S: FrameSink>(&mut self, sink: &mut S) {
        if self.pending_render {
            self.request_render(sink, false);
        }
    }

    /// Close the per-second statistics interval when due.
    pub fn roll_over(&mut self, now: Instant) {
        self.stats.roll_over(now);
    }

    /// Whether a presentation is deferred.
    pub const fn pending(&self) -> bool {
        self.pending_render
    }

    pub const fn stats(&self) -> &RenderStats {
        &self.stats
    }
}
