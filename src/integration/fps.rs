//! Frame-rate accounting. Purely observational: never touches scheduling.

use serde::Serialize;
use tracing::debug;

/// Length of the rolling window used for the FPS estimate.
const FPS_WINDOW_MS: f64 = 1000.0;

/// Ticks-per-second over a rolling ~1 s window.
///
/// Driven by host timestamps in milliseconds so any clock (vsync callback,
/// `Instant`, test fixture) can feed it. Tolerates variable intervals.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<f64>,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one tick at `now_ms`. Returns the new estimate when the window rolls over.
    ///
    /// Counts intervals, not ticks: the tick that opens a window only marks its start.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        let Some(start) = self.window_start else {
            self.window_start = Some(now_ms);
            return None;
        };
        self.frames += 1;

        let elapsed = now_ms - start;
        if elapsed < FPS_WINDOW_MS {
            return None;
        }
        self.fps = (self.frames as f64 * 1000.0 / elapsed) as f32;
        self.frames = 0;
        self.window_start = Some(now_ms);
        debug!(fps = self.fps, "fps window rolled over");
        Some(self.fps)
    }

    /// Latest estimate; `0.0` until the first window completes.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Cumulative counters for a frame loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    /// Every tick the host delivered
    pub ticks: u64,
    /// Ticks that ran detection and emitted a plan
    pub rendered: u64,
    /// Ticks skipped because the source or detector was not ready
    pub skipped: u64,
}
