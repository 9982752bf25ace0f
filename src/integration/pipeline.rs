//! FrameLoop driving detect → track → plan → render once per host tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info, trace, warn};

use crate::compositor::{self, Compositor, DrawPlan, Overlay};
use crate::config::FocusConfig;
use crate::error::{Error, Result};
use crate::integration::detector::DetectionSource;
use crate::integration::fps::{FpsCounter, LoopStats};
use crate::integration::hit_test::{self, DisplayGeometry, HitTestConfig, PointerEvent};
use crate::integration::video::{Frame, SourceStatus, VideoSource};
use crate::tracker::{Detection, FocusTracker, Rect, TrackState, Transition};

/// Consumer of each tick's compositing decision.
///
/// The sink paints pixels: `plan` says which treatment each layer gets and
/// `overlays` carries one outline/label per detection.
pub trait RenderSink {
    /// Error type for render failures.
    type Error;

    fn render(
        &mut self,
        frame: &Frame<'_>,
        plan: &DrawPlan,
        overlays: &[Overlay],
    ) -> Result<(), Self::Error>;
}

/// Host frame-presentation callback, e.g. vsync.
pub trait FrameClock {
    /// Wait for the next presentation slot and return its timestamp in ms.
    fn next_frame(&mut self) -> f64;
}

/// Why a tick did no work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    SourceNotReady,
    DetectorNotReady,
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The full sequence ran and the sink received `plan`.
    Rendered {
        transition: Transition,
        plan: DrawPlan,
    },
    /// Nothing was drawn; the next tick retries.
    Skipped(SkipReason),
    /// The video source has stopped; the loop must not re-arm.
    Stopped,
}

/// Cancels a running [`FrameLoop::run`] from any thread.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Cooperative single-subject focus loop.
///
/// One tick runs to completion (detector call included) before the next one
/// starts, so there is never more than one detection in flight and the
/// tracked state is updated in strict frame order. Pointer events queued
/// from other threads are applied on the loop's own thread at the start of
/// the next tick.
pub struct FrameLoop<V, D, S>
where
    V: VideoSource,
    D: DetectionSource,
    S: RenderSink,
{
    source: V,
    detector: D,
    sink: S,
    tracker: FocusTracker,
    compositor: Compositor,
    blur_intensity: f32,
    color_pop: bool,
    hit_test: HitTestConfig,
    // Latest frame's detections and size, kept until the next frame for hit-testing
    detections: Vec<Detection>,
    frame_size: Option<(u32, u32)>,
    last_timestamp: Option<f64>,
    fps: FpsCounter,
    stats: LoopStats,
    pointer_tx: Sender<PointerEvent>,
    pointer_rx: Receiver<PointerEvent>,
    stop: StopHandle,
}

impl<V, D, S> FrameLoop<V, D, S>
where
    V: VideoSource,
    D: DetectionSource,
    D::Error: std::error::Error + Send + Sync + 'static,
    S: RenderSink,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    /// Create a new loop from its collaborators and a validated configuration.
    pub fn new(source: V, detector: D, sink: S, config: FocusConfig) -> Result<Self> {
        config.validate()?;
        let (pointer_tx, pointer_rx) = mpsc::channel();
        Ok(Self {
            source,
            detector,
            sink,
            tracker: FocusTracker::new(config.tracker),
            compositor: Compositor::new(&config.compositor),
            blur_intensity: config.compositor.blur_intensity,
            color_pop: config.compositor.color_pop,
            hit_test: config.hit_test,
            detections: Vec::new(),
            frame_size: None,
            last_timestamp: None,
            fps: FpsCounter::new(),
            stats: LoopStats::default(),
            pointer_tx,
            pointer_rx,
            stop: StopHandle::default(),
        })
    }

    /// Create a new loop with default configuration.
    pub fn with_default_config(source: V, detector: D, sink: S) -> Result<Self> {
        Self::new(source, detector, sink, FocusConfig::default())
    }

    /// Run one detect → track → plan → render sequence.
    ///
    /// Not-ready collaborators skip the tick before anything is drawn.
    /// Detector and sink failures are returned for the host to report; the
    /// core never retries them. A detector failure leaves the tracker and the
    /// hit-test boxes as they were. A sink failure happens after the frame has
    /// been tracked, so the tracker and the hit-test boxes already reflect the
    /// new frame; only `stats().rendered` is not counted.
    pub fn tick(&mut self, now_ms: f64) -> Result<TickOutcome> {
        self.stats.ticks += 1;
        self.fps.tick(now_ms);
        self.drain_pointer_queue();

        match self.source.status() {
            SourceStatus::Stopped => {
                debug!("video source stopped");
                return Ok(TickOutcome::Stopped);
            }
            SourceStatus::NotReady => return Ok(self.skip(SkipReason::SourceNotReady)),
            SourceStatus::Ready => {}
        }
        if !self.detector.is_ready() {
            return Ok(self.skip(SkipReason::DetectorNotReady));
        }

        let timestamp_ms = self.monotonic_timestamp(now_ms);
        let frame = self.source.frame();
        let detections = self
            .detector
            .detect(&frame, timestamp_ms)
            .map_err(|e| Error::Detector(Box::new(e)))?;

        let transition = self.tracker.update(&detections);
        let region = self.tracker.region();
        let plan = self.compositor.plan_in_frame(
            region.as_ref(),
            self.blur_intensity,
            self.color_pop,
            frame.width,
            frame.height,
        );
        let overlays = compositor::annotate(&detections, region.as_ref());

        // Hit-testing must see the boxes the tracker just matched, drawn or not
        self.frame_size = Some((frame.width, frame.height));
        self.detections = detections;

        self.sink
            .render(&frame, &plan, &overlays)
            .map_err(|e| Error::Render(Box::new(e)))?;
        self.stats.rendered += 1;

        Ok(TickOutcome::Rendered { transition, plan })
    }

    /// Tick on every `clock` slot until the source stops or `stop_handle()` fires.
    ///
    /// Cancellation only stops re-arming; the tick in progress always completes.
    pub fn run<C: FrameClock>(&mut self, clock: &mut C) -> Result<LoopStats> {
        info!("frame loop started");
        while !self.stop.is_stopped() {
            let now_ms = clock.next_frame();
            if let TickOutcome::Stopped = self.tick(now_ms)? {
                break;
            }
        }
        info!(
            ticks = self.stats.ticks,
            rendered = self.stats.rendered,
            skipped = self.stats.skipped,
            "frame loop stopped"
        );
        Ok(self.stats)
    }

    /// Retarget focus to the detection under the pointer.
    ///
    /// Hit-tests against the latest frame's detections. Returns the newly
    /// tracked region, or `None` (state untouched) on a miss.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Rect> {
        let (frame_width, frame_height) = self.frame_size?;
        let geometry = DisplayGeometry {
            display: event.display,
            frame_width,
            frame_height,
            mirrored: self.hit_test.mirrored,
        };
        let hit = hit_test::hit_test(
            event.client_x,
            event.client_y,
            &self.detections,
            &geometry,
            self.hit_test.inflate,
        );
        match hit {
            Some(region) => self.tracker.user_select(region),
            None => trace!(x = event.client_x, y = event.client_y, "pointer missed every box"),
        }
        hit
    }

    /// Queue for pointer events produced on another thread.
    pub fn pointer_sender(&self) -> Sender<PointerEvent> {
        self.pointer_tx.clone()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> TrackState {
        self.tracker.state()
    }

    pub fn tracker(&self) -> &FocusTracker {
        &self.tracker
    }

    pub fn deselect(&mut self) {
        self.tracker.deselect();
    }

    /// Clear tracking after a camera reset or device switch.
    pub fn reset_tracking(&mut self) {
        self.tracker.reset();
        self.detections.clear();
        self.frame_size = None;
    }

    pub fn set_auto_track(&mut self, enabled: bool) {
        self.tracker.set_auto_track(enabled);
    }

    pub fn set_color_pop(&mut self, enabled: bool) {
        self.color_pop = enabled;
    }

    /// Negative or non-finite intensities are treated as zero.
    pub fn set_blur_intensity(&mut self, intensity: f32) {
        self.blur_intensity = if intensity.is_finite() {
            intensity.max(0.0)
        } else {
            0.0
        };
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the underlying video source.
    pub fn source_mut(&mut self) -> &mut V {
        &mut self.source
    }

    fn skip(&mut self, reason: SkipReason) -> TickOutcome {
        trace!(?reason, "tick skipped");
        self.stats.skipped += 1;
        TickOutcome::Skipped(reason)
    }

    fn drain_pointer_queue(&mut self) {
        while let Ok(event) = self.pointer_rx.try_recv() {
            self.handle_pointer(event);
        }
    }

    fn monotonic_timestamp(&mut self, now_ms: f64) -> f64 {
        let ts = match self.last_timestamp {
            Some(last) if now_ms < last => {
                warn!(now_ms, last, "clock went backwards; clamping detector timestamp");
                last
            }
            _ => now_ms,
        };
        self.last_timestamp = Some(ts);
        ts
    }
}
