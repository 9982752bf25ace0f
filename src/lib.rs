//! Single-subject focus tracking for live video.
//!
//! Each frame, the tracked region is carried forward by overlap with the
//! detector's boxes (or seeded from the largest box when auto-track is on),
//! and a declarative two-layer [`DrawPlan`] keeps that region sharp over a
//! blurred, darkened background. A pointer on the displayed feed retargets
//! the subject.

pub mod compositor;
pub mod config;
pub mod error;
pub mod integration;
pub mod tracker;

pub use compositor::{Compositor, CompositorConfig, DrawPlan, Filter, Overlay};
pub use config::FocusConfig;
pub use error::{Error, Result};
pub use integration::{
    DetectionBuilder, DetectionSource, DisplayGeometry, Frame, FrameClock, FrameLoop,
    PointerEvent, RenderSink, SourceStatus, StopHandle, TickOutcome, VideoSource,
};
pub use tracker::{
    Detection, FocusTracker, Rect, SelectionPolicy, TrackState, TrackerConfig, Transition,
    overlap_ratio, select_primary,
};
