//! Integration module connecting external collaborators to the focus tracker.
//!
//! This module provides the traits a host implements (video source, detector,
//! render sink, frame clock), pointer hit-testing, and the cooperative frame
//! loop that ties them together.

mod builder;
mod detector;
mod fps;
mod pipeline;
mod video;

pub use builder::DetectionBuilder;
pub use detector::DetectionSource;
pub use fps::{FpsCounter, LoopStats};
pub use hit_test::{
    DEFAULT_HIT_INFLATE, DisplayGeometry, HitTestConfig, PointerEvent, hit_test,
};
pub use pipeline::{FrameClock, FrameLoop, RenderSink, SkipReason, StopHandle, TickOutcome};
pub use video::{Frame, SourceStatus, VideoSource};
