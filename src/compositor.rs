//! Compositing decisions: which part of the frame stays sharp, and how the
//! rest is treated. Pixel work belongs to the presentation layer.

mod overlay;
mod plan;

pub use overlay::{OVERLAY_MATCH_THRESH, Overlay, annotate};
pub use plan::{
    ClippedLayer, Compositor, CompositorConfig, DEFAULT_BACKGROUND_BRIGHTNESS,
    DEFAULT_BLUR_INTENSITY, DEFAULT_CLIP_MARGIN, DrawPlan, Filter, Layer,
};
