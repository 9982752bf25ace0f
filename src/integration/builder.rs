//! Assembling [`Detection`]s from raw detector output.

use crate::tracker::{Detection, Rect};

/// Collects one detector result field by field.
///
/// Detector backends report boxes as corners, top-left + size, or center +
/// size; all three end up as the same TLWH [`Rect`]. An unset box is empty
/// and never matches anything.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    bbox: Rect,
    label: String,
    score: f32,
}

impl DetectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Corner form: top-left `(x1, y1)`, bottom-right `(x2, y2)`.
    pub fn tlbr(self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.with_bbox(Rect::from_tlbr(x1, y1, x2, y2))
    }

    /// Top-left corner plus size.
    pub fn tlwh(self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.with_bbox(Rect::new(x, y, w, h))
    }

    /// Center plus size.
    pub fn xywh(self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.with_bbox(Rect::new(cx - w / 2.0, cy - h / 2.0, w, h))
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    pub fn build(self) -> Detection {
        Detection::from_rect(self.bbox, self.score).with_label(self.label)
    }

    fn with_bbox(mut self, bbox: Rect) -> Self {
        self.bbox = bbox;
        self
    }
}
