//! Matching utilities for carrying a single subject across frames.

use serde::{Deserialize, Serialize};

use crate::tracker::rect::Rect;

/// Detection input for the tracker.
///
/// Produced fresh every frame by the external detector. The tracker only
/// ever keeps a copy of `bbox`, never the detection itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding box in source-frame pixels
    pub bbox: Rect,
    /// Class label reported by the detector
    pub label: String,
    /// Detection confidence score
    pub score: f32,
}

impl Detection {
    pub fn from_rect(bbox: Rect, score: f32) -> Self {
        Self {
            bbox,
            label: String::new(),
            score,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// The detection that best continues a tracked region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Index into the frame's detection slice
    pub index: usize,
    /// Overlap ratio between the tracked region and the detection
    pub ratio: f32,
}

/// Find the detection overlapping `region` the most.
///
/// Ties keep the first maximizer in slice order. Returns `None` only when
/// `detections` is empty; thresholding is left to the caller.
pub fn best_match(region: &Rect, detections: &[Detection]) -> Option<Match> {
    let mut best: Option<Match> = None;
    for (index, det) in detections.iter().enumerate() {
        let ratio = region.iou(&det.bbox);
        match best {
            Some(b) if ratio <= b.ratio => {}
            _ => best = Some(Match { index, ratio }),
        }
    }
    best
}
