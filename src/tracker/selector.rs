//! Primary-subject selection policies.

use serde::{Deserialize, Serialize};

use crate::tracker::matching::Detection;
use crate::tracker::rect::Rect;

/// Policy used to pick a subject when none can be carried forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// The detection covering the most pixels
    #[default]
    LargestArea,
}

impl SelectionPolicy {
    /// Pick a region from `detections`, or `None` when the set is empty.
    ///
    /// Ties resolve to the first maximal element in slice order. Detection
    /// order is detector-defined, so this is deterministic per frame but not
    /// stable across detector runs.
    pub fn select(&self, detections: &[Detection]) -> Option<Rect> {
        match self {
            SelectionPolicy::LargestArea => select_primary(detections),
        }
    }
}

/// Return the box of the largest-area detection.
pub fn select_primary(detections: &[Detection]) -> Option<Rect> {
    let mut best: Option<&Detection> = None;
    for det in detections {
        match best {
            Some(b) if det.bbox.area() <= b.bbox.area() => {}
            _ => best = Some(det),
        }
    }
    best.map(|d| d.bbox)
}
