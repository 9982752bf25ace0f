use serde::{Deserialize, Serialize};

use crate::tracker::{Detection, Rect, best_match};

/// Overlap at or above which a detection is drawn as the tracked one.
pub const OVERLAY_MATCH_THRESH: f32 = 0.9;

/// Outline/label annotation for one detection of the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub bbox: Rect,
    pub label: String,
    pub score: f32,
    pub is_tracked: bool,
}

/// Annotate every detection, flagging the tracked one by geometry alone.
///
/// Detectors assign no track identifiers, so "is this the tracked subject"
/// is re-derived each frame from overlap with the tracked region. At most
/// one overlay is flagged: the first best match, if it clears
/// [`OVERLAY_MATCH_THRESH`].
pub fn annotate(detections: &[Detection], region: Option<&Rect>) -> Vec<Overlay> {
    let tracked = region
        .and_then(|r| best_match(r, detections))
        .filter(|m| m.ratio >= OVERLAY_MATCH_THRESH)
        .map(|m| m.index);

    detections
        .iter()
        .enumerate()
        .map(|(i, d)| Overlay {
            bbox: d.bbox,
            label: d.label.clone(),
            score: d.score,
            is_tracked: tracked == Some(i),
        })
        .collect()
}
