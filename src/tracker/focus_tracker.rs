//! Single-subject focus tracker.
//!
//! Identity is decided purely by geometric continuity: each frame the tracked
//! region is re-matched against the current detections and, on a match,
//! replaced by the matched box. No appearance model and no motion prediction.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::tracker::matching::{self, Detection};
use crate::tracker::rect::Rect;
use crate::tracker::selector::SelectionPolicy;
use crate::tracker::track_state::{TrackState, Transition};

/// Minimum overlap ratio for a detection to continue the tracked subject.
pub const DEFAULT_MATCH_THRESH: f32 = 0.2;

/// Configuration for the FocusTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// A match must strictly exceed this overlap ratio
    pub match_thresh: f32,
    /// Seed a new subject when nothing can be carried forward
    pub auto_track: bool,
    /// How the auto-track subject is chosen
    pub policy: SelectionPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            match_thresh: DEFAULT_MATCH_THRESH,
            auto_track: true,
            policy: SelectionPolicy::default(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.match_thresh.is_finite() || !(0.0..1.0).contains(&self.match_thresh) {
            return Err(Error::InvalidConfig {
                field: "tracker.match_thresh",
                reason: format!("must be in [0, 1), got {}", self.match_thresh),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    state: TrackState,
    config: TrackerConfig,
}

impl FocusTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            state: TrackState::Idle,
            config,
        }
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    pub fn region(&self) -> Option<Rect> {
        self.state.region()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn set_auto_track(&mut self, enabled: bool) {
        self.config.auto_track = enabled;
    }

    /// Advance the focus state with one frame's detections.
    pub fn update(&mut self, detections: &[Detection]) -> Transition {
        let was_locked = self.state.is_locked();

        if let TrackState::Locked(region) = self.state {
            if let Some(m) = matching::best_match(&region, detections) {
                if m.ratio > self.config.match_thresh {
                    let next = detections[m.index].bbox;
                    debug!(ratio = m.ratio, x = next.x, y = next.y, "subject carried forward");
                    self.state = TrackState::Locked(next);
                    return Transition::Carried { ratio: m.ratio };
                }
            }
        }

        if self.config.auto_track {
            if let Some(seed) = self.config.policy.select(detections) {
                debug!(
                    x = seed.x,
                    y = seed.y,
                    width = seed.width,
                    height = seed.height,
                    "auto-track seeded subject"
                );
                self.state = TrackState::Locked(seed);
                return Transition::Seeded;
            }
        }

        self.state = TrackState::Idle;
        if was_locked {
            debug!(detections = detections.len(), "subject lost");
            Transition::Lost
        } else {
            Transition::StayedIdle
        }
    }

    /// Force focus onto `region`, regardless of the current state.
    ///
    /// Only reachable through a pointer hit, so `region` is always a box of
    /// the latest frame's detections.
    pub(crate) fn user_select(&mut self, region: Rect) {
        info!(
            x = region.x,
            y = region.y,
            width = region.width,
            height = region.height,
            "user retargeted subject"
        );
        self.state = TrackState::Locked(region);
    }

    /// Explicitly drop the current subject.
    pub fn deselect(&mut self) {
        if self.state.is_locked() {
            info!("subject deselected");
        }
        self.state = TrackState::Idle;
    }

    /// Clear tracking, e.g. after a camera reset or device switch.
    pub fn reset(&mut self) {
        info!("tracker reset");
        self.state = TrackState::Idle;
    }
}
