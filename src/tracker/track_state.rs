use crate::tracker::rect::Rect;

/// Focus state: either no subject, or exactly one tracked region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackState {
    /// No subject is tracked
    #[default]
    Idle,
    /// A subject is tracked at the given region
    Locked(Rect),
}

impl TrackState {
    pub fn region(&self) -> Option<Rect> {
        match self {
            TrackState::Idle => None,
            TrackState::Locked(region) => Some(*region),
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, TrackState::Locked(_))
    }
}

/// How a frame update moved the focus state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Identity carried forward; the region now follows the matched detection.
    Carried { ratio: f32 },
    /// A new subject was chosen by the auto-track policy.
    Seeded,
    /// The tracked subject had no match this frame and nothing replaced it.
    Lost,
    /// Nothing was tracked before or after the update.
    StayedIdle,
}
