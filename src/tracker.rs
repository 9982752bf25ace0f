mod focus_tracker;
mod matching;
mod rect;
mod selector;
mod track_state;

pub use focus_tracker::{DEFAULT_MATCH_THRESH, FocusTracker, TrackerConfig};
pub use matching::{Detection, Match, best_match};
pub use rect::{Rect, overlap_ratio};
pub use selector::{SelectionPolicy, select_primary};
pub use track_state::{TrackState, Transition};
