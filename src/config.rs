//! Tunable constants grouped into one deserializable document.
//!
//! Every section defaults field-by-field, so `{}` is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compositor::CompositorConfig;
use crate::error::Result;
use crate::integration::HitTestConfig;
use crate::tracker::TrackerConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    pub tracker: TrackerConfig,
    pub compositor: CompositorConfig,
    pub hit_test: HitTestConfig,
}

impl FocusConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: FocusConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.tracker.validate()?;
        self.compositor.validate()?;
        self.hit_test.validate()
    }
}
