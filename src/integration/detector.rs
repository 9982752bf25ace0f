//! Trait for object detection backends.

use crate::integration::video::Frame;
use crate::tracker::Detection;

/// Trait for object detection backends.
///
/// Implement this trait to connect any detection model to the frame loop.
///
/// # Example
///
/// ```ignore
/// use focustrack_rs::{DetectionSource, Detection, Frame};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, frame: &Frame<'_>, timestamp_ms: f64) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Whether the model has finished loading. Ticks are skipped until it has.
    fn is_ready(&self) -> bool {
        true
    }

    /// Run inference on a frame and return detections.
    ///
    /// # Arguments
    /// * `frame` - Borrowed frame pixels and dimensions
    /// * `timestamp_ms` - Frame timestamp; never decreases between calls
    ///
    /// # Returns
    /// Detections in source-frame pixel coordinates. An empty vector is a
    /// valid result, not an error.
    fn detect(
        &mut self,
        frame: &Frame<'_>,
        timestamp_ms: f64,
    ) -> Result<Vec<Detection>, Self::Error>;
}
