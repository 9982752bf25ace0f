//! Video source contract.

/// Borrowed view of the current frame's pixels.
///
/// Pixels stay owned by the video source; the loop never copies them.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Raw pixel bytes (layout is defined by the source)
    pub data: &'a [u8],
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

/// Readiness of a video source at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// A frame is available
    Ready,
    /// Still starting up; the tick is skipped and retried next time
    NotReady,
    /// The source was stopped; the loop stops re-arming
    Stopped,
}

/// Trait for frame providers (camera, file decoder, test pattern).
pub trait VideoSource {
    fn status(&self) -> SourceStatus;

    /// The current frame. Only called after `status()` returned `Ready`.
    fn frame(&self) -> Frame<'_>;
}
