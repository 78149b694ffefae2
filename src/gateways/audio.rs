//! Audio playback gateway.

use crate::cards::ClipId;

/// Fire-and-forget clip playback.
///
/// Calls never report completion. The session waits a fixed settle time
/// instead of listening for the clip to end.
pub trait AudioPlayer {
    /// Play a whole clip once.
    fn play_once(&mut self, clip: &ClipId);

    /// Play the `[start, end]` slice of a clip, in seconds.
    fn play_segment(&mut self, clip: &ClipId, start: f32, end: f32);
}
