use crate::models::FileType;
use crate::utils::errors::PlaybackError;

/// Local playback capability driven by the stream controller.
///
/// An engine holds at most one session. `load` replaces whatever was loaded
/// before; `stop` drops it.
pub trait MediaEngine {
    /// Build a paused session from encoded bytes and their declared format
    fn load(&mut self, buffer: &[u8], format: FileType) -> Result<(), PlaybackError>;

    /// Start or resume the session. Returns whether playback is now running.
    fn play(&mut self) -> Result<bool, PlaybackError>;

    /// Suspend the session; no-op without one
    fn pause(&mut self);

    /// Discard the session; idempotent
    fn stop(&mut self);

    fn has_session(&self) -> bool;
}
