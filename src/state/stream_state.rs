use std::fmt;

use crate::models::TrackId;

/// Machine state owned by the stream controller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// No track loaded, no session
    #[default]
    Idle,
    /// Fetch in flight for the current index
    Loading,
    /// Session loaded and audible
    Streaming,
    /// Session loaded, suspended
    Paused,
    /// Last operation failed; session discarded
    Error(String),
}

impl ControllerState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ControllerState::Loading)
    }

    /// Whether a playback session may exist in this state
    pub fn has_session(&self) -> bool {
        matches!(self, ControllerState::Streaming | ControllerState::Paused)
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerState::Idle => f.write_str("idle"),
            ControllerState::Loading => f.write_str("loading"),
            ControllerState::Streaming => f.write_str("streaming"),
            ControllerState::Paused => f.write_str("paused"),
            ControllerState::Error(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// Projection the presentation layer renders from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub state: ControllerState,
    pub title: String,
    pub artists: String,
    pub index: usize,
    pub track_id: TrackId,
}

impl fmt::Display for NowPlaying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] #{} ({}) {} - {}",
            self.state, self.index, self.track_id, self.title, self.artists
        )
    }
}
