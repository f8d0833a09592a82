use super::TrackId;
use crate::utils::errors::ConfigError;

/// Fixed, non-empty track order for a session. Navigation wraps in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<TrackId>,
}

impl Playlist {
    pub fn new(tracks: Vec<TrackId>) -> Result<Self, ConfigError> {
        if tracks.is_empty() {
            return Err(ConfigError::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Build from a comma separated list, ignoring blank entries
    pub fn parse(list: &str) -> Result<Self, ConfigError> {
        let tracks = list
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(TrackId::from)
            .collect();
        Self::new(tracks)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    // Always false once constructed
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[TrackId] {
        &self.tracks
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    pub fn previous_index(&self, index: usize) -> usize {
        let len = self.tracks.len();
        (index % len + len - 1) % len
    }
}
