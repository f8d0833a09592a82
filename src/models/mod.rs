// Data models for audio stream documents

pub mod playlist;
pub mod responses;
pub mod track;

// Re-export commonly used types
pub use playlist::Playlist;
pub use responses::{FetchRequest, StreamResponse};
pub use track::{artists_label, AudioDocument, FileType, TrackId};
