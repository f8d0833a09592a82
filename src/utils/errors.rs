//! Error types for every layer of the stream client.
//!
//! Codec, transport and playback failures stay typed up to the controller,
//! which folds them into a `StreamError` and renders its `Display` as the
//! reason of the `Error` state.

/// Outbound serialization failure
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Unable to encode request: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a single HTTP fetch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid stream URL: {0}")]
    InvalidUrl(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Empty response from audio stream request")]
    EmptyResponse,

    #[error("Request timed out")]
    Timeout,

    /// The background worker could not run or vanished without a result
    #[error("Fetch worker failed: {0}")]
    Worker(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = e.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Connection(e.to_string())
        }
    }
}

/// Inbound payload could not be turned into a `StreamResponse`
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed stream response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Audio buffer size mismatch: declared {declared}, received {actual}")]
    SizeMismatch { declared: i64, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("No song loaded")]
    NoSongLoaded,

    #[error("Unable to decode audio: {0}")]
    Decoder(String),

    #[error("Audio output unavailable: {0}")]
    Output(String),
}

/// Any failure that moves the controller into its `Error` state
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Playlist must contain at least one track")]
    EmptyPlaylist,

    #[error("Invalid request timeout: {0}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_error_reason_is_the_inner_message() {
        let err: StreamError = TransportError::Status(404).into();
        assert_eq!(err.to_string(), "Server returned status 404");

        let err: StreamError = DecodeError::SizeMismatch {
            declared: 10,
            actual: 4,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Audio buffer size mismatch: declared 10, received 4"
        );
    }

    #[test]
    fn playback_errors_render_readable_reasons() {
        let err: StreamError = PlaybackError::NoSongLoaded.into();
        assert_eq!(err.to_string(), "No song loaded");
    }
}
