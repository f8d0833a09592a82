use super::{AudioDocument, TrackId};
use serde::{Deserialize, Serialize};

/// Body of a stream request. Built fresh for every fetch.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    #[serde(rename = "documentID")]
    pub track_id: TrackId,
}

impl FetchRequest {
    pub fn new(track_id: TrackId) -> Self {
        Self { track_id }
    }
}

/// Document metadata plus its encoded audio bytes
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StreamResponse {
    pub document: AudioDocument,
    #[serde(rename = "audioBuffer", with = "base64_bytes")]
    pub audio_buffer: Vec<u8>,
    #[serde(rename = "audioBufferSize")]
    pub audio_buffer_size: i64,
}

impl StreamResponse {
    /// Wrap a buffer, filling in the declared size from its length
    pub fn new(document: AudioDocument, audio_buffer: Vec<u8>) -> Self {
        let audio_buffer_size = audio_buffer.len() as i64;
        Self {
            document,
            audio_buffer,
            audio_buffer_size,
        }
    }
}

// Byte arrays travel as standard base64 strings
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
