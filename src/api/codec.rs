//! JSON wire codec for stream requests and responses.
//!
//! Each request/response pair gets its own `Codec` implementation, so the
//! controller never has to look at payload types at runtime.

use crate::models::{FetchRequest, FileType, StreamResponse};
use crate::utils::errors::{DecodeError, EncodeError};

/// Statically typed encoder/decoder for one request/response pair
pub trait Codec: Send + Sync {
    type Request;
    type Response;

    fn encode(&self, request: &Self::Request) -> Result<Vec<u8>, EncodeError>;
    fn decode(&self, payload: &[u8]) -> Result<Self::Response, DecodeError>;
}

/// Codec for `{documentID}` requests and document+buffer responses
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamCodec;

impl StreamCodec {
    pub fn new() -> Self {
        Self
    }

    /// Reverse encoder for responses, used by test servers and fixtures
    pub fn encode_response(&self, response: &StreamResponse) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(response)?)
    }
}

impl Codec for StreamCodec {
    type Request = FetchRequest;
    type Response = StreamResponse;

    fn encode(&self, request: &FetchRequest) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(request)?)
    }

    fn decode(&self, payload: &[u8]) -> Result<StreamResponse, DecodeError> {
        let response: StreamResponse = match serde_json::from_slice(payload) {
            Ok(r) => r,
            Err(e) => {
                if let Some(file_type) = unsupported_file_type(payload) {
                    return Err(DecodeError::UnsupportedFileType(file_type));
                }
                return Err(DecodeError::Malformed(e));
            }
        };

        let actual = response.audio_buffer.len();
        if response.audio_buffer_size != actual as i64 {
            log::warn!(
                "[Codec] Declared buffer size {} but received {} bytes",
                response.audio_buffer_size,
                actual
            );
            return Err(DecodeError::SizeMismatch {
                declared: response.audio_buffer_size,
                actual,
            });
        }

        Ok(response)
    }
}

/// Pull `document.fileType` out of a payload that failed typed parsing and
/// report it if it names a format we do not know.
fn unsupported_file_type(payload: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(payload).ok()?;
    let file_type = value.get("document")?.get("fileType")?.as_str()?;
    match file_type.parse::<FileType>() {
        Ok(_) => None,
        Err(unknown) => Some(unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AudioDocument, TrackId};
    use serde_json::json;

    fn sample_response() -> StreamResponse {
        StreamResponse::new(
            AudioDocument {
                track_id: TrackId::from("01"),
                artists: vec!["X".to_string(), "Y".to_string()],
                title: "Song A".to_string(),
                file_type: FileType::Mp3,
                storage_id: "song-a".to_string(),
            },
            vec![0xFF, 0xFB, 0x90, 0x00, 0x11],
        )
    }

    #[test]
    fn request_uses_document_id_field() {
        let payload = StreamCodec
            .encode(&FetchRequest::new(TrackId::from("02")))
            .expect("encode");
        let value: serde_json::Value = serde_json::from_slice(&payload).expect("json");
        assert_eq!(value, json!({ "documentID": "02" }));
    }

    #[test]
    fn decodes_wire_payload() {
        let payload = json!({
            "document": {
                "documentID": "00",
                "artists": [],
                "title": "Intro",
                "fileType": "mp3",
                "storageID": "intro"
            },
            "audioBuffer": "AQID",
            "audioBufferSize": 3
        });
        let response = StreamCodec
            .decode(payload.to_string().as_bytes())
            .expect("decode");
        assert_eq!(response.audio_buffer, vec![1, 2, 3]);
        assert_eq!(response.document.title, "Intro");
        assert!(response.document.artists.is_empty());
        assert_eq!(response.document.file_type, FileType::Mp3);
    }

    #[test]
    fn response_round_trip_is_stable() {
        let codec = StreamCodec::new();
        let first = codec
            .decode(&codec.encode_response(&sample_response()).expect("encode"))
            .expect("decode");
        let second = codec
            .decode(&codec.encode_response(&first).expect("re-encode"))
            .expect("re-decode");
        assert_eq!(first.document, second.document);
        assert_eq!(first, sample_response());
    }

    #[test]
    fn rejects_size_mismatch() {
        let mut response = sample_response();
        response.audio_buffer_size += 1;
        let payload = StreamCodec.encode_response(&response).expect("encode");
        match StreamCodec.decode(&payload) {
            Err(DecodeError::SizeMismatch { declared, actual }) => {
                assert_eq!(declared, 6);
                assert_eq!(actual, 5);
            }
            other => panic!("expected size mismatch, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_file_type() {
        let mut value = serde_json::to_value(sample_response()).expect("value");
        value["document"]["fileType"] = json!("flac");
        match StreamCodec.decode(value.to_string().as_bytes()) {
            Err(DecodeError::UnsupportedFileType(kind)) => assert_eq!(kind, "flac"),
            other => panic!("expected unsupported file type, got {:?}", other),
        }
    }

    #[test]
    fn rejects_missing_fields_and_garbage() {
        let mut value = serde_json::to_value(sample_response()).expect("value");
        value["document"]
            .as_object_mut()
            .expect("document object")
            .remove("title");
        assert!(matches!(
            StreamCodec.decode(value.to_string().as_bytes()),
            Err(DecodeError::Malformed(_))
        ));

        assert!(matches!(
            StreamCodec.decode(b"not json at all"),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(
            StreamCodec.decode(b""),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_invalid_base64_buffer() {
        let mut value = serde_json::to_value(sample_response()).expect("value");
        value["audioBuffer"] = json!("***");
        assert!(matches!(
            StreamCodec.decode(value.to_string().as_bytes()),
            Err(DecodeError::Malformed(_))
        ));
    }
}
