// Buffer decoding for playback sessions

use minimp3::{Decoder as Mp3Decoder, Error as Mp3Error, Frame};
use std::time::Duration;

use crate::models::FileType;
use crate::utils::errors::PlaybackError;

/// Interleaved PCM ready to hand to the output sink
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl DecodedAudio {
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 || self.channels == 0 {
            return Duration::ZERO;
        }
        let frames = self.samples.len() as u64 / self.channels as u64;
        Duration::from_millis(frames * 1000 / self.sample_rate as u64)
    }
}

/// Decode a complete in-memory buffer according to its declared format
pub fn decode_buffer(buffer: &[u8], format: FileType) -> Result<DecodedAudio, PlaybackError> {
    match format {
        FileType::Mp3 => decode_mp3(buffer),
    }
}

fn decode_mp3(buffer: &[u8]) -> Result<DecodedAudio, PlaybackError> {
    let mut decoder = Mp3Decoder::new(buffer);
    let mut samples: Vec<i16> = Vec::new();
    let mut format: Option<(u32, u16)> = None;

    loop {
        match decoder.next_frame() {
            Ok(Frame {
                data,
                sample_rate,
                channels,
                ..
            }) => {
                if format.is_none() {
                    format = Some((sample_rate as u32, channels as u16));
                }
                samples.extend_from_slice(&data);
            }
            // Tags and junk between frames
            Err(Mp3Error::SkippedData) => continue,
            Err(Mp3Error::Eof) | Err(Mp3Error::InsufficientData) => break,
            Err(Mp3Error::Io(e)) => return Err(PlaybackError::Decoder(e.to_string())),
        }
    }

    match format {
        Some((sample_rate, channels)) if !samples.is_empty() && sample_rate > 0 && channels > 0 => {
            Ok(DecodedAudio {
                samples,
                sample_rate,
                channels,
            })
        }
        _ => Err(PlaybackError::Decoder(format!(
            "no mp3 frames in {} byte buffer",
            buffer.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_buffer_is_rejected() {
        let result = decode_buffer(&[0u8; 64], FileType::Mp3);
        assert!(matches!(result, Err(PlaybackError::Decoder(_))));
    }

    #[test]
    fn empty_buffer_is_rejected() {
        assert!(matches!(
            decode_buffer(&[], FileType::Mp3),
            Err(PlaybackError::Decoder(_))
        ));
    }

    #[test]
    fn duration_follows_sample_count() {
        let audio = DecodedAudio {
            samples: vec![0; 44_100 * 2],
            sample_rate: 44_100,
            channels: 2,
        };
        assert_eq!(audio.duration(), Duration::from_secs(1));
    }
}
