use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::time::{Duration, Instant};

use crate::models::FileType;
use crate::utils::errors::PlaybackError;
use crate::utils::media::core::decode_buffer;
use crate::utils::media::engine::MediaEngine;

/// One loaded track: decoded samples queued on a sink, starting paused
pub struct AudioPlayer {
    sink: Sink,
    total_duration: Duration,
    start_time: Instant,
    start_position: Duration,
    paused_at: Option<Duration>,
}

impl AudioPlayer {
    pub fn new(
        stream_handle: &OutputStreamHandle,
        buffer: &[u8],
        format: FileType,
    ) -> Result<Self, PlaybackError> {
        let audio = decode_buffer(buffer, format)?;
        let total_duration = audio.duration();
        log::info!(
            "[AudioPlayer] Decoded {} KB of {} ({} Hz, {} ch, {:?})",
            buffer.len() / 1024,
            format,
            audio.sample_rate,
            audio.channels,
            total_duration
        );

        let sink = Sink::try_new(stream_handle).map_err(|e| PlaybackError::Output(e.to_string()))?;
        sink.pause();
        sink.append(SamplesBuffer::new(
            audio.channels,
            audio.sample_rate,
            audio.samples,
        ));

        Ok(Self {
            sink,
            total_duration,
            start_time: Instant::now(),
            start_position: Duration::ZERO,
            paused_at: Some(Duration::ZERO),
        })
    }

    pub fn pause(&mut self) {
        if !self.sink.is_paused() {
            self.paused_at = Some(self.get_position());
            self.sink.pause();
            log::debug!("[AudioPlayer] Paused at {:?}", self.paused_at);
        }
    }

    pub fn resume(&mut self) {
        if self.sink.is_paused() {
            if let Some(paused) = self.paused_at {
                self.start_position = paused;
                self.start_time = Instant::now();
                log::debug!("[AudioPlayer] Resuming from {:?}", paused);
            }
            self.sink.play();
            self.paused_at = None;
        }
    }

    pub fn stop(&mut self) {
        log::debug!("[AudioPlayer] Stopping playback");
        self.sink.stop();
    }

    pub fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }

    pub fn get_position(&self) -> Duration {
        if let Some(paused) = self.paused_at {
            paused
        } else {
            self.start_position
                .saturating_add(self.start_time.elapsed())
                .min(self.total_duration)
        }
    }
}

/// Playback engine on the default audio device.
///
/// The output stream is opened on first load and reused for every later
/// session. rodio streams are bound to the thread that opened them, so the
/// engine stays with the controller's owner thread.
#[derive(Default)]
pub struct RodioEngine {
    output: Option<(OutputStream, OutputStreamHandle)>,
    player: Option<AudioPlayer>,
}

impl RodioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn output_handle(&mut self) -> Result<&OutputStreamHandle, PlaybackError> {
        if self.output.is_none() {
            let output =
                OutputStream::try_default().map_err(|e| PlaybackError::Output(e.to_string()))?;
            log::info!("[AudioPlayer] Opened default audio output");
            self.output = Some(output);
        }
        match &self.output {
            Some((_, handle)) => Ok(handle),
            None => Err(PlaybackError::Output("audio output not initialised".to_string())),
        }
    }
}

impl MediaEngine for RodioEngine {
    fn load(&mut self, buffer: &[u8], format: FileType) -> Result<(), PlaybackError> {
        // Cleanup old player first to free memory
        self.stop();
        let player = {
            let handle = self.output_handle()?;
            AudioPlayer::new(handle, buffer, format)?
        };
        self.player = Some(player);
        Ok(())
    }

    fn play(&mut self) -> Result<bool, PlaybackError> {
        let player = self.player.as_mut().ok_or(PlaybackError::NoSongLoaded)?;
        player.resume();
        Ok(player.is_playing())
    }

    fn pause(&mut self) {
        if let Some(p) = self.player.as_mut() {
            p.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(mut p) = self.player.take() {
            p.stop();
        }
    }

    fn has_session(&self) -> bool {
        self.player.is_some()
    }
}
