//! Stream controller - the state machine between the presentation layer,
//! the stream server and the playback engine.
//!
//! All transitions happen on the thread that owns the controller. Fetches run
//! on background workers; their results are only applied from `poll()`.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::api::{Codec, StreamCodec, Transport};
use crate::config::Config;
use crate::constants::{NO_AUDIO_TITLE, SETTLE_POLL_MILLIS};
use crate::models::{artists_label, AudioDocument, FetchRequest, Playlist, StreamResponse, TrackId};
use crate::state::{BackgroundTasks, ControllerState, NowPlaying, PendingFetch};
use crate::utils::async_helper::{FetchResult, FetchStatus};
use crate::utils::errors::{StreamError, TransportError};
use crate::utils::media::MediaEngine;

type StreamCodecBox = Box<dyn Codec<Request = FetchRequest, Response = StreamResponse>>;

pub struct StreamController<E: MediaEngine> {
    stream_url: String,
    playlist: Playlist,
    current_index: usize,
    state: ControllerState,
    // Retained so a lost session can be rebuilt on resume
    current_song: Option<StreamResponse>,
    engine: E,
    transport: Box<dyn Transport>,
    codec: StreamCodecBox,
    tasks: BackgroundTasks,
    subscribers: Vec<Sender<NowPlaying>>,
}

impl<E: MediaEngine> StreamController<E> {
    pub fn new(
        stream_url: impl Into<String>,
        playlist: Playlist,
        engine: E,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            stream_url: stream_url.into(),
            playlist,
            current_index: 0,
            state: ControllerState::Idle,
            current_song: None,
            engine,
            transport,
            codec: Box::new(StreamCodec::new()),
            tasks: BackgroundTasks::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn from_config(config: &Config, engine: E, transport: Box<dyn Transport>) -> Self {
        Self::new(
            config.stream_url.clone(),
            config.playlist.clone(),
            engine,
            transport,
        )
    }

    /// Replace the wire codec
    pub fn with_codec(mut self, codec: StreamCodecBox) -> Self {
        self.codec = codec;
        self
    }

    // ========================================================================
    // Intents
    // ========================================================================

    /// Play/pause button: start, pause, resume or retry depending on state
    pub fn toggle(&mut self) {
        match self.state.clone() {
            ControllerState::Idle => self.begin_fetch(),
            ControllerState::Loading => {
                log::debug!(
                    "[StreamController] Toggle ignored, fetch for index {} still in flight",
                    self.current_index
                );
            }
            ControllerState::Streaming => {
                self.engine.pause();
                self.set_state(ControllerState::Paused);
            }
            ControllerState::Paused => self.resume(),
            ControllerState::Error(reason) => {
                log::info!(
                    "[StreamController] Retrying index {} after error: {}",
                    self.current_index,
                    reason
                );
                self.set_state(ControllerState::Idle);
                self.begin_fetch();
            }
        }
    }

    pub fn next(&mut self) {
        let index = self.playlist.next_index(self.current_index);
        self.jump_to(index);
    }

    pub fn previous(&mut self) {
        let index = self.playlist.previous_index(self.current_index);
        self.jump_to(index);
    }

    // ========================================================================
    // Completion handling
    // ========================================================================

    /// Apply a finished fetch, if any. Returns whether a transition happened.
    pub fn poll(&mut self) -> bool {
        let Some((index, generation, status)) = self.tasks.take_finished() else {
            return false;
        };

        if index != self.current_index
            || !self.tasks.is_latest(generation)
            || !self.state.is_loading()
        {
            log::warn!(
                "[StreamController] Discarding stale fetch #{} for index {} (now at {}, {})",
                generation,
                index,
                self.current_index,
                self.state
            );
            return false;
        }

        match status {
            FetchStatus::Done(result) => self.complete_fetch(generation, result),
            FetchStatus::Lost => self.fail(
                TransportError::Worker("fetch ended without a result".to_string()).into(),
            ),
            FetchStatus::Pending => return false,
        }
        true
    }

    /// Poll until the controller leaves `Loading` or `timeout` elapses.
    /// Returns whether it settled.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll();
            if !self.state.is_loading() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(SETTLE_POLL_MILLIS));
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> &TrackId {
        // current_index is always within the non-empty playlist
        &self.playlist.tracks()[self.current_index]
    }

    pub fn current_document(&self) -> Option<&AudioDocument> {
        self.current_song.as_ref().map(|song| &song.document)
    }

    /// Artist line for the current song, or the placeholder label
    pub fn current_artists(&self) -> String {
        match self.current_document() {
            Some(document) => document.artists_label(),
            None => artists_label(&[]),
        }
    }

    pub fn title(&self) -> String {
        match (&self.state, self.current_document()) {
            (ControllerState::Error(reason), _) => reason.clone(),
            (ControllerState::Streaming | ControllerState::Paused, Some(document)) => {
                document.title.clone()
            }
            _ => NO_AUDIO_TITLE.to_string(),
        }
    }

    pub fn now_playing(&self) -> NowPlaying {
        NowPlaying {
            state: self.state.clone(),
            title: self.title(),
            artists: self.current_artists(),
            index: self.current_index,
            track_id: self.current_track().clone(),
        }
    }

    /// Receive a `NowPlaying` after every transition
    pub fn subscribe(&mut self) -> Receiver<NowPlaying> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    fn jump_to(&mut self, index: usize) {
        self.tasks.cancel();
        self.engine.stop();
        self.current_song = None;
        log::info!(
            "[StreamController] Moving from index {} to {}",
            self.current_index,
            index
        );
        self.current_index = index;
        self.set_state(ControllerState::Idle);
        self.begin_fetch();
    }

    fn begin_fetch(&mut self) {
        let track_id = self.current_track().clone();
        let payload = match self.codec.encode(&FetchRequest::new(track_id.clone())) {
            Ok(p) => p,
            Err(e) => {
                self.fail(e.into());
                return;
            }
        };

        let generation = self.tasks.next_generation();
        log::info!(
            "[StreamController] Fetching track {} (index {}, fetch #{})",
            track_id,
            self.current_index,
            generation
        );
        let handle = self.transport.fetch(&self.stream_url, payload);
        self.tasks.start(PendingFetch {
            index: self.current_index,
            generation,
            handle,
        });
        self.set_state(ControllerState::Loading);
    }

    fn complete_fetch(&mut self, generation: u64, result: FetchResult) {
        match self.load_response(result) {
            Ok(()) => {
                if let Some(document) = self.current_document() {
                    log::info!(
                        "[StreamController] Fetch #{} ready: {}",
                        generation,
                        document.details()
                    );
                }
                self.set_state(ControllerState::Streaming);
            }
            Err(e) => self.fail(e),
        }
    }

    fn load_response(&mut self, result: FetchResult) -> Result<(), StreamError> {
        let bytes = result?;
        let response = self.codec.decode(&bytes)?;
        self.engine
            .load(&response.audio_buffer, response.document.file_type)?;
        let started = self.engine.play()?;
        if !started {
            log::warn!("[StreamController] Engine loaded but did not report playback");
        }
        self.current_song = Some(response);
        Ok(())
    }

    fn resume(&mut self) {
        match self.try_resume() {
            Ok(_) => self.set_state(ControllerState::Streaming),
            Err(e) => self.fail(e),
        }
    }

    fn try_resume(&mut self) -> Result<bool, StreamError> {
        self.ensure_session()?;
        Ok(self.engine.play()?)
    }

    // Rebuild the session from the retained buffer when the engine lost it
    fn ensure_session(&mut self) -> Result<(), StreamError> {
        if self.engine.has_session() {
            return Ok(());
        }
        if let Some(song) = &self.current_song {
            log::debug!("[StreamController] Reloading session for {}", song.document.track_id);
            self.engine
                .load(&song.audio_buffer, song.document.file_type)?;
        }
        Ok(())
    }

    fn fail(&mut self, error: StreamError) {
        log::error!(
            "[StreamController] Track {} failed: {}",
            self.current_track(),
            error
        );
        self.tasks.cancel();
        self.engine.stop();
        self.current_song = None;
        self.set_state(ControllerState::Error(error.to_string()));
    }

    fn set_state(&mut self, state: ControllerState) {
        if self.state != state {
            log::debug!("[StreamController] {} -> {}", self.state, state);
        }
        self.state = state;
        debug_assert!(
            self.state.has_session() || !self.engine.has_session(),
            "playback session outlived {}",
            self.state
        );
        self.publish();
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.now_playing();
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

impl<E: MediaEngine> Drop for StreamController<E> {
    fn drop(&mut self) {
        self.tasks.cancel();
        self.engine.stop();
    }
}
