//! Runtime configuration for the stream client

use std::time::Duration;

use crate::constants::{
    DEFAULT_PLAYLIST, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STREAM_URL, ENV_PLAYLIST,
    ENV_STREAM_URL, ENV_TIMEOUT_SECS,
};
use crate::models::{Playlist, TrackId};
use crate::utils::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub stream_url: String,
    pub playlist: Playlist,
    pub request_timeout: Duration,
}

impl Config {
    /// Load `.env` if present, then read overrides from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("[Config] Loaded {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("[Config] Ignoring unreadable .env file: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let stream_url = value(ENV_STREAM_URL)
            .map(|url| url.trim().to_string())
            .unwrap_or_else(|| DEFAULT_STREAM_URL.to_string());

        let playlist = match value(ENV_PLAYLIST) {
            Some(list) => Playlist::parse(&list)?,
            None => {
                let tracks = DEFAULT_PLAYLIST.iter().map(|id| TrackId::from(*id)).collect();
                Playlist::new(tracks)?
            }
        };

        let request_timeout = match value(ENV_TIMEOUT_SECS) {
            Some(secs) => {
                let parsed: u64 = secs
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(secs.clone()))?;
                if parsed == 0 {
                    return Err(ConfigError::InvalidTimeout(secs));
                }
                Duration::from_secs(parsed)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            stream_url,
            playlist,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = Config::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config.stream_url, "http://127.0.0.1:8080/");
        assert_eq!(config.playlist.len(), 4);
        assert_eq!(config.playlist.tracks()[0], TrackId::from("00"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));

        // Blank values fall back the same way unset ones do
        let blank = Config::from_lookup(lookup(&[("AUDIO_STREAM_PLAYLIST", "  ")]))
            .expect("config");
        assert_eq!(blank, config);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("AUDIO_STREAM_URL", "http://stream.local:9000/audio"),
            ("AUDIO_STREAM_PLAYLIST", "a,b"),
            ("AUDIO_STREAM_TIMEOUT_SECS", "5"),
        ]))
        .expect("config");
        assert_eq!(config.stream_url, "http://stream.local:9000/audio");
        assert_eq!(config.playlist.len(), 2);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            Config::from_lookup(lookup(&[("AUDIO_STREAM_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::InvalidTimeout("soon".to_string()))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("AUDIO_STREAM_TIMEOUT_SECS", "0")])),
            Err(ConfigError::InvalidTimeout("0".to_string()))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("AUDIO_STREAM_PLAYLIST", ",,")])),
            Err(ConfigError::EmptyPlaylist)
        );
    }
}
