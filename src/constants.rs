//! Application constants and configuration values

// === Endpoint & Playlist ===
pub const DEFAULT_STREAM_URL: &str = "http://127.0.0.1:8080/";
pub const DEFAULT_PLAYLIST: &[&str] = &["00", "01", "02", "03"];
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Environment keys read by `Config::from_env`
pub const ENV_STREAM_URL: &str = "AUDIO_STREAM_URL";
pub const ENV_PLAYLIST: &str = "AUDIO_STREAM_PLAYLIST";
pub const ENV_TIMEOUT_SECS: &str = "AUDIO_STREAM_TIMEOUT_SECS";

// === Presentation Labels ===
pub const NO_AUDIO_TITLE: &str = "No Audio Streaming";
pub const ARTISTS_PLACEHOLDER: &str = "Artists";
pub const ARTIST_SEPARATOR: &str = ", ";

// === Owner Loop ===
pub const POLL_INTERVAL_MILLIS: u64 = 50;
pub const SETTLE_POLL_MILLIS: u64 = 5;
