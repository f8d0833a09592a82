use reqwest::Client;
use std::time::Duration;

/// Build the HTTP client used for stream requests.
///
/// Falls back to a default client if the builder fails (TLS backend init), so
/// a misconfigured environment shows up as a request error instead of a panic.
pub fn client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("audio-stream/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("[Http] Falling back to default client: {}", e);
            Client::new()
        })
}
