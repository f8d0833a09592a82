// Stream endpoint transport
use reqwest::{Client, Url};
use std::time::Duration;

use crate::utils::async_helper::{spawn_cancellable, FetchFuture, FetchHandle};
use crate::utils::errors::TransportError;

/// One POST per call, raw bytes back. No retry, no coalescing.
pub trait Transport: Send + Sync {
    /// Build the request future; nothing is sent until it is polled
    fn send(&self, url: &str, payload: Vec<u8>) -> FetchFuture;

    /// Run `send` on a background worker and hand back a cancellable handle
    fn fetch(&self, url: &str, payload: Vec<u8>) -> FetchHandle {
        spawn_cancellable(self.send(url, payload))
    }
}

/// reqwest-backed transport used against the real stream server
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: crate::utils::http::client(timeout),
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, url: &str, payload: Vec<u8>) -> FetchFuture {
        let client = self.client.clone();
        let url = url.to_string();

        Box::pin(async move {
            let url = Url::parse(&url)
                .map_err(|e| TransportError::InvalidUrl(format!("{} ({})", url, e)))?;

            log::debug!("[Transport] POST {} ({} bytes)", url, payload.len());

            let response = client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                log::warn!("[Transport] Stream server returned {}", status);
                return Err(TransportError::Status(status.as_u16()));
            }

            let body = response.bytes().await?;
            if body.is_empty() {
                return Err(TransportError::EmptyResponse);
            }

            log::debug!("[Transport] Received {} KB", body.len() / 1024);
            Ok(body.to_vec())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> HttpTransport {
        HttpTransport::new(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn posts_payload_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({ "documentID": "00" })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"{\"ok\":true}".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/", server.uri());
        let body = transport()
            .send(&url, br#"{"documentID":"00"}"#.to_vec())
            .await
            .expect("fetch");
        assert_eq!(body, b"{\"ok\":true}".to_vec());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = transport().send(&server.uri(), Vec::new()).await;
        assert_eq!(result, Err(TransportError::Status(500)));
    }

    #[tokio::test]
    async fn empty_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = transport().send(&server.uri(), Vec::new()).await;
        assert_eq!(result, Err(TransportError::EmptyResponse));
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_sending() {
        let result = transport().send("not a url", Vec::new()).await;
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"late".to_vec())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let result = HttpTransport::new(Duration::from_millis(200))
            .send(&server.uri(), Vec::new())
            .await;
        assert_eq!(result, Err(TransportError::Timeout));
    }

    #[tokio::test]
    async fn connection_refused_is_a_connection_error() {
        // Port 9 (discard) is not expected to accept HTTP connections locally
        let result = transport().send("http://127.0.0.1:9/", Vec::new()).await;
        assert!(matches!(result, Err(TransportError::Connection(_))));
    }
}
