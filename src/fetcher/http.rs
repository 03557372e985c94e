//! # HTTP Order Source
//!
//! Reads `GET {base}/orders/exhibitor/{display name}` from the exhibitor backend.
//! The display name is percent-encoded as a single path segment.

use crate::fetcher::{FetchError, OrderReport, OrderSource};
use crate::model::Identity;
use async_trait::async_trait;
use reqwest::{header, Client, Url};
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

#[derive(Clone)]
pub struct HttpOrderSource {
    config: HttpSourceConfig,
    base: Url,
    client: Client,
}

impl HttpOrderSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let base = Url::parse(config.base_url.trim()).map_err(|error| {
            FetchError::Configuration(format!("invalid base URL `{}`: {error}", config.base_url))
        })?;
        if base.cannot_be_a_base() {
            return Err(FetchError::Configuration(format!(
                "base URL `{}` cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| FetchError::Configuration(format!("failed to build HTTP client: {error}")))?;

        Ok(Self { config, base, client })
    }

    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }

    fn endpoint(&self, identity: &Identity) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| FetchError::Configuration("base URL cannot carry a path".to_string()))?;
            segments
                .pop_if_empty()
                .extend(["orders", "exhibitor", identity.display_name.as_str()]);
        }
        Ok(url)
    }

    fn transport_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.config.request_timeout)
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    #[instrument(skip(self, identity), fields(identity = %identity.id))]
    async fn fetch_orders(&self, identity: &Identity) -> Result<OrderReport, FetchError> {
        let url = self.endpoint(identity)?;
        debug!(%url, "Requesting orders");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| self.transport_error(error))?;

        let status = response.status();
        let body = response.text().await.map_err(|error| self.transport_error(error))?;

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|error| FetchError::MalformedResponse(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers exactly one request with `status_line` and `body`, then returns the
    /// raw request head it received.
    async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 2048];
            loop {
                let read = socket.read(&mut buffer).await.unwrap();
                request.extend_from_slice(&buffer[..read]);
                if read == 0 || request.windows(4).any(|window| window == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{address}/api"), handle)
    }

    fn source(base_url: String, timeout: Duration) -> HttpOrderSource {
        HttpOrderSource::new(HttpSourceConfig {
            base_url,
            request_timeout: timeout,
        })
        .unwrap()
    }

    fn techflow() -> Identity {
        Identity::new("tech-innovations", "TechFlow Innovations")
    }

    #[tokio::test]
    async fn test_fetch_decodes_backend_payload() {
        let body = serde_json::json!({
            "exhibitor": "TechFlow Innovations",
            "orders": [{
                "id": "ORD-2025-001",
                "booth_number": "A-245",
                "exhibitor_name": "TechFlow Innovations",
                "item": "Premium Booth Setup Package",
                "description": "Complete booth installation",
                "color": "White",
                "quantity": 1,
                "status": "out-for-delivery",
                "order_date": "June 14, 2025",
                "comments": "Rush delivery requested",
                "section": "Section A"
            }],
            "total_orders": 1,
            "delivered_orders": 0,
            "last_updated": "2025-06-14T09:30:00.123456"
        })
        .to_string();
        let (base_url, server) = serve_once("200 OK", body).await;

        let report = source(base_url, Duration::from_secs(5))
            .fetch_orders(&techflow())
            .await
            .unwrap();
        assert_eq!(report.orders.len(), 1);
        assert_eq!(report.last_updated, "2025-06-14T09:30:00.123456");

        let request = server.await.unwrap();
        assert!(
            request.starts_with("GET /api/orders/exhibitor/TechFlow%20Innovations HTTP/1.1"),
            "unexpected request: {request}"
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let (base_url, server) = serve_once("500 Internal Server Error", "{\"orders\": []}".to_string()).await;

        let error = source(base_url, Duration::from_secs(5))
            .fetch_orders(&techflow())
            .await
            .unwrap_err();
        assert!(matches!(error, FetchError::HttpStatus { status: 500, .. }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_undecodable_body_is_malformed() {
        let (base_url, server) = serve_once("200 OK", "<html>maintenance</html>".to_string()).await;

        let error = source(base_url, Duration::from_secs(5))
            .fetch_orders(&techflow())
            .await
            .unwrap_err();
        assert!(matches!(error, FetchError::MalformedResponse(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let error = source(format!("http://{address}/api"), Duration::from_secs(5))
            .fetch_orders(&techflow())
            .await
            .unwrap_err();
        assert!(matches!(error, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let timeout = Duration::from_millis(200);
        let error = source(format!("http://{address}/api"), timeout)
            .fetch_orders(&techflow())
            .await
            .unwrap_err();
        assert_eq!(error, FetchError::Timeout(timeout));
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let result = HttpOrderSource::new(HttpSourceConfig {
            base_url: "not a url".to_string(),
            request_timeout: Duration::from_secs(1),
        });
        assert!(matches!(result, Err(FetchError::Configuration(_))));
    }
}
