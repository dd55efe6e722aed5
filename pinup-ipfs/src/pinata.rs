//! Pinata client implementation.
//!
//! Two calls, both authenticated with the key/secret header pair:
//! `pinFileToIPFS` (multipart, one `file` part) and `pinJSONToIPFS` (raw JSON).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use url::Url;

use pinup_core::constants::{
    API_KEY_HEADER, FILE_CONTENT_TYPE, FILE_FIELD, PIN_FILE_PATH, PIN_JSON_PATH,
    SECRET_API_KEY_HEADER,
};
use pinup_core::error::{PinupError, Result};
use pinup_core::traits::Pinner;
use pinup_core::types::PinResult;

use crate::config::PinataConfig;
use crate::response::{first_value, ErrorBody};

/// Pinata pinning client.
///
/// Immutable after construction; safe to reuse across any number of calls.
pub struct PinataClient {
    api_key: String,
    secret_api_key: String,
    pin_file_url: Url,
    pin_json_url: Url,
    http_client: reqwest::Client,
}

impl PinataClient {
    /// Creates a client from the given configuration.
    ///
    /// Fails only if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &PinataConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        let http_client = builder
            .build()
            .map_err(|e| PinupError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            secret_api_key: config.secret_api_key.clone(),
            pin_file_url: config.endpoint(PIN_FILE_PATH)?,
            pin_json_url: config.endpoint(PIN_JSON_PATH)?,
            http_client,
        })
    }

    /// Pins the contents of `reader` as a file named `filename`.
    ///
    /// The reader is drained into the request body but not closed.
    #[instrument(skip(self, cancel, reader))]
    pub async fn pin_file<R>(
        &self,
        cancel: &CancellationToken,
        reader: &mut R,
        filename: &str,
    ) -> Result<PinResult>
    where
        R: AsyncRead + Unpin + Send + ?Sized,
    {
        if cancel.is_cancelled() {
            return Err(PinupError::Cancelled);
        }

        // A stalled reader must not outlive the token
        let mut contents = Vec::new();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PinupError::Cancelled),
            read = reader.read_to_end(&mut contents) => { read?; }
        }
        debug!(bytes = contents.len(), "Read file contents");

        let file_part = Part::bytes(contents)
            .file_name(filename.to_string())
            .mime_str(FILE_CONTENT_TYPE)
            .map_err(|e| PinupError::Config(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, file_part);

        let request = self
            .authorized(self.pin_file_url.clone())
            .multipart(form);

        let result = self.execute(cancel, request).await?;
        debug!(cid = %result.content_hash, size = result.size_bytes, "Pinned file");
        Ok(result)
    }

    /// Pins `data` as a JSON document.
    #[instrument(skip(self, cancel, data))]
    pub async fn pin_json<T>(&self, cancel: &CancellationToken, data: &T) -> Result<PinResult>
    where
        T: Serialize + Sync + ?Sized,
    {
        if cancel.is_cancelled() {
            return Err(PinupError::Cancelled);
        }

        let body = serde_json::to_vec(data)?;

        let request = self
            .authorized(self.pin_json_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        let result = self.execute(cancel, request).await?;
        debug!(cid = %result.content_hash, size = result.size_bytes, "Pinned JSON");
        Ok(result)
    }

    fn authorized(&self, url: Url) -> RequestBuilder {
        self.http_client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(SECRET_API_KEY_HEADER, &self.secret_api_key)
    }

    /// Sends the request, racing it against the cancellation token, and
    /// decodes the response.
    async fn execute(&self, cancel: &CancellationToken, request: RequestBuilder) -> Result<PinResult> {
        let exchange = async {
            let response = request.send().await.map_err(transport_error)?;
            let status = response.status();
            let body = response.bytes().await.map_err(transport_error)?;
            Ok::<_, PinupError>((status, body))
        };

        let (status, body) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PinupError::Cancelled),
            exchanged = exchange => exchanged?,
        };

        if status != StatusCode::OK {
            let err = ErrorBody::parse(&body).into_error(status.as_u16());
            warn!(status = status.as_u16(), error = %err, "Pinata rejected request");
            return Err(err);
        }

        first_value(&body).map_err(PinupError::Decode)
    }
}

fn transport_error(e: reqwest::Error) -> PinupError {
    if e.is_builder() {
        PinupError::Config(e.to_string())
    } else {
        PinupError::Transport(e.to_string())
    }
}

#[async_trait]
impl Pinner for PinataClient {
    async fn pin_file(
        &self,
        cancel: &CancellationToken,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        filename: &str,
    ) -> Result<PinResult> {
        PinataClient::pin_file(self, cancel, reader, filename).await
    }

    async fn pin_json_value(
        &self,
        cancel: &CancellationToken,
        data: &serde_json::Value,
    ) -> Result<PinResult> {
        self.pin_json(cancel, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Reader that never produces data, like a FIFO with no writer.
    struct Stalled;

    impl AsyncRead for Stalled {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut tokio::io::ReadBuf<'_>,
        ) -> Poll<std::io::Result<()>> {
            Poll::Pending
        }
    }

    #[test]
    fn test_new_resolves_endpoints() {
        let config = PinataConfig::new("k", "s").with_api_url("http://localhost:9000");
        let client = PinataClient::new(&config).unwrap();

        assert_eq!(client.pin_file_url.as_str(), "http://localhost:9000/pinning/pinFileToIPFS");
        assert_eq!(client.pin_json_url.as_str(), "http://localhost:9000/pinning/pinJSONToIPFS");
    }

    #[test]
    fn test_new_default_endpoints() {
        let client = PinataClient::new(&PinataConfig::new("k", "s")).unwrap();
        assert_eq!(
            client.pin_file_url.as_str(),
            "https://api.pinata.cloud/pinning/pinFileToIPFS"
        );
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = PinataConfig::new("k", "s").with_api_url("::nope::");
        assert!(matches!(PinataClient::new(&config), Err(PinupError::Config(_))));
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_request() {
        // Unroutable address: a request would fail as transport, not as cancelled
        let config = PinataConfig::new("k", "s").with_api_url("http://127.0.0.1:9");
        let client = PinataClient::new(&config).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut reader: &[u8] = b"hello";
        let err = client.pin_file(&cancel, &mut reader, "a.txt").await.unwrap_err();
        assert!(matches!(err, PinupError::Cancelled));
        // Stream untouched
        assert_eq!(reader, b"hello");

        let err = client
            .pin_json(&cancel, &serde_json::json!({ "a": 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, PinupError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_aborts_stalled_read() {
        let client = PinataClient::new(&PinataConfig::new("k", "s")).unwrap();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(3),
            client.pin_file(&cancel, &mut Stalled, "fifo"),
        )
        .await
        .expect("pin_file still blocked after cancellation");

        let err = result.unwrap_err();
        assert!(matches!(err, PinupError::Cancelled));
        assert!(err.is_transport());
    }
}
