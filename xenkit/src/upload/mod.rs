//! Disk-image upload transport.

mod reply;

pub use reply::UploadReply;

use async_trait::async_trait;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;
use xenkit_shared::errors::{XenkitError, XenkitResult};

/// Streams a packaged disk image to the hypervisor's import endpoint.
///
/// The open file moves into the call: the transport owns the handle from
/// that point and it is closed on every exit path, success or failure.
/// Callers must not retain a second handle expecting to reuse it.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Upload `file` as the raw request body of `url` and return the raw
    /// textual reply.
    ///
    /// Honors `cancel`: an operator-initiated cancellation aborts an
    /// in-flight transfer with a [`XenkitError::Transport`] error instead
    /// of hanging until the transfer completes.
    async fn upload(
        &self,
        url: &str,
        file: File,
        cancel: &CancellationToken,
    ) -> XenkitResult<String>;
}

/// HTTPS transport backed by a shared `reqwest` client.
///
/// The body is streamed straight off the file handle; images can be many
/// gigabytes and are never buffered in memory.
#[derive(Debug, Clone)]
pub struct HttpUploadTransport {
    client: reqwest::Client,
}

impl HttpUploadTransport {
    pub fn new() -> XenkitResult<Self> {
        Self::build(false)
    }

    /// Accept self-signed certificates. Xen-style hosts commonly present
    /// one on the management endpoint.
    pub fn insecure() -> XenkitResult<Self> {
        Self::build(true)
    }

    fn build(accept_invalid_certs: bool) -> XenkitResult<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| XenkitError::Transport(format!("unable to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UploadTransport for HttpUploadTransport {
    async fn upload(
        &self,
        url: &str,
        file: File,
        cancel: &CancellationToken,
    ) -> XenkitResult<String> {
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        let request = self.client.put(url).body(body).send();

        // Dropping the in-flight request future aborts the transfer.
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(XenkitError::Transport("upload cancelled".into()));
            }
            result = request => {
                result.map_err(|e| XenkitError::Transport(format!("upload failed: {e}")))?
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(XenkitError::Transport(format!(
                "upload rejected with status {status}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| XenkitError::Transport(format!("unable to read upload reply: {e}")))
    }
}
