//! Attachment capture.

use crate::notices::DEFAULT_ATTACHMENT_NAME;
use crate::{CapturedAttachment, FlaggedMessage};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use tribunal_error::HttpError;

/// Downloads an attachment payload.
#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    /// Fetch the bytes behind an attachment URL.
    ///
    /// # Errors
    ///
    /// Returns error on network failure, timeout, or a non-success status
    /// (e.g. an expired CDN link).
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, HttpError>;
}

/// [`AttachmentFetcher`] backed by `reqwest` with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpAttachmentFetcher {
    client: reqwest::Client,
}

impl HttpAttachmentFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed (TLS backend
    /// initialisation failure).
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AttachmentFetcher for HttpAttachmentFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            // Expired CDN links answer 403/404
            return Err(HttpError::new(format!("Attachment download refused: {status}"))
                .with_status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Captures every attachment on a message, skipping the ones that fail.
#[derive(Clone)]
pub struct AttachmentSnapshotter {
    fetcher: Arc<dyn AttachmentFetcher>,
}

impl AttachmentSnapshotter {
    /// Create a snapshotter over a fetcher.
    pub fn new(fetcher: Arc<dyn AttachmentFetcher>) -> Self {
        Self { fetcher }
    }

    /// Download the message's attachments in order.
    ///
    /// A failed download is logged and left out; the result never fails as a whole.
    #[instrument(skip(self, message), fields(message_id = %message.id(), attachment_count = message.attachments().len()))]
    pub async fn snapshot(&self, message: &FlaggedMessage) -> Vec<CapturedAttachment> {
        let mut captured = Vec::with_capacity(message.attachments().len());

        for attachment in message.attachments() {
            match self.fetcher.fetch(attachment.url()).await {
                Ok(payload) => {
                    debug!(name = %attachment.name(), bytes = payload.len(), "Captured attachment");
                    let name = if attachment.name().is_empty() {
                        DEFAULT_ATTACHMENT_NAME
                    } else {
                        attachment.name().as_str()
                    };
                    captured.push(CapturedAttachment::new(name, payload));
                }
                Err(e) => {
                    warn!(
                        name = %attachment.name(),
                        status = ?e.status,
                        error = %e,
                        "Failed to download attachment, skipping"
                    );
                }
            }
        }

        captured
    }
}
