//! IPFS HTTP API client
//!
//! `StorageClient` implementation that posts to `/api/v0/add`

use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info, trace};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use super::multipart::build_form;
use super::response::{parse_line, remote_error, AddOutput, LineBuffer};
use crate::adapter::auth::Credentials;
use crate::domain::entities::content_id::ContentId;
use crate::domain::entities::progress_event::ProgressEvent;
use crate::domain::errors::UploadError;
use crate::domain::repositories::storage_client::{AddOptions, EventSink, StorageClient};

/// Client for an IPFS HTTP API endpoint such as Infura's
pub struct HttpStorageClient {
    http: Client,
    api_url: String,
    credentials: Credentials,
    cid_version: Option<u8>,
}

impl HttpStorageClient {
    pub fn new(api_url: impl Into<String>, credentials: Credentials) -> Result<Self, UploadError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            credentials,
            cid_version: None,
        })
    }

    /// Ask the gateway for a specific CID version
    pub fn with_cid_version(mut self, cid_version: Option<u8>) -> Self {
        self.cid_version = cid_version;
        self
    }

    pub fn add_url(&self) -> String {
        format!("{}/api/v0/add", self.api_url.trim_end_matches('/'))
    }

    fn query(&self, options: AddOptions) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("pin", options.pin.to_string()),
            ("progress", options.progress.to_string()),
        ];
        if let Some(version) = self.cid_version {
            query.push(("cid-version", version.to_string()));
        }
        query
    }

    async fn upload(
        &self,
        path: &Path,
        options: AddOptions,
        events: Option<EventSink>,
    ) -> Result<ContentId, UploadError> {
        let form = build_form(path, options.hidden)?;

        let request = self
            .credentials
            .apply(self.http.post(self.add_url()))
            .query(&self.query(options))
            .multipart(form);

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(remote_error(status.as_u16(), &body));
        }

        let mut stream = response.bytes_stream();
        let mut lines = LineBuffer::default();
        let mut last = None;

        while let Some(chunk) = stream.next().await {
            for line in lines.push(&chunk?)? {
                handle_line(&line, events.as_ref(), &mut last).await?;
            }
        }
        if let Some(line) = lines.finish()? {
            handle_line(&line, events.as_ref(), &mut last).await?;
        }

        last.ok_or_else(|| {
            UploadError::MalformedResponse("add response contained no content identifier".to_string())
        })
    }
}

async fn handle_line(
    line: &str,
    events: Option<&EventSink>,
    last: &mut Option<ContentId>,
) -> Result<(), UploadError> {
    match parse_line(line)? {
        None => Ok(()),
        Some(AddOutput::Error(message)) => Err(UploadError::Remote {
            status: None,
            message,
        }),
        Some(AddOutput::Event(event)) => {
            if let ProgressEvent::NamedCompletion { content_id, .. } = &event {
                *last = Some(*content_id);
            }
            if let Some(sink) = events {
                if sink.send(event).await.is_err() {
                    trace!("Progress receiver dropped, discarding event");
                }
            }
            Ok(())
        }
    }
}

#[async_trait]
impl StorageClient for HttpStorageClient {
    async fn add(
        &self,
        path: &Path,
        options: AddOptions,
        events: Option<EventSink>,
        cancel: CancellationToken,
    ) -> Result<ContentId, UploadError> {
        info!("POST {}", self.add_url());

        // dropping the upload future aborts the in-flight request
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Upload of {} cancelled", path.display());
                Err(UploadError::Cancelled)
            }
            result = self.upload(path, options, events) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> HttpStorageClient {
        HttpStorageClient::new(url, Credentials::new("id", "secret")).unwrap()
    }

    #[test]
    fn test_add_url() {
        assert_eq!(
            client("https://ipfs.infura.io:5001").add_url(),
            "https://ipfs.infura.io:5001/api/v0/add"
        );
        assert_eq!(
            client("http://127.0.0.1:5001/").add_url(),
            "http://127.0.0.1:5001/api/v0/add"
        );
    }

    #[test]
    fn test_query_defaults() {
        let query = client("http://localhost").query(AddOptions {
            pin: true,
            progress: false,
            hidden: false,
        });
        assert_eq!(
            query,
            vec![("pin", "true".to_string()), ("progress", "false".to_string())]
        );
    }

    #[test]
    fn test_query_with_cid_version() {
        let query = client("http://localhost")
            .with_cid_version(Some(1))
            .query(AddOptions::default());
        assert_eq!(query.last(), Some(&("cid-version", "1".to_string())));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = client("http://127.0.0.1:9")
            .add(Path::new("/nonexistent"), AddOptions::default(), None, cancel)
            .await;

        assert!(matches!(result, Err(UploadError::Cancelled)));
    }

    #[tokio::test]
    async fn test_missing_path_is_filesystem_error() {
        let result = client("http://127.0.0.1:9")
            .add(
                Path::new("/nonexistent/ipfs-upload-test"),
                AddOptions::default(),
                None,
                CancellationToken::new(),
            )
            .await;

        assert!(matches!(result, Err(UploadError::Filesystem { .. })));
    }
}
