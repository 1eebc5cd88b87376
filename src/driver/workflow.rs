//! Workflow Orchestration
//!
//! 依存性を組み立ててアップロードを実行する

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::adapter::config::Config;
use crate::adapter::console::ConsoleReporter;
use crate::adapter::ipfs::HttpStorageClient;
use crate::application::progress::{NoopReporter, ProgressReporter};
use crate::application::use_cases::upload_path::UploadPathUseCase;
use crate::domain::entities::upload_request::UploadRequest;
use crate::domain::entities::upload_result::UploadResult;
use crate::domain::errors::UploadError;
use crate::domain::repositories::storage_client::StorageClient;

use super::cli::Args;
use super::signal::cancel_on_interrupt;

/// 設定・ファイル・転送エラー
pub const EXIT_FAILURE: u8 = 1;
/// ユーザーによる中断（128 + SIGINT）
pub const EXIT_CANCELLED: u8 = 130;

/// エラーに対応する終了コード
pub fn exit_code(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<UploadError>() {
        Some(e) if e.is_cancelled() => EXIT_CANCELLED,
        _ => EXIT_FAILURE,
    }
}

/// Upload Workflow
pub struct UploadWorkflow {
    config: Config,
    client: Option<Arc<dyn StorageClient>>,
}

impl UploadWorkflow {
    /// Create a new workflow that talks to the configured gateway
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Use an already constructed storage client instead of the HTTP one
    pub fn with_client(config: Config, client: Arc<dyn StorageClient>) -> Self {
        Self {
            config,
            client: Some(client),
        }
    }

    fn storage_client(&self) -> Result<Arc<dyn StorageClient>> {
        if let Some(client) = &self.client {
            return Ok(Arc::clone(client));
        }

        let client = HttpStorageClient::new(
            self.config.api_url.clone(),
            self.config.credentials.clone(),
        )
        .context("Failed to create IPFS API client")?
        .with_cid_version(self.config.cid_version);
        Ok(Arc::new(client))
    }

    /// Execute the upload workflow, cancelling on Ctrl-C
    pub async fn execute(&self, args: &Args) -> Result<UploadResult> {
        let cancel = CancellationToken::new();
        let _interrupt = cancel_on_interrupt(&cancel);

        self.execute_with_cancel(args, &cancel).await
    }

    /// Execute the upload workflow with a caller-owned cancellation token
    pub async fn execute_with_cancel(
        &self,
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<UploadResult> {
        let request = UploadRequest::new(&args.path, self.config.pin, self.config.progress)?;
        let metadata = request.validate_path()?;

        info!("Starting IPFS uploader...");
        info!(
            "API: {} (project {})",
            self.config.api_url,
            self.config.credentials.project_id()
        );
        info!(
            "Uploading {} {}",
            if metadata.is_dir() { "directory" } else { "file" },
            request.path().display()
        );

        let use_case =
            UploadPathUseCase::new(self.storage_client()?).with_hidden(self.config.hidden);

        let reporter: Box<dyn ProgressReporter> = if request.show_progress() {
            Box::new(ConsoleReporter::stderr())
        } else {
            Box::new(NoopReporter)
        };

        let result = use_case
            .execute(&request, cancel, reporter.as_ref())
            .await?;

        info!("Upload complete: {}", result.content_id);

        Ok(result)
    }
}
