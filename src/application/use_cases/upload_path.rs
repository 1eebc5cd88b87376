//! # Upload Path Use Case
//!
//! キャンセル可能で、進捗を観測できるアップロードのオーケストレーション
//!
//! 進捗表示が有効な場合は、バックグラウンドタスクがアップロードを実行し、
//! 呼び出し側がイベントストリームを閉じるまで読み切ってから結果を受け取る。

use std::sync::Arc;

use log::{debug, info, trace, warn};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::application::progress::ProgressReporter;
use crate::domain::entities::content_id::ContentId;
use crate::domain::entities::upload_phase::{PhaseTransitionError, UploadPhase};
use crate::domain::entities::upload_request::UploadRequest;
use crate::domain::entities::upload_result::UploadResult;
use crate::domain::errors::UploadError;
use crate::domain::repositories::storage_client::{AddOptions, StorageClient};

/// 進捗イベントチャネルの容量
pub const EVENT_CHANNEL_CAPACITY: usize = 8;

/// アップロードユースケース
///
/// 認証済みの `StorageClient` を使ってパスをアップロードし、CID を返す
pub struct UploadPathUseCase<C: StorageClient + ?Sized> {
    client: Arc<C>,
    hidden: bool,
}

impl<C: StorageClient + ?Sized + 'static> UploadPathUseCase<C> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `client` - ストレージクライアント
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            hidden: false,
        }
    }

    /// ディレクトリ内のドットファイルも追加する
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// アップロードを実行
    ///
    /// # Arguments
    ///
    /// * `request` - アップロード要求
    /// * `cancel` - キャンセルトークン（クライアントに共有される）
    /// * `reporter` - 表示対象の進捗イベントの出力先
    ///
    /// # Returns
    ///
    /// ルートの CID
    ///
    /// # Errors
    ///
    /// アップロードが失敗またはキャンセルされた場合にエラーを返す。
    /// キャンセルが要求された後の失敗は `UploadError::Cancelled` になる。
    pub async fn execute(
        &self,
        request: &UploadRequest,
        cancel: &CancellationToken,
        reporter: &dyn ProgressReporter,
    ) -> Result<UploadResult, UploadError> {
        let mut phase = UploadPhase::default();
        let started = phase.start();
        log_transition(&phase, started);

        let options = AddOptions {
            pin: request.pin(),
            progress: request.show_progress(),
            hidden: self.hidden,
        };
        info!(
            "Adding {} (pin: {}, progress: {})",
            request.path().display(),
            options.pin,
            options.progress
        );

        let outcome = if request.show_progress() {
            self.add_with_progress(request, options, cancel, reporter)
                .await
        } else {
            self.client
                .add(request.path(), options, None, cancel.clone())
                .await
        };

        let outcome = match outcome {
            Err(e) if cancel.is_cancelled() && !e.is_cancelled() => {
                debug!("Upload stopped after cancellation: {}", e);
                Err(UploadError::Cancelled)
            }
            other => other,
        };

        let finished = phase.finish(&outcome);
        log_transition(&phase, finished);

        outcome.map(UploadResult::new)
    }

    async fn add_with_progress(
        &self,
        request: &UploadRequest,
        options: AddOptions,
        cancel: &CancellationToken,
        reporter: &dyn ProgressReporter,
    ) -> Result<ContentId, UploadError> {
        let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (result_tx, result_rx) = oneshot::channel();

        let client = Arc::clone(&self.client);
        let path = request.path().to_path_buf();
        let task_cancel = cancel.clone();

        // event_tx is moved into `add` and dropped when it returns, which closes the stream
        let task = tokio::spawn(async move {
            let result = client.add(&path, options, Some(event_tx), task_cancel).await;
            let _ = result_tx.send(result);
        });

        let mut reported = 0usize;
        while let Some(event) = event_rx.recv().await {
            if event.is_reportable() {
                reporter.report(&event);
                reported += 1;
            } else {
                trace!("Ignoring progress event: {:?}", event);
            }
        }
        debug!("Event stream closed after {} reported items", reported);

        match result_rx.await {
            Ok(result) => result,
            Err(_) => match task.await {
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                _ => Err(UploadError::Cancelled),
            },
        }
    }
}

fn log_transition(phase: &UploadPhase, transition: Result<(), PhaseTransitionError>) {
    match transition {
        Ok(()) => debug!("Upload phase: {}", phase),
        Err(e) => warn!("{}", e),
    }
}
