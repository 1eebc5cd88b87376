//! # Storage Client Trait
//!
//! リモートのコンテンツアドレス型ストレージへの追加を抽象化

use std::path::Path;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::content_id::ContentId;
use crate::domain::entities::progress_event::ProgressEvent;
use crate::domain::errors::UploadError;

/// 進捗イベントの送信先
///
/// `add` から戻るときに破棄され、受信側のストリームが終了する
pub type EventSink = mpsc::Sender<ProgressEvent>;

/// 追加オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddOptions {
    /// ピン留めを要求するかどうか
    pub pin: bool,
    /// 進捗イベントを要求するかどうか
    pub progress: bool,
    /// ディレクトリ内のドットファイルを含めるかどうか
    pub hidden: bool,
}

/// ストレージクライアント
///
/// ファイルまたはディレクトリを追加し、ルートの CID を返す
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// パスを追加する
    ///
    /// # Arguments
    ///
    /// * `path` - 追加するファイルまたはディレクトリ
    /// * `options` - 追加オプション
    /// * `events` - 進捗イベントの送信先（任意）
    /// * `cancel` - キャンセルトークン。ネットワーク I/O の待機中に協調的に確認される
    ///
    /// # Errors
    ///
    /// 転送の失敗、ゲートウェイのエラー、キャンセル時にエラーを返す
    async fn add(
        &self,
        path: &Path,
        options: AddOptions,
        events: Option<EventSink>,
        cancel: CancellationToken,
    ) -> Result<ContentId, UploadError>;
}
