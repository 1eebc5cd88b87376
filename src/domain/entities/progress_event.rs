//! # ProgressEvent
//!
//! アップロード中にクライアントが発行する進捗イベント

use super::content_id::ContentId;

/// 進捗イベント
///
/// クライアントが完了順に発行する。永続化はされない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// 途中経過（送信済みバイト数）
    Tick { name: String, bytes: u64 },
    /// アイテムの追加が完了し、CIDが確定した
    NamedCompletion { name: String, content_id: ContentId },
}

impl ProgressEvent {
    /// イベントのアイテム名
    pub fn name(&self) -> &str {
        match self {
            ProgressEvent::Tick { name, .. } => name,
            ProgressEvent::NamedCompletion { name, .. } => name,
        }
    }

    /// ユーザーに表示すべきイベントかどうか
    ///
    /// 名前付きで CID が確定したイベントのみ表示対象
    ///
    /// ```
    /// use ipfs_upload::domain::entities::progress_event::ProgressEvent;
    ///
    /// let tick = ProgressEvent::Tick { name: "a.txt".to_string(), bytes: 42 };
    /// assert!(!tick.is_reportable());
    ///
    /// let done = ProgressEvent::NamedCompletion {
    ///     name: "a.txt".to_string(),
    ///     content_id: "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG".parse().unwrap(),
    /// };
    /// assert!(done.is_reportable());
    /// ```
    pub fn is_reportable(&self) -> bool {
        match self {
            ProgressEvent::Tick { .. } => false,
            ProgressEvent::NamedCompletion { name, .. } => !name.is_empty(),
        }
    }
}
