//! # UploadResult
//!
//! 成功したアップロードの結果

use super::content_id::ContentId;

/// アップロード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// ルートのコンテンツ識別子
    pub content_id: ContentId,
}

impl UploadResult {
    pub fn new(content_id: ContentId) -> Self {
        Self { content_id }
    }
}
