//! # UploadRequest Value Object
//!
//! 1回のアップロード要求

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use crate::domain::errors::UploadError;

/// アップロード要求
///
/// 解決済みの設定から一度だけ作成され、その後は変更されない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    path: PathBuf,
    pin: bool,
    show_progress: bool,
}

impl UploadRequest {
    /// 新しいアップロード要求を作成します。
    ///
    /// # Errors
    ///
    /// パスが空の場合に `UploadError::InvalidRequest` を返す
    ///
    /// ```
    /// use ipfs_upload::domain::entities::upload_request::UploadRequest;
    ///
    /// let request = UploadRequest::new("/tmp/example.txt", true, true).unwrap();
    /// assert!(request.pin());
    /// assert!(request.show_progress());
    ///
    /// assert!(UploadRequest::new("", true, false).is_err());
    /// ```
    pub fn new(path: impl Into<PathBuf>, pin: bool, show_progress: bool) -> Result<Self, UploadError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(UploadError::InvalidRequest(
                "file or directory path required as an argument".to_string(),
            ));
        }

        Ok(Self {
            path,
            pin,
            show_progress,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pin(&self) -> bool {
        self.pin
    }

    pub fn show_progress(&self) -> bool {
        self.show_progress
    }

    /// パスの存在を確認する（シンボリックリンクは辿らない）
    ///
    /// # Errors
    ///
    /// stat に失敗した場合に `UploadError::Filesystem` を返す
    pub fn validate_path(&self) -> Result<Metadata, UploadError> {
        std::fs::symlink_metadata(&self.path).map_err(|source| UploadError::Filesystem {
            path: self.path.clone(),
            source,
        })
    }
}
