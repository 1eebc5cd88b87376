//! # Domain Errors
//!
//! アップロードの失敗を表すエラー

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// アップロードエラー
///
/// 1回のアップロードにつき、結果かこのエラーのどちらか一方だけが返る
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("invalid upload request: {0}")]
    InvalidRequest(String),
    #[error("{}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),
    #[error("{}", format_remote(*status, message))]
    Remote { status: Option<u16>, message: String },
    #[error("malformed response from gateway: {0}")]
    MalformedResponse(String),
    #[error("upload cancelled")]
    Cancelled,
}

fn format_remote(status: Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("gateway returned {}: {}", status, message),
        None => format!("gateway error: {}", message),
    }
}

impl UploadError {
    /// 転送層のエラーを包む
    pub fn transport(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        UploadError::Transport(source.into())
    }

    /// ユーザーの中断によるエラーかどうか
    pub fn is_cancelled(&self) -> bool {
        matches!(self, UploadError::Cancelled)
    }
}
