//! # Domain Layer
//!
//! アップロードの核心的なルールとエンティティを定義します。
//!
//! ## 構成要素
//!
//! - **entities**: UploadRequest, ProgressEvent, ContentId など
//! - **errors**: UploadError
//! - **repositories**: StorageClient trait（インターフェース定義のみ）

pub mod entities;
pub mod errors;
pub mod repositories;
