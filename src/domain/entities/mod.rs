//! # Domain Entities
//!
//! アップロードのエンティティとバリューオブジェクト
//!
//! ## エンティティ
//!
//! - **UploadRequest**: アップロード要求
//! - **ProgressEvent**: 進捗イベント
//! - **ContentId**: コンテンツ識別子
//! - **UploadResult**: アップロード結果
//! - **UploadPhase**: アップロードの状態遷移

pub mod content_id;
pub mod progress_event;
pub mod upload_phase;
pub mod upload_request;
pub mod upload_result;
