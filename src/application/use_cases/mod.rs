//! # Use Cases
//!
//! ## ユースケース
//!
//! - **UploadPathUseCase**: キャンセル可能なアップロードのオーケストレーション

pub mod upload_path;
