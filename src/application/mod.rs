//! # Application Layer
//!
//! アプリケーション固有のビジネスフロー（ユースケース）
//!
//! ## 構成要素
//!
//! - **progress**: 進捗イベントの出力先
//! - **use_cases**: ユースケース

pub mod progress;
pub mod use_cases;
