//! # Domain Repositories
//!
//! 外部サービスとのインターフェース定義
//!
//! ## 特徴
//!
//! - Domain層では実装を持たない（traitの定義のみ）
//! - Adapter層で具体的な実装を提供

pub mod storage_client;
