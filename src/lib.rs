//! # ipfs-upload
//!
//! ファイルまたはディレクトリを IPFS HTTP API（既定は Infura）にアップロードし、
//! CID を表示するツール
//!
//! レイヤー構成：
//!
//! - **Domain層**: エンティティ、エラー、StorageClient trait
//! - **Application層**: キャンセル可能なアップロードのオーケストレーション
//! - **Adapter層**: IPFS HTTP API、設定、コンソール出力
//! - **Driver層**: CLI、シグナル処理、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// 実際のシグナルに依存するコードをカバレッジ計測から除外する
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
