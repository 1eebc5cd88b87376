//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **signal**: Ctrl-C とキャンセルトークンの連携
//! - **workflow**: ワークフロー全体のオーケストレーション

pub mod cli;
pub mod signal;
pub mod workflow;

pub use cli::Args;
pub use workflow::UploadWorkflow;
