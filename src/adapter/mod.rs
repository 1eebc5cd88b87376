//! Adapter Layer
//!
//! 外部システム（IPFSゲートウェイ、設定ファイル、コンソール）との統合

pub mod auth;
pub mod config;
pub mod console;
pub mod ipfs;
