//! Authentication Module
//!
//! ゲートウェイの認証関連の機能

pub mod credentials;

pub use credentials::Credentials;
