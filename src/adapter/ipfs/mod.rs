//! IPFS HTTP API Adapter
//!
//! `/api/v0/add` へのアップロード

pub mod client;
pub mod multipart;
pub mod response;

pub use client::HttpStorageClient;

use crate::domain::errors::UploadError;

impl From<reqwest::Error> for UploadError {
    fn from(e: reqwest::Error) -> Self {
        UploadError::transport(e)
    }
}
