//! Project Credentials
//!
//! Infuraのプロジェクト認証情報（HTTP Basic認証）

use std::fmt;

use reqwest::RequestBuilder;

/// Project ID and secret sent as HTTP basic auth
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    project_id: String,
    project_secret: String,
}

impl Credentials {
    pub fn new(project_id: impl Into<String>, project_secret: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            project_secret: project_secret.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Attach the `Authorization: Basic ...` header to a request
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.project_id, Some(&self.project_secret))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("project_id", &self.project_id)
            .field("project_secret", &"<redacted>")
            .finish()
    }
}
