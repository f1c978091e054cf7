//! GitLab integration for release operations

mod client;
mod types;

pub use client::GitLabClient;
pub use types::{
    CreateReleaseOptions, NewReleaseAssets, NewReleaseLink, Project, Release, ReleaseAssets,
    ReleaseLink, UploadedFile,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for remote API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors raised by the remote API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, body decode)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{method} {url}: {status}: {message}")]
    Status {
        /// HTTP method of the request
        method: String,
        /// Requested URL
        url: String,
        /// Status code returned
        status: StatusCode,
        /// Error message from the response body
        message: String,
    },

    /// The requested resource does not exist
    #[error("{resource} not found")]
    NotFound {
        /// Resource that was requested
        resource: String,
    },

    /// A local file could not be read for upload
    #[error("read {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The request URL could not be built
    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),
}

/// Remote operations needed to publish a release
///
/// Implemented by [`GitLabClient`] over HTTP; tests substitute in-memory
/// fakes.
#[async_trait]
pub trait GitLabApi: Send + Sync {
    /// Look up a project by its `owner/name` path
    async fn get_project(&self, path: &str) -> ApiResult<(Project, StatusCode)>;

    /// Upload a local file to the project's upload area
    async fn upload_file(&self, project_id: u64, file: &Path) -> ApiResult<UploadedFile>;

    /// Fetch the release for `tag`
    async fn get_release(&self, project_id: u64, tag: &str) -> ApiResult<Release>;

    /// Create a release with all of its asset links in one call
    async fn create_release(
        &self,
        project_id: u64,
        options: &CreateReleaseOptions,
    ) -> ApiResult<Release>;

    /// Delete the release for `tag`
    async fn delete_release(&self, project_id: u64, tag: &str) -> ApiResult<()>;

    /// Delete a single asset link of the release for `tag`
    async fn delete_release_link(&self, project_id: u64, tag: &str, link_id: u64)
    -> ApiResult<()>;
}
