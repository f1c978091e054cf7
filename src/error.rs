//! Error types for glr operations.
//!
//! Every failure of the release workflow is reported as a [`ReleaseError`]
//! carrying a short static context label and the underlying cause. The
//! [`ErrorKind`] of an error decides which process exit code the CLI uses.

use crate::gitlab::ApiError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for glr operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Exit code for a successful run
pub const EXIT_OK: i32 = 0;
/// Exit code for any runtime failure
pub const EXIT_ERROR: i32 = 10;
/// Exit code for command line parse failures
pub const EXIT_PARSE_ERROR: i32 = 11;
/// Exit code for an unexpected response status from the project lookup
pub const EXIT_INVALID_RESPONSE_CODE: i32 = 12;

/// Matchable classification of a [`ReleaseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad local asset path
    Path,
    /// An asset upload failed
    Upload,
    /// Looking up or deleting the existing release failed
    Replace,
    /// Creating the release failed
    Publish,
    /// The project could not be resolved from the repository remote
    Resolve,
    /// Configuration or client construction failed
    Config,
}

/// Step of a replace that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceStep {
    /// Fetching the existing release
    Lookup,
    /// Deleting one of its asset links
    DeleteLink,
    /// Deleting the release itself
    DeleteRelease,
}

impl fmt::Display for ReplaceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReplaceStep::Lookup => "get release failed",
            ReplaceStep::DeleteLink => "delete release link failed",
            ReplaceStep::DeleteRelease => "delete release failed",
        };
        f.write_str(label)
    }
}

/// Main error type for all glr operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Local asset path could not be resolved or inspected
    #[error("{context}: {}: {source}", .path.display())]
    Path {
        /// Short description of the failed step
        context: &'static str,
        /// Path as given by the caller
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Uploading a local file failed
    #[error("{context}: {}: {source}", .path.display())]
    Upload {
        /// Short description of the failed step
        context: &'static str,
        /// File whose upload failed
        path: PathBuf,
        /// Underlying API error
        #[source]
        source: ApiError,
    },

    /// An upload task panicked or was cancelled by the runtime
    #[error("{context}: {source}")]
    UploadTask {
        /// Short description of the failed step
        context: &'static str,
        /// Join failure reported by tokio
        #[source]
        source: tokio::task::JoinError,
    },

    /// Replacing the existing release failed
    #[error("{step}: {source}")]
    Replace {
        /// Step that failed
        step: ReplaceStep,
        /// Underlying API error
        #[source]
        source: ApiError,
    },

    /// Creating the release failed
    #[error("{context}: {source}")]
    Publish {
        /// Short description of the failed step
        context: &'static str,
        /// Underlying API error
        #[source]
        source: ApiError,
    },

    /// The project lookup failed
    #[error("{context}: {source}")]
    Resolve {
        /// Short description of the failed step
        context: &'static str,
        /// Underlying API error
        #[source]
        source: ApiError,
    },

    /// The remote URL does not end in `owner/name`
    #[error("Invalid remote URL '{url}': expected a trailing owner/name segment")]
    InvalidRemote {
        /// Remote URL that failed to parse
        url: String,
    },

    /// Reading the remote URL from the local repository failed
    #[error("Fetch origin url failed: {reason}")]
    Origin {
        /// Reason for the failure
        reason: String,
    },

    /// The project lookup returned a success status other than 200
    #[error("api request failed: invalid status: {status}")]
    InvalidStatus {
        /// Status code returned by the server
        status: u16,
    },

    /// Configuration is invalid or the HTTP client could not be built
    #[error("{context}: {reason}")]
    Config {
        /// Short description of the failed step
        context: &'static str,
        /// Reason for the failure
        reason: String,
    },
}

impl ReleaseError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReleaseError::Path { .. } => ErrorKind::Path,
            ReleaseError::Upload { .. } | ReleaseError::UploadTask { .. } => ErrorKind::Upload,
            ReleaseError::Replace { .. } => ErrorKind::Replace,
            ReleaseError::Publish { .. } => ErrorKind::Publish,
            ReleaseError::Resolve { .. }
            | ReleaseError::InvalidRemote { .. }
            | ReleaseError::Origin { .. }
            | ReleaseError::InvalidStatus { .. } => ErrorKind::Resolve,
            ReleaseError::Config { .. } => ErrorKind::Config,
        }
    }

    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::InvalidStatus { .. } => EXIT_INVALID_RESPONSE_CODE,
            _ => EXIT_ERROR,
        }
    }

    /// Whether the remote may have been left partially modified
    ///
    /// Only a replace that failed after its first deletion can do this;
    /// nothing is rolled back.
    pub fn may_leave_partial_state(&self) -> bool {
        matches!(self, ReleaseError::Replace { step, .. } if *step != ReplaceStep::Lookup)
    }
}
