//! # glr
//!
//! Create GitLab releases from the command line.
//!
//! The project is derived from the repository's origin remote. Local files
//! can be uploaded concurrently and attached as release asset links, an
//! externally hosted asset can be added, and an existing release for the
//! same tag can be replaced.
//!
//! ## Usage
//!
//! ```bash
//! glr v1.2.3                                  # release titled and described "v1.2.3"
//! glr -n "First release" --upload dist v1.0.0 # upload everything under dist/
//! glr --replace --upload app.tar.gz v1.0.0    # recreate an existing release
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod gitlab;
pub mod project;
pub mod release;

pub use assets::{AssetLink, resolve_local_assets};
pub use cli::Args;
pub use config::{Config, EnvConfig};
pub use error::{ErrorKind, ReleaseError, ReplaceStep, Result};
pub use gitlab::{ApiError, GitLabApi, GitLabClient};
pub use project::ProjectRef;
pub use release::{ReleasePhase, ReleaseRequest, ReleaseSummary, ReleaseWorkflow};
