//! Project reference resolution from repository remotes.

use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

static REPO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<owner>[^/:]+)/(?P<name>[^/]+?)(?:\.git)?$")
        .expect("remote URL regex is valid")
});

/// Owner/name pair identifying a remote project
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRef {
    owner: String,
    name: String,
}

impl ProjectRef {
    /// Create a reference from its parts
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse the trailing `owner/name(.git)?` segment of a remote URL
    ///
    /// Accepts both `https://host/owner/name.git` and `git@host:owner/name.git`.
    pub fn from_remote_url(url: &str) -> Result<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        let caps = REPO_URL_RE
            .captures(trimmed)
            .ok_or_else(|| ReleaseError::InvalidRemote {
                url: url.to_string(),
            })?;

        Ok(Self::new(&caps["owner"], &caps["name"]))
    }

    /// Project owner (user or group)
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Project name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/name` path used to address the project remotely
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Read the URL of the `origin` remote of the repository at `repo_dir`
pub fn origin_url(repo_dir: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(["config", "--get", "remote.origin.url"])
        .current_dir(repo_dir)
        .output()
        .map_err(|e| ReleaseError::Origin {
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReleaseError::Origin {
            reason: if stderr.trim().is_empty() {
                "no origin remote configured".to_string()
            } else {
                stderr.trim().to_string()
            },
        });
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if url.is_empty() {
        return Err(ReleaseError::Origin {
            reason: "origin remote has an empty URL".to_string(),
        });
    }

    log::debug!("Origin URL: {}", url);
    Ok(url)
}
