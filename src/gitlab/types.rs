//! GitLab REST payloads used by the release workflow.

use serde::{Deserialize, Serialize};

/// Project record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// Numeric project ID
    pub id: u64,
    /// Project name
    pub name: String,
}

/// Response of a project upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedFile {
    /// Server-assigned display name
    pub alt: String,
    /// Path fragment relative to the project web URL
    pub url: String,
}

/// Release record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Tag the release belongs to
    pub tag_name: String,
    /// Release title
    #[serde(default)]
    pub name: Option<String>,
    /// Release notes
    #[serde(default)]
    pub description: Option<String>,
    /// Attached assets
    #[serde(default)]
    pub assets: ReleaseAssets,
}

/// Assets section of a release
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleaseAssets {
    /// Asset links
    #[serde(default)]
    pub links: Vec<ReleaseLink>,
}

/// Existing asset link
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseLink {
    /// Link ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Target URL
    pub url: String,
}

/// Body of a create-release request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReleaseOptions {
    /// Release title
    pub name: String,
    /// Existing tag
    pub tag_name: String,
    /// Release notes
    pub description: String,
    /// Links to create together with the release
    pub assets: NewReleaseAssets,
}

/// Assets section of a create-release request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewReleaseAssets {
    /// Links to create
    pub links: Vec<NewReleaseLink>,
}

/// Link to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReleaseLink {
    /// Display name
    pub name: String,
    /// Target URL
    pub url: String,
}

impl CreateReleaseOptions {
    /// Build a request from the release fields and its links
    pub fn new(
        name: impl Into<String>,
        tag_name: impl Into<String>,
        description: impl Into<String>,
        links: Vec<NewReleaseLink>,
    ) -> Self {
        Self {
            name: name.into(),
            tag_name: tag_name.into(),
            description: description.into(),
            assets: NewReleaseAssets { links },
        }
    }
}
