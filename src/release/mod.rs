//! Release publication workflow.
//!
//! [`ReleaseWorkflow::run`] walks the phases in order: resolve the project,
//! upload local assets, append the explicit asset, delete the existing
//! release when replacing, then create the new one. Any failure ends the
//! run; nothing is retried or rolled back.

mod publisher;
mod replacer;
mod uploader;

pub use publisher::publish_release;
pub use replacer::replace_release;
pub use uploader::AssetUploader;

use crate::assets::{AssetLink, resolve_local_assets};
use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::gitlab::{GitLabApi, Project};
use crate::project::ProjectRef;
use reqwest::StatusCode;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Phases of a release run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleasePhase {
    /// Map the remote URL to a project and look it up
    ResolveProject,
    /// Resolve and upload local files
    CollectAssets,
    /// Add the caller-supplied asset link
    AppendExplicitAsset,
    /// Delete the existing release for the tag
    Replace,
    /// Create the release
    Publish,
}

impl fmt::Display for ReleasePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleasePhase::ResolveProject => "resolve project",
            ReleasePhase::CollectAssets => "collect assets",
            ReleasePhase::AppendExplicitAsset => "append explicit asset",
            ReleasePhase::Replace => "replace",
            ReleasePhase::Publish => "publish",
        };
        f.write_str(name)
    }
}

/// What to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Existing tag the release is attached to
    pub tag: String,
    /// Release title
    pub title: String,
    /// Release description
    pub description: String,
    /// File or directory to upload
    pub upload: Option<PathBuf>,
    /// Externally hosted asset appended after the uploaded ones
    pub explicit_asset: Option<AssetLink>,
    /// Delete an existing release for the tag first
    pub replace: bool,
}

impl ReleaseRequest {
    /// Request for `tag` with title and description defaulting to the tag
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            title: tag.clone(),
            description: tag.clone(),
            tag,
            upload: None,
            explicit_asset: None,
            replace: false,
        }
    }

    /// Set the title; empty values keep the default
    pub fn title(mut self, title: Option<String>) -> Self {
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        self
    }

    /// Set the description; empty values keep the default
    pub fn description(mut self, description: Option<String>) -> Self {
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            self.description = description;
        }
        self
    }

    /// Upload the file or directory at `path`
    pub fn upload(mut self, path: impl Into<PathBuf>) -> Self {
        self.upload = Some(path.into());
        self
    }

    /// Attach an externally hosted asset
    pub fn explicit_asset(mut self, asset: AssetLink) -> Self {
        self.explicit_asset = Some(asset);
        self
    }

    /// Replace an existing release for the tag
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// Project the release was created in
    pub project: ProjectRef,
    /// Tag of the release
    pub tag: String,
    /// Release title
    pub title: String,
    /// Asset links attached, uploaded ones first
    pub assets: Vec<AssetLink>,
    /// Links deleted from the replaced release, if one was replaced
    pub replaced_links: Option<usize>,
}

/// Runs a release against a remote project
pub struct ReleaseWorkflow<C: ?Sized> {
    client: Arc<C>,
    config: Config,
}

impl<C> ReleaseWorkflow<C>
where
    C: GitLabApi + ?Sized + 'static,
{
    /// Create a workflow using `client` for all remote calls
    pub fn new(client: Arc<C>, config: Config) -> Self {
        Self { client, config }
    }

    /// Publish `request` in the project behind `remote_url`
    pub async fn run(&self, remote_url: &str, request: &ReleaseRequest) -> Result<ReleaseSummary> {
        enter(ReleasePhase::ResolveProject);
        let (project_ref, project) = self.resolve_project(remote_url).await?;

        let mut assets = Vec::new();
        if let Some(upload) = &request.upload {
            enter(ReleasePhase::CollectAssets);
            let files = resolve_local_assets(upload)?;
            let uploader = AssetUploader::new(Arc::clone(&self.client), &self.config, &project_ref);
            assets = uploader.upload(project.id, &files).await?;
        }

        if let Some(asset) = &request.explicit_asset {
            enter(ReleasePhase::AppendExplicitAsset);
            assets.push(asset.clone());
        }

        let mut replaced_links = None;
        if request.replace {
            enter(ReleasePhase::Replace);
            replaced_links =
                Some(replace_release(self.client.as_ref(), project.id, &request.tag).await?);
        }

        enter(ReleasePhase::Publish);
        publish_release(
            self.client.as_ref(),
            project.id,
            &request.title,
            &request.description,
            &request.tag,
            &assets,
        )
        .await?;

        Ok(ReleaseSummary {
            project: project_ref,
            tag: request.tag.clone(),
            title: request.title.clone(),
            assets,
            replaced_links,
        })
    }

    /// Parse `remote_url` and fetch the project it names
    ///
    /// Only a 200 response is accepted.
    pub async fn resolve_project(&self, remote_url: &str) -> Result<(ProjectRef, Project)> {
        let project_ref = ProjectRef::from_remote_url(remote_url)?;
        let (project, status) = self
            .client
            .get_project(&project_ref.path())
            .await
            .map_err(|e| ReleaseError::Resolve {
                context: "get project failed",
                source: e,
            })?;

        if status != StatusCode::OK {
            return Err(ReleaseError::InvalidStatus {
                status: status.as_u16(),
            });
        }

        log::debug!("Resolved {} to project id {}", project_ref, project.id);
        Ok((project_ref, project))
    }
}

fn enter(phase: ReleasePhase) {
    log::info!("Phase: {}", phase);
}
