//! Release creation

use crate::assets::AssetLink;
use crate::error::{ReleaseError, Result};
use crate::gitlab::{CreateReleaseOptions, GitLabApi, NewReleaseLink, Release};

/// Create the release with all `assets` attached in a single call
pub async fn publish_release<C>(
    client: &C,
    project_id: u64,
    title: &str,
    description: &str,
    tag: &str,
    assets: &[AssetLink],
) -> Result<Release>
where
    C: GitLabApi + ?Sized,
{
    let links = assets
        .iter()
        .map(|a| NewReleaseLink {
            name: a.name.clone(),
            url: a.url.clone(),
        })
        .collect();
    let options = CreateReleaseOptions::new(title, tag, description, links);

    let release = client
        .create_release(project_id, &options)
        .await
        .map_err(|e| ReleaseError::Publish {
            context: "create release failed",
            source: e,
        })?;

    log::info!("Created release {} with {} asset(s)", tag, assets.len());
    Ok(release)
}
