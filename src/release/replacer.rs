//! Deletion of an existing release ahead of re-creation

use crate::error::{ReleaseError, ReplaceStep, Result};
use crate::gitlab::GitLabApi;

/// Delete the release for `tag` together with its asset links
///
/// Links are deleted one by one before the release itself. The first
/// failure stops the sequence; links already deleted stay deleted.
/// Returns the number of links removed.
pub async fn replace_release<C>(client: &C, project_id: u64, tag: &str) -> Result<usize>
where
    C: GitLabApi + ?Sized,
{
    let release = client
        .get_release(project_id, tag)
        .await
        .map_err(|e| ReleaseError::Replace {
            step: ReplaceStep::Lookup,
            source: e,
        })?;

    let links = release.assets.links;
    for link in &links {
        log::debug!("Deleting release link {} ({})", link.id, link.name);
        client
            .delete_release_link(project_id, tag, link.id)
            .await
            .map_err(|e| ReleaseError::Replace {
                step: ReplaceStep::DeleteLink,
                source: e,
            })?;
    }

    client
        .delete_release(project_id, tag)
        .await
        .map_err(|e| ReleaseError::Replace {
            step: ReplaceStep::DeleteRelease,
            source: e,
        })?;

    log::info!("Deleted release {} and {} link(s)", tag, links.len());
    Ok(links.len())
}
