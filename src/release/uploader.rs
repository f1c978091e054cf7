//! Concurrent upload of local files as release assets

use crate::assets::AssetLink;
use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::gitlab::GitLabApi;
use crate::project::ProjectRef;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Uploads local files to a project and builds their asset links
pub struct AssetUploader<C: ?Sized> {
    client: Arc<C>,
    web_url: String,
    project_path: String,
}

impl<C> AssetUploader<C>
where
    C: GitLabApi + ?Sized + 'static,
{
    /// Create an uploader for `project`
    pub fn new(client: Arc<C>, config: &Config, project: &ProjectRef) -> Self {
        Self {
            client,
            web_url: config.web_base().to_string(),
            project_path: project.path(),
        }
    }

    /// Public URL of an uploaded file given the fragment the server returned
    pub fn asset_url(&self, fragment: &str) -> String {
        format!("{}/{}{}", self.web_url, self.project_path, fragment)
    }

    /// Upload every file concurrently, one task per file
    ///
    /// Links come back in the order of `files`. The first failed upload
    /// ends the wait and is returned; uploads still in flight are detached
    /// and run to completion with their results discarded.
    pub async fn upload(&self, project_id: u64, files: &[PathBuf]) -> Result<Vec<AssetLink>> {
        let mut slots: Vec<Option<AssetLink>> = vec![None; files.len()];
        let mut tasks = JoinSet::new();

        for (index, file) in files.iter().enumerate() {
            let client = Arc::clone(&self.client);
            let file = file.clone();
            tasks.spawn(async move {
                let result = client.upload_file(project_id, &file).await;
                (index, file, result)
            });
        }
        log::info!("Uploading {} file(s)", files.len());

        while let Some(joined) = tasks.join_next().await {
            let (index, file, result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    tasks.detach_all();
                    return Err(ReleaseError::UploadTask {
                        context: "upload task failed",
                        source: e,
                    });
                }
            };

            match result {
                Ok(uploaded) => {
                    let url = self.asset_url(&uploaded.url);
                    log::debug!("Uploaded {} as {}", file.display(), url);
                    slots[index] = Some(AssetLink::new(uploaded.alt, url));
                }
                Err(source) => {
                    tasks.detach_all();
                    return Err(ReleaseError::Upload {
                        context: "upload file failed",
                        path: file,
                        source,
                    });
                }
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }
}
