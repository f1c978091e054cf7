//! Shared test fixtures: an in-memory GitLab

#![allow(dead_code)]

use async_trait::async_trait;
use glr::gitlab::{
    ApiError, ApiResult, CreateReleaseOptions, GitLabApi, Project, Release, ReleaseAssets,
    ReleaseLink, UploadedFile,
};
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

pub const PROJECT_ID: u64 = 18630472;

/// Remote call as observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetProject(String),
    Upload(PathBuf),
    GetRelease(String),
    CreateRelease(CreateReleaseOptions),
    DeleteRelease(String),
    DeleteLink(u64),
}

/// In-memory GitLab that records every call
pub struct FakeGitLab {
    pub project_status: StatusCode,
    pub existing_links: Option<Vec<ReleaseLink>>,
    pub failing_uploads: HashSet<String>,
    pub failing_link: Option<u64>,
    pub upload_delays: HashMap<String, u64>,
    calls: Mutex<Vec<Call>>,
}

impl Default for FakeGitLab {
    fn default() -> Self {
        Self {
            project_status: StatusCode::OK,
            existing_links: None,
            failing_uploads: HashSet::new(),
            failing_link: None,
            upload_delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGitLab {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<CreateReleaseOptions> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateRelease(options) => Some(options),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Upload(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

#[async_trait]
impl GitLabApi for FakeGitLab {
    async fn get_project(&self, path: &str) -> ApiResult<(Project, StatusCode)> {
        self.record(Call::GetProject(path.to_string()));
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Ok((
            Project {
                id: PROJECT_ID,
                name,
            },
            self.project_status,
        ))
    }

    async fn upload_file(&self, _project_id: u64, file: &Path) -> ApiResult<UploadedFile> {
        self.record(Call::Upload(file.to_path_buf()));
        let name = file_name(file);
        if let Some(ms) = self.upload_delays.get(&name) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if self.failing_uploads.contains(&name) {
            return Err(ApiError::NotFound {
                resource: "project uploads".to_string(),
            });
        }
        Ok(UploadedFile {
            url: format!("/uploads/0123abcd/{name}"),
            alt: name,
        })
    }

    async fn get_release(&self, _project_id: u64, tag: &str) -> ApiResult<Release> {
        self.record(Call::GetRelease(tag.to_string()));
        match &self.existing_links {
            Some(links) => Ok(Release {
                tag_name: tag.to_string(),
                name: Some(tag.to_string()),
                description: None,
                assets: ReleaseAssets {
                    links: links.clone(),
                },
            }),
            None => Err(ApiError::NotFound {
                resource: format!("release {tag}"),
            }),
        }
    }

    async fn create_release(
        &self,
        _project_id: u64,
        options: &CreateReleaseOptions,
    ) -> ApiResult<Release> {
        self.record(Call::CreateRelease(options.clone()));
        Ok(Release {
            tag_name: options.tag_name.clone(),
            name: Some(options.name.clone()),
            description: Some(options.description.clone()),
            assets: ReleaseAssets::default(),
        })
    }

    async fn delete_release(&self, _project_id: u64, tag: &str) -> ApiResult<()> {
        self.record(Call::DeleteRelease(tag.to_string()));
        Ok(())
    }

    async fn delete_release_link(
        &self,
        _project_id: u64,
        _tag: &str,
        link_id: u64,
    ) -> ApiResult<()> {
        self.record(Call::DeleteLink(link_id));
        if self.failing_link == Some(link_id) {
            return Err(ApiError::NotFound {
                resource: format!("release link {link_id}"),
            });
        }
        Ok(())
    }
}

pub fn link(id: u64, name: &str) -> ReleaseLink {
    ReleaseLink {
        id,
        name: name.to_string(),
        url: format!("https://gitlab.com/owner/repo/uploads/old/{name}"),
    }
}
