//! HTTP client for the GitLab v4 REST API

use super::types::{CreateReleaseOptions, Project, Release, UploadedFile};
use super::{ApiError, ApiResult, GitLabApi};
use crate::config::Config;
use crate::error::{ReleaseError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use std::path::Path;
use url::Url;

const TOKEN_HEADER: &str = "private-token";

/// GitLab REST client
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: reqwest::Client,
    api_url: Url,
}

impl GitLabClient {
    /// Create a client for the API endpoint and token in `config`
    pub fn new(config: &Config) -> Result<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|e| ReleaseError::Config {
            context: "Invalid GitLab API endpoint",
            reason: format!("{}: {}", config.api_url, e),
        })?;
        if api_url.cannot_be_a_base() {
            return Err(ReleaseError::Config {
                context: "Invalid GitLab API endpoint",
                reason: format!("{} cannot be used as a base URL", config.api_url),
            });
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(token).map_err(|e| ReleaseError::Config {
                context: "Invalid GitLab token",
                reason: e.to_string(),
            })?;
            value.set_sensitive(true);
            headers.insert(TOKEN_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("glr/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| ReleaseError::Config {
                context: "Create gitlab client failed",
                reason: e.to_string(),
            })?;

        Ok(Self { http, api_url })
    }

    /// Append path segments to the API URL, encoding each one whole
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.api_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        resource: &str,
        build: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
    ) -> ApiResult<Response> {
        log::debug!("{} {}", method, url);
        let response = build(self.http.request(method.clone(), url.clone()))
            .send()
            .await?;
        check_status(method, url, resource, response).await
    }
}

async fn check_status(
    method: Method,
    url: Url,
    resource: &str,
    response: Response,
) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound {
            resource: resource.to_string(),
        });
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        method: method.to_string(),
        url: url.to_string(),
        status,
        message: error_message(&body, status),
    })
}

/// Extract GitLab's `message` or `error` field from an error body
fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            match value.get(key) {
                Some(serde_json::Value::String(s)) => return s.clone(),
                Some(other) => return other.to_string(),
                None => {}
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl GitLabApi for GitLabClient {
    async fn get_project(&self, path: &str) -> ApiResult<(Project, StatusCode)> {
        let url = self.endpoint(&["projects", path])?;
        let response = self
            .send(Method::GET, url, &format!("project {path}"), |r| r)
            .await?;
        let status = response.status();
        let project = response.json::<Project>().await?;
        Ok((project, status))
    }

    async fn upload_file(&self, project_id: u64, file: &Path) -> ApiResult<UploadedFile> {
        let content = tokio::fs::read(file).await.map_err(|e| ApiError::Io {
            path: file.to_path_buf(),
            source: e,
        })?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.to_string_lossy().into_owned());

        let url = self.endpoint(&["projects", &project_id.to_string(), "uploads"])?;
        let form = Form::new().part("file", Part::bytes(content).file_name(file_name));
        let response = self
            .send(Method::POST, url, "project uploads", |r| r.multipart(form))
            .await?;
        Ok(response.json::<UploadedFile>().await?)
    }

    async fn get_release(&self, project_id: u64, tag: &str) -> ApiResult<Release> {
        let url = self.endpoint(&["projects", &project_id.to_string(), "releases", tag])?;
        let response = self
            .send(Method::GET, url, &format!("release {tag}"), |r| r)
            .await?;
        Ok(response.json::<Release>().await?)
    }

    async fn create_release(
        &self,
        project_id: u64,
        options: &CreateReleaseOptions,
    ) -> ApiResult<Release> {
        let url = self.endpoint(&["projects", &project_id.to_string(), "releases"])?;
        let response = self
            .send(Method::POST, url, "project releases", |r| r.json(options))
            .await?;
        Ok(response.json::<Release>().await?)
    }

    async fn delete_release(&self, project_id: u64, tag: &str) -> ApiResult<()> {
        let url = self.endpoint(&["projects", &project_id.to_string(), "releases", tag])?;
        self.send(Method::DELETE, url, &format!("release {tag}"), |r| r)
            .await?;
        Ok(())
    }

    async fn delete_release_link(
        &self,
        project_id: u64,
        tag: &str,
        link_id: u64,
    ) -> ApiResult<()> {
        let url = self.endpoint(&[
            "projects",
            &project_id.to_string(),
            "releases",
            tag,
            "assets",
            "links",
            &link_id.to_string(),
        ])?;
        self.send(Method::DELETE, url, &format!("release link {link_id}"), |r| r)
            .await?;
        Ok(())
    }
}
