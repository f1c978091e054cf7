//! Command line argument parsing.

use crate::assets::AssetLink;
use crate::release::ReleaseRequest;
use clap::Parser;
use std::path::PathBuf;

/// Create a GitLab release for an existing tag
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "glr",
    version,
    about = "glr is a tool for creating GitLab Release.",
    long_about = "glr is a tool for creating GitLab Release.

The project is taken from the origin remote of the repository in the
current directory. GITLAB_API overrides the API endpoint and GITLAB_TOKEN
supplies the private token."
)]
pub struct Args {
    /// Existing tag name
    #[arg(index = 1, value_name = "TAG")]
    pub tag: String,

    /// Set release title. Default is TAG.
    #[arg(long, short = 'n', value_name = "TITLE")]
    pub name: Option<String>,

    /// Set description for release. Default is TAG.
    #[arg(long, short = 'b', value_name = "TEXT")]
    pub body: Option<String>,

    /// Set asset url.
    #[arg(long, value_name = "URL")]
    pub asset_url: Option<String>,

    /// Set asset name.
    #[arg(long, value_name = "NAME")]
    pub asset_name: Option<String>,

    /// Set local asset path (file or directory).
    #[arg(long, value_name = "PATH")]
    pub upload: Option<PathBuf>,

    /// Replace when GitLab Release is already exists.
    #[arg(long)]
    pub replace: bool,

    /// Only print errors.
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments, leaving exit handling to the caller
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// The explicit asset, present only when both name and URL are given
    pub fn explicit_asset(&self) -> Option<AssetLink> {
        match (&self.asset_name, &self.asset_url) {
            (Some(name), Some(url)) if !name.is_empty() && !url.is_empty() => {
                Some(AssetLink::new(name, url))
            }
            _ => None,
        }
    }

    /// Whether exactly one of `--asset-name` and `--asset-url` was given
    pub fn has_partial_asset(&self) -> bool {
        let name = self.asset_name.as_deref().is_some_and(|s| !s.is_empty());
        let url = self.asset_url.as_deref().is_some_and(|s| !s.is_empty());
        name != url
    }

    /// Build the release request described by these arguments
    pub fn to_request(&self) -> ReleaseRequest {
        let mut request = ReleaseRequest::new(&self.tag)
            .title(self.name.clone())
            .description(self.body.clone())
            .replace(self.replace);
        if let Some(upload) = &self.upload {
            request = request.upload(upload);
        }
        if let Some(asset) = self.explicit_asset() {
            request = request.explicit_asset(asset);
        }
        request
    }
}
