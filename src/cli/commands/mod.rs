//! Release command execution.

use crate::cli::{Args, OutputManager};
use crate::config::{Config, EnvConfig};
use crate::error::{EXIT_OK, Result};
use crate::gitlab::GitLabClient;
use crate::project::origin_url;
use crate::release::{ReleaseSummary, ReleaseWorkflow};
use std::path::Path;
use std::sync::Arc;

/// Execute the release described by `args`, returning the exit code
pub async fn execute_command(args: Args, env: &EnvConfig) -> i32 {
    let output = OutputManager::new(args.quiet);

    let repo_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            output.error(&format!("Get current directory failed: {}", e));
            return crate::error::EXIT_ERROR;
        }
    };

    match execute_release(&args, env, &repo_dir, &output).await {
        Ok(summary) => {
            report(&output, &summary);
            EXIT_OK
        }
        Err(e) => {
            output.error(&e.to_string());
            if e.may_leave_partial_state() {
                let _ = output.warn(&format!(
                    "The release for {} may be left with some asset links deleted",
                    args.tag
                ));
            }
            e.exit_code()
        }
    }
}

/// Run the release workflow for the repository at `repo_dir`
pub async fn execute_release(
    args: &Args,
    env: &EnvConfig,
    repo_dir: &Path,
    output: &OutputManager,
) -> Result<ReleaseSummary> {
    if args.has_partial_asset() {
        let _ = output.warn("Both --asset-name and --asset-url are required, ignoring the asset");
    }

    let config = Config::from_env(env);
    let client = Arc::new(GitLabClient::new(&config)?);
    let remote = origin_url(repo_dir)?;
    let request = args.to_request();

    let _ = output.progress(&format!("Creating release {}...", request.tag));
    ReleaseWorkflow::new(client, config).run(&remote, &request).await
}

/// Print the summary of a created release
pub fn report(output: &OutputManager, summary: &ReleaseSummary) {
    if let Some(count) = summary.replaced_links {
        let _ = output.println(&format!(
            "Replaced existing release {} ({} link(s) removed)",
            summary.tag, count
        ));
    }
    let _ = output.section("Created release");
    let _ = output.println(&format!("Title: {}", summary.title));
    let _ = output.println("Release assets:");
    for asset in &summary.assets {
        let _ = output.asset(&asset.name, &asset.url);
    }
}
