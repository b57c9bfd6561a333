//! GitHub-backed implementation of [`Remote`].
//!
//! Comparisons and release lookups go through the REST API; file content
//! comes from the raw-content host so downloads stream without the JSON
//! envelope.

use std::time::Duration;

use ureq::Agent;

use super::{Comparison, RawFile, Release, Remote, RemoteError, RepoLocator};

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Connection settings for [`GitHubRemote`].
///
/// The bases are overridable so tests and self-hosted forges can point the
/// client elsewhere.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// REST API base, no trailing slash.
    pub api_base: String,
    /// Raw content base, no trailing slash.
    pub raw_base: String,
    pub user_agent: String,
    /// Bound on every request; a hung endpoint must not stall a patch.
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
            user_agent: concat!("driftpatch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct GitHubRemote {
    agent: Agent,
    config: GitHubConfig,
}

impl GitHubRemote {
    pub fn new(config: GitHubConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .user_agent(config.user_agent.as_str())
            // Status handling is ours: 404 on a raw file and non-2xx on a
            // release lookup mean different things to different callers.
            .http_status_as_error(false)
            .build()
            .new_agent();
        GitHubRemote { agent, config }
    }

    fn compare_url(&self, repo: &RepoLocator, base: &str, target: &str) -> String {
        format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.config.api_base, repo.owner, repo.repo, base, target
        )
    }

    fn raw_url(&self, repo: &RepoLocator, ref_name: &str, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.config.raw_base, repo.owner, repo.repo, ref_name, path
        )
    }

    fn latest_release_url(&self, repo: &RepoLocator) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.config.api_base, repo.owner, repo.repo
        )
    }
}

impl Remote for GitHubRemote {
    fn compare(
        &self,
        repo: &RepoLocator,
        base: &str,
        target: &str,
    ) -> Result<Comparison, RemoteError> {
        let context = format!("compare {}...{} in {}", base, target, repo);
        let url = self.compare_url(repo, base, target);

        let mut response = self
            .agent
            .get(&url)
            .header("Accept", ACCEPT_HEADER)
            .call()
            .map_err(|e| RemoteError::Network {
                context: context.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                context,
                code: status.as_u16(),
            });
        }

        // Comparison payloads are small; read fully, then parse.
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RemoteError::Network {
                context: context.clone(),
                reason: e.to_string(),
            })?;

        serde_json::from_str(&body).map_err(|e| RemoteError::Parse {
            context,
            reason: e.to_string(),
        })
    }

    fn raw_file(
        &self,
        repo: &RepoLocator,
        ref_name: &str,
        path: &str,
    ) -> Result<RawFile, RemoteError> {
        let url = self.raw_url(repo, ref_name, path);

        let response = self.agent.get(&url).call().map_err(|e| RemoteError::Network {
            context: url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(RemoteError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(RemoteError::Status {
                context: url,
                code: status.as_u16(),
            });
        }

        let body = response.into_body();
        let total_bytes = body.content_length().unwrap_or(0);
        Ok(RawFile {
            reader: Box::new(body.into_reader()),
            total_bytes,
        })
    }

    fn latest_release(&self, repo: &RepoLocator) -> Result<Option<Release>, RemoteError> {
        let context = format!("latest release of {}", repo);
        let url = self.latest_release_url(repo);

        let mut response = self
            .agent
            .get(&url)
            .header("Accept", ACCEPT_HEADER)
            .call()
            .map_err(|e| RemoteError::Network {
                context: context.clone(),
                reason: e.to_string(),
            })?;

        // A repository with no published releases answers 404 here; that is
        // "nothing to update to", not a failure.
        if !response.status().is_success() {
            return Ok(None);
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RemoteError::Network {
                context: context.clone(),
                reason: e.to_string(),
            })?;

        let release = serde_json::from_str(&body).map_err(|e| RemoteError::Parse {
            context,
            reason: e.to_string(),
        })?;
        Ok(Some(release))
    }
}
