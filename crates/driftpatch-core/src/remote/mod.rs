//! Remote content host abstraction.
//!
//! The patch pipeline talks to the host that publishes game versions
//! through the [`Remote`] trait, so the orchestrator can be driven by a
//! deterministic in-memory host in tests. The production implementation
//! is [`github::GitHubRemote`].

pub mod github;

use serde::Deserialize;
use std::fmt;
use std::io::Read;

pub use github::{GitHubConfig, GitHubRemote};

/// Identifies a repository on the remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    pub owner: String,
    pub repo: String,
}

impl RepoLocator {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoLocator {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// One file entry in a "compare two refs" response.
///
/// Hosts report more statuses than we act on (`renamed`, `copied`, ...);
/// classification happens in [`crate::changes`].
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonFile {
    pub filename: String,
    pub status: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changes: u64,
    #[serde(default)]
    pub patch: Option<String>,
    #[serde(default)]
    pub previous_filename: Option<String>,
}

/// Parsed comparison between two refs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comparison {
    #[serde(default)]
    pub files: Vec<ComparisonFile>,
}

/// A published release on the remote host.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
}

/// An open download stream for a single file.
pub struct RawFile {
    /// Body stream; reading to EOF yields the file content at the ref.
    pub reader: Box<dyn Read>,
    /// Expected size in bytes, 0 when the host did not report one.
    pub total_bytes: u64,
}

/// Errors from the remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The host could not be reached or the connection broke
    Network { context: String, reason: String },
    /// The host answered with a non-success status
    Status { context: String, code: u16 },
    /// The requested file does not exist at the requested ref
    NotFound { path: String },
    /// A response body was not in the expected shape
    Parse { context: String, reason: String },
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Network { context, reason } => {
                write!(f, "network error during {}: {}", context, reason)
            }
            RemoteError::Status { context, code } => {
                write!(f, "remote returned HTTP {} for {}", code, context)
            }
            RemoteError::NotFound { path } => {
                write!(f, "remote file not found: '{}'", path)
            }
            RemoteError::Parse { context, reason } => {
                write!(f, "unparseable response for {}: {}", context, reason)
            }
        }
    }
}

impl std::error::Error for RemoteError {}

/// A host that can compare refs, stream raw files, and report releases.
pub trait Remote {
    /// Compare two refs and return the file-level differences.
    fn compare(
        &self,
        repo: &RepoLocator,
        base: &str,
        target: &str,
    ) -> Result<Comparison, RemoteError>;

    /// Open a streaming download of `path` as it exists at `ref_name`.
    fn raw_file(
        &self,
        repo: &RepoLocator,
        ref_name: &str,
        path: &str,
    ) -> Result<RawFile, RemoteError>;

    /// Latest published release, or `None` when the repository has none.
    fn latest_release(&self, repo: &RepoLocator) -> Result<Option<Release>, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_deserializes_from_host_payload() {
        let json = r#"{
            "url": "https://example.test/compare/v1.0.0...v1.0.1",
            "status": "ahead",
            "files": [
                {
                    "filename": "data/maps/town.dat",
                    "status": "modified",
                    "additions": 12,
                    "deletions": 4,
                    "changes": 16,
                    "patch": "@@ -1 +1 @@"
                },
                {
                    "filename": "assets/new_sprite.png",
                    "status": "added"
                }
            ]
        }"#;

        let comparison: Comparison = serde_json::from_str(json).unwrap();

        assert_eq!(comparison.files.len(), 2);
        assert_eq!(comparison.files[0].filename, "data/maps/town.dat");
        assert_eq!(comparison.files[0].additions, 12);
        assert_eq!(comparison.files[0].deletions, 4);
        assert_eq!(comparison.files[1].status, "added");
        assert_eq!(comparison.files[1].additions, 0);
        assert!(comparison.files[1].patch.is_none());
    }

    #[test]
    fn comparison_without_files_field_is_empty() {
        let comparison: Comparison = serde_json::from_str(r#"{"status": "identical"}"#).unwrap();
        assert!(comparison.files.is_empty());
    }

    #[test]
    fn renamed_entry_carries_previous_filename() {
        let json = r#"{
            "files": [
                {
                    "filename": "data/new_name.dat",
                    "status": "renamed",
                    "previous_filename": "data/old_name.dat"
                }
            ]
        }"#;

        let comparison: Comparison = serde_json::from_str(json).unwrap();

        assert_eq!(
            comparison.files[0].previous_filename.as_deref(),
            Some("data/old_name.dat")
        );
    }

    #[test]
    fn locator_displays_as_owner_slash_repo() {
        let repo = RepoLocator::new("mirrorbytes", "starfall");
        assert_eq!(repo.to_string(), "mirrorbytes/starfall");
    }
}
