//! Delta updates for game installs.
//!
//! Resolves the file-level differences between two published versions
//! through a remote comparison endpoint, downloads only the files that
//! changed, deletes the ones that are gone, and records the installed
//! version under the install root. Progress flows through callbacks; a
//! patch run always ends in exactly one terminal event.
//!
//! The remote host is behind the [`remote::Remote`] trait;
//! [`remote::GitHubRemote`] is the production implementation.

pub mod changes;
pub mod install;
pub mod patch;
pub mod release;
pub mod remote;
pub mod transfer;
pub mod version;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the caller-facing surface
pub use changes::{resolve_changes, ChangeSet, ChangeStatus, FileChange};
pub use patch::{apply_patch, PatchError, PatchProgress, PatchRequest, PatchResult, PatchStats, Phase};
pub use release::{check_for_update, latest_version, UpdateCheck};
pub use remote::{GitHubConfig, GitHubRemote, Remote, RepoLocator};
pub use transfer::TransferProgress;
