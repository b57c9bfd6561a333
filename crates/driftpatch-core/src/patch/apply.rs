//! End-to-end patch orchestration.
//!
//! Drives the full sequence for one installation: resolve the change set,
//! download additions and modifications, delete removals, persist the new
//! version marker. Progress is reported through a callback; exactly one
//! terminal event (`Done` or `Failed`) is emitted per run.

use std::path::{Component, Path, PathBuf};

use crate::changes::{self, ChangeSet};
use crate::install;
use crate::patch::{PatchError, PatchProgress, PatchResult, PatchStats, Phase};
use crate::remote::{Remote, RepoLocator};
use crate::transfer;

/// Everything needed to patch one installation.
#[derive(Debug, Clone)]
pub struct PatchRequest {
    pub owner: String,
    pub repo: String,
    /// Version currently on disk.
    pub base_version: String,
    /// Version to update to; also the ref every file is fetched at.
    pub target_version: String,
    pub install_root: PathBuf,
}

impl PatchRequest {
    fn locator(&self) -> RepoLocator {
        RepoLocator::new(self.owner.clone(), self.repo.clone())
    }
}

/// Apply the delta between `base_version` and `target_version` to the
/// install root.
///
/// Any download failure aborts the run and the install may then hold a mix
/// of old and new files; re-running the same patch is the supported
/// recovery, since every download fully overwrites its destination. A run
/// that finds no changes succeeds without touching the filesystem. Two
/// concurrent runs against the same install root are not safe; callers
/// must serialize patch requests per installation.
pub fn apply_patch<R, F>(remote: &R, request: &PatchRequest, mut on_progress: F) -> PatchResult
where
    R: Remote + ?Sized,
    F: FnMut(PatchProgress),
{
    match run(remote, request, &mut on_progress) {
        Ok(stats) => {
            let message = if stats == PatchStats::default() {
                "No changes detected".to_string()
            } else {
                format!(
                    "Patch applied: {} files processed",
                    stats.total_files_processed
                )
            };
            on_progress(PatchProgress {
                phase: Phase::Done,
                message,
                current_file: stats.total_files_processed,
                total_files: stats.total_files_processed,
                transfer: None,
            });
            PatchResult::success(stats)
        }
        Err(err) => {
            let message = err.to_string();
            on_progress(PatchProgress {
                phase: Phase::Failed,
                message: message.clone(),
                current_file: 0,
                total_files: 0,
                transfer: None,
            });
            PatchResult::failure(message)
        }
    }
}

fn run<R, F>(
    remote: &R,
    request: &PatchRequest,
    on_progress: &mut F,
) -> Result<PatchStats, PatchError>
where
    R: Remote + ?Sized,
    F: FnMut(PatchProgress),
{
    let repo = request.locator();

    on_progress(PatchProgress {
        phase: Phase::Analyzing,
        message: format!(
            "Analyzing changes between {} and {}",
            request.base_version, request.target_version
        ),
        current_file: 0,
        total_files: 0,
        transfer: None,
    });

    let set = changes::resolve_changes(
        remote,
        &repo,
        &request.base_version,
        &request.target_version,
    )?;

    // A patch between identical content states is a no-op that still
    // reports success; nothing on disk is touched, marker included.
    if set.is_empty() {
        return Ok(PatchStats::default());
    }

    validate_paths(&set)?;

    let total_files = set.total_files();
    on_progress(PatchProgress {
        phase: Phase::Summary,
        message: format!(
            "Found {} changed files ({} added, {} modified, {} removed)",
            total_files,
            set.added.len(),
            set.modified.len(),
            set.removed.len()
        ),
        current_file: 0,
        total_files,
        transfer: None,
    });

    let mut processed = 0usize;

    // Added before modified: a fixed order keeps runs reproducible.
    for change in set.added.iter().chain(set.modified.iter()) {
        let index = processed + 1;
        let dest = request.install_root.join(&change.path);

        on_progress(PatchProgress {
            phase: Phase::Downloading,
            message: format!("Downloading {}", change.path),
            current_file: index,
            total_files,
            transfer: None,
        });

        transfer::fetch_file(
            remote,
            &repo,
            &request.target_version,
            &change.path,
            &dest,
            |progress| {
                on_progress(PatchProgress {
                    phase: Phase::Downloading,
                    message: format!("Downloading {}", change.path),
                    current_file: index,
                    total_files,
                    transfer: Some(progress),
                });
            },
        )?;
        processed += 1;
    }

    // Removals are best-effort: a file that refuses to go away must not
    // fail the patch, and later removals still run.
    for change in &set.removed {
        processed += 1;
        on_progress(PatchProgress {
            phase: Phase::Removing,
            message: format!("Removing {}", change.path),
            current_file: processed,
            total_files,
            transfer: None,
        });
        transfer::remove_file(&request.install_root.join(&change.path));
    }

    // Written only after downloads and removals, so a crash mid-patch
    // leaves the marker at the old version.
    install::write_installed_version(&request.install_root, &request.target_version).map_err(
        |e| PatchError::Filesystem {
            path: request.install_root.display().to_string(),
            reason: e.to_string(),
        },
    )?;

    Ok(PatchStats {
        added: set.added.len(),
        modified: set.modified.len(),
        removed: set.removed.len(),
        total_files_processed: processed,
    })
}

/// Refuse change sets that would write or delete outside the install root.
fn validate_paths(set: &ChangeSet) -> Result<(), PatchError> {
    for change in set
        .added
        .iter()
        .chain(set.modified.iter())
        .chain(set.removed.iter())
    {
        if !is_install_relative(&change.path) {
            return Err(PatchError::UnsafePath {
                file: change.path.clone(),
            });
        }
    }
    Ok(())
}

fn is_install_relative(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    Path::new(path).components().all(|component| {
        matches!(component, Component::Normal(_) | Component::CurDir)
    })
}
