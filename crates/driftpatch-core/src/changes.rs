//! Change-set resolution against the remote comparison endpoint.

use crate::patch::PatchError;
use crate::remote::{ComparisonFile, Remote, RemoteError, RepoLocator};

/// How a file changed between two refs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Modified,
    Removed,
}

/// A single file-level difference between two refs.
#[derive(Debug, Clone)]
pub struct FileChange {
    /// Repository-relative path, used verbatim as the install suffix.
    pub path: String,
    pub status: ChangeStatus,
    pub added_lines: u64,
    pub removed_lines: u64,
    /// Unified diff text when the host supplied one.
    pub patch: Option<String>,
}

/// All differences between two refs, bucketed by status.
///
/// Order within each bucket is the order the host returned.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub added: Vec<FileChange>,
    pub modified: Vec<FileChange>,
    pub removed: Vec<FileChange>,
    /// Sum of added and removed lines across all returned entries. A size
    /// proxy only: the comparison endpoint does not report byte counts.
    pub estimated_changed_lines: u64,
}

impl ChangeSet {
    pub fn total_files(&self) -> usize {
        self.added.len() + self.modified.len() + self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_files() == 0
    }
}

/// Resolve the file-level differences between `base` and `target`.
///
/// Entries are classified by the status string the host reports. A renamed
/// file becomes a removal of its old path plus an addition of its new path;
/// a rename with no previous path degrades to an addition, leaving the old
/// file behind. Entries with any other status are skipped.
pub fn resolve_changes<R>(
    remote: &R,
    repo: &RepoLocator,
    base: &str,
    target: &str,
) -> Result<ChangeSet, PatchError>
where
    R: Remote + ?Sized,
{
    let comparison = remote.compare(repo, base, target).map_err(|e| match e {
        RemoteError::Parse { reason, .. } => PatchError::MalformedComparison { reason },
        other => PatchError::CompareFailed {
            reason: other.to_string(),
        },
    })?;

    let mut set = ChangeSet::default();

    for entry in comparison.files {
        set.estimated_changed_lines += entry.additions + entry.deletions;

        let ComparisonFile {
            filename,
            status,
            additions,
            deletions,
            patch,
            previous_filename,
            ..
        } = entry;

        match status.as_str() {
            "added" => set.added.push(FileChange {
                path: filename,
                status: ChangeStatus::Added,
                added_lines: additions,
                removed_lines: deletions,
                patch,
            }),
            "modified" => set.modified.push(FileChange {
                path: filename,
                status: ChangeStatus::Modified,
                added_lines: additions,
                removed_lines: deletions,
                patch,
            }),
            "removed" => set.removed.push(FileChange {
                path: filename,
                status: ChangeStatus::Removed,
                added_lines: additions,
                removed_lines: deletions,
                patch,
            }),
            "renamed" => {
                if let Some(previous) = previous_filename {
                    set.removed.push(FileChange {
                        path: previous,
                        status: ChangeStatus::Removed,
                        added_lines: 0,
                        removed_lines: 0,
                        patch: None,
                    });
                }
                set.added.push(FileChange {
                    path: filename,
                    status: ChangeStatus::Added,
                    added_lines: additions,
                    removed_lines: deletions,
                    patch,
                });
            }
            other => {
                log::debug!("skipping comparison entry '{}' with status '{}'", filename, other);
            }
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{comparison_entry, FakeRemote};
    use crate::remote::Comparison;

    fn repo() -> RepoLocator {
        RepoLocator::new("mirrorbytes", "starfall")
    }

    #[test]
    fn one_entry_per_status_lands_in_each_bucket() {
        let remote = FakeRemote {
            comparison: Some(Comparison {
                files: vec![
                    comparison_entry("assets/new.png", "added", 0, 0),
                    comparison_entry("data/town.dat", "modified", 12, 4),
                    comparison_entry("data/old.dat", "removed", 0, 30),
                ],
            }),
            ..FakeRemote::default()
        };

        let set = resolve_changes(&remote, &repo(), "v1.0.0", "v1.0.1").unwrap();

        assert_eq!(set.added.len(), 1);
        assert_eq!(set.modified.len(), 1);
        assert_eq!(set.removed.len(), 1);
        assert_eq!(set.added[0].path, "assets/new.png");
        assert_eq!(set.modified[0].path, "data/town.dat");
        assert_eq!(set.removed[0].path, "data/old.dat");
        assert_eq!(set.estimated_changed_lines, 12 + 4 + 30);
        assert_eq!(set.total_files(), 3);
    }

    #[test]
    fn empty_comparison_yields_empty_set() {
        let remote = FakeRemote::default();

        let set = resolve_changes(&remote, &repo(), "v1.0.0", "v1.0.0").unwrap();

        assert!(set.is_empty());
        assert_eq!(set.estimated_changed_lines, 0);
    }

    #[test]
    fn renamed_splits_into_remove_and_add() {
        let mut entry = comparison_entry("data/new_name.dat", "renamed", 2, 1);
        entry.previous_filename = Some("data/old_name.dat".to_string());
        let remote = FakeRemote {
            comparison: Some(Comparison { files: vec![entry] }),
            ..FakeRemote::default()
        };

        let set = resolve_changes(&remote, &repo(), "v1.0.0", "v1.0.1").unwrap();

        assert_eq!(set.removed.len(), 1);
        assert_eq!(set.removed[0].path, "data/old_name.dat");
        assert_eq!(set.added.len(), 1);
        assert_eq!(set.added[0].path, "data/new_name.dat");
    }

    #[test]
    fn renamed_without_previous_path_degrades_to_add() {
        let remote = FakeRemote {
            comparison: Some(Comparison {
                files: vec![comparison_entry("data/new_name.dat", "renamed", 0, 0)],
            }),
            ..FakeRemote::default()
        };

        let set = resolve_changes(&remote, &repo(), "v1.0.0", "v1.0.1").unwrap();

        assert!(set.removed.is_empty());
        assert_eq!(set.added.len(), 1);
    }

    #[test]
    fn unknown_status_is_skipped_but_counted_in_estimate() {
        let remote = FakeRemote {
            comparison: Some(Comparison {
                files: vec![
                    comparison_entry("data/copied.dat", "copied", 5, 0),
                    comparison_entry("data/town.dat", "modified", 1, 1),
                ],
            }),
            ..FakeRemote::default()
        };

        let set = resolve_changes(&remote, &repo(), "v1.0.0", "v1.0.1").unwrap();

        assert_eq!(set.total_files(), 1);
        assert_eq!(set.estimated_changed_lines, 7);
    }

    #[test]
    fn remote_failure_maps_to_compare_failed() {
        let remote = FakeRemote {
            compare_error: Some(RemoteError::Status {
                context: "compare".to_string(),
                code: 503,
            }),
            ..FakeRemote::default()
        };

        let result = resolve_changes(&remote, &repo(), "v1.0.0", "v1.0.1");

        assert!(matches!(result, Err(PatchError::CompareFailed { .. })));
    }

    #[test]
    fn parse_failure_maps_to_malformed_comparison() {
        let remote = FakeRemote {
            compare_error: Some(RemoteError::Parse {
                context: "compare".to_string(),
                reason: "expected value at line 1".to_string(),
            }),
            ..FakeRemote::default()
        };

        let result = resolve_changes(&remote, &repo(), "v1.0.0", "v1.0.1");

        assert!(matches!(result, Err(PatchError::MalformedComparison { .. })));
    }
}
