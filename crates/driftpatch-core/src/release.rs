//! Release lookup and update-availability checks.

use std::cmp::Ordering;
use std::path::Path;

use crate::install;
use crate::remote::{Remote, RemoteError, RepoLocator};
use crate::version;

/// Outcome of an update-availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    pub has_update: bool,
    /// Normalized installed version, if anything is installed.
    pub current_version: Option<String>,
    /// Latest published tag, verbatim.
    pub latest_version: Option<String>,
    pub is_new_install: bool,
    pub message: String,
}

/// Latest published version tag, or `None` when nothing is published.
pub fn latest_version<R>(remote: &R, repo: &RepoLocator) -> Result<Option<String>, RemoteError>
where
    R: Remote + ?Sized,
{
    Ok(remote.latest_release(repo)?.map(|release| release.tag_name))
}

/// Decide whether the install of `repo` under `install_root` is out of date.
///
/// `known_current` overrides the on-disk marker when the caller already
/// tracks the installed version. An install with no marker and no override
/// reports as a fresh install that needs everything.
pub fn check_for_update<R>(
    remote: &R,
    repo: &RepoLocator,
    install_root: &Path,
    known_current: Option<&str>,
) -> Result<UpdateCheck, RemoteError>
where
    R: Remote + ?Sized,
{
    let Some(latest) = latest_version(remote, repo)? else {
        return Ok(UpdateCheck {
            has_update: false,
            current_version: known_current.map(|v| version::normalize(v.trim()).to_string()),
            latest_version: None,
            is_new_install: false,
            message: "No releases available".to_string(),
        });
    };

    let current = known_current
        .map(|v| version::normalize(v.trim()).to_string())
        .or_else(|| install::read_installed_version(install_root));

    let Some(current) = current else {
        return Ok(UpdateCheck {
            has_update: true,
            current_version: None,
            latest_version: Some(latest),
            is_new_install: true,
            message: "Fresh install required".to_string(),
        });
    };

    let has_update = version::compare(&latest, &current) == Ordering::Greater;
    let message = if has_update {
        format!("Update available: {}", latest)
    } else {
        "Up to date".to_string()
    };

    Ok(UpdateCheck {
        has_update,
        current_version: Some(current),
        latest_version: Some(latest),
        is_new_install: false,
        message,
    })
}
