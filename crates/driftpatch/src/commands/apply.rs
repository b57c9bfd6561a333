use std::path::PathBuf;

use driftpatch_core::patch::{apply_patch, PatchRequest, Phase};
use driftpatch_core::remote::{GitHubConfig, GitHubRemote};

pub fn run(
    owner: &str,
    repo: &str,
    base: &str,
    target: &str,
    install_root: Option<PathBuf>,
) -> Result<(), String> {
    let root = super::resolve_install_root(repo, install_root);
    let remote = GitHubRemote::new(GitHubConfig::default());
    let request = PatchRequest {
        owner: owner.to_string(),
        repo: repo.to_string(),
        base_version: base.to_string(),
        target_version: target.to_string(),
        install_root: root,
    };

    let result = apply_patch(&remote, &request, |progress| match progress.phase {
        Phase::Downloading | Phase::Removing => {
            // One line per file; byte-level events would flood the terminal.
            if progress.transfer.is_none() {
                println!(
                    "[{}/{}] {}",
                    progress.current_file, progress.total_files, progress.message
                );
            }
        }
        Phase::Done | Phase::Failed => {}
        _ => println!("{}", progress.message),
    });

    if result.succeeded {
        if let Some(stats) = result.stats {
            println!(
                "Added {}, modified {}, removed {} ({} files processed)",
                stats.added, stats.modified, stats.removed, stats.total_files_processed
            );
        }
        Ok(())
    } else {
        Err(result
            .error_message
            .unwrap_or_else(|| "patch failed for an unknown reason".to_string()))
    }
}
