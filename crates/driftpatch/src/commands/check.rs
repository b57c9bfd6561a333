use std::path::PathBuf;

use driftpatch_core::release;
use driftpatch_core::remote::{GitHubConfig, GitHubRemote, RemoteError, RepoLocator};

pub fn run(
    owner: &str,
    repo: &str,
    install_root: Option<PathBuf>,
    current: Option<&str>,
) -> Result<(), RemoteError> {
    let root = super::resolve_install_root(repo, install_root);
    let remote = GitHubRemote::new(GitHubConfig::default());
    let locator = RepoLocator::new(owner, repo);

    let check = release::check_for_update(&remote, &locator, &root, current)?;

    match &check.current_version {
        Some(version) => println!("Installed: {}", version),
        None => println!("Installed: none"),
    }
    match &check.latest_version {
        Some(version) => println!("Latest:    {}", version),
        None => println!("Latest:    none"),
    }
    println!("{}", check.message);

    Ok(())
}
