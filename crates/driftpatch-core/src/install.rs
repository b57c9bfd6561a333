//! Installed version marker.
//!
//! A plain-text file under the install root records which version is on
//! disk. It is written only after a patch fully completes, so a crash
//! mid-patch leaves the old version in place and the install reads as
//! "still needs update".

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use crate::version;

/// Marker file name, relative to the install root.
pub const VERSION_MARKER_FILENAME: &str = "VERSION.txt";

/// Read the installed version, trimmed and without a leading `v`.
///
/// A missing, empty, or unreadable marker reads as "nothing installed".
pub fn read_installed_version(install_root: &Path) -> Option<String> {
    let path = install_root.join(VERSION_MARKER_FILENAME);
    match fs::read_to_string(&path) {
        Ok(content) => {
            let tag = version::normalize(content.trim());
            if tag.is_empty() {
                None
            } else {
                Some(tag.to_string())
            }
        }
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                log::warn!("failed to read version marker '{}': {}", path.display(), e);
            }
            None
        }
    }
}

/// Write the marker with the normalized form of `tag`, creating the
/// install root if needed.
pub fn write_installed_version(install_root: &Path, tag: &str) -> io::Result<()> {
    fs::create_dir_all(install_root)?;
    fs::write(
        install_root.join(VERSION_MARKER_FILENAME),
        version::normalize(tag.trim()),
    )
}
