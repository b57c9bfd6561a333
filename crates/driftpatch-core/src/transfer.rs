//! Streaming file transfer from the remote host into the install tree.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::patch::PatchError;
use crate::remote::{Remote, RemoteError, RepoLocator};

/// Byte-level progress for a single file transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferProgress {
    /// Repository-relative path being transferred.
    pub path: String,
    pub bytes_downloaded: u64,
    /// 0 when the host did not report a length.
    pub bytes_total: u64,
    /// 0.0 while the total is unknown.
    pub percentage: f64,
}

const CHUNK_SIZE: usize = 8 * 1024;

/// Stream `remote_path` at `ref_name` into `dest`, reporting progress per
/// chunk read.
///
/// Parent directories are created as needed. If anything fails after the
/// destination file was created, the partial file is deleted before the
/// error is returned: a failed transfer never leaves a corrupt file in
/// the install tree. Returns the number of bytes written.
pub fn fetch_file<R, F>(
    remote: &R,
    repo: &RepoLocator,
    ref_name: &str,
    remote_path: &str,
    dest: &Path,
    mut on_progress: F,
) -> Result<u64, PatchError>
where
    R: Remote + ?Sized,
    F: FnMut(TransferProgress),
{
    let raw = remote.raw_file(repo, ref_name, remote_path).map_err(|e| match e {
        RemoteError::NotFound { path } => PatchError::FileMissingAtRef {
            file: path,
            ref_name: ref_name.to_string(),
        },
        other => PatchError::TransferFailed {
            file: remote_path.to_string(),
            reason: other.to_string(),
        },
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| PatchError::Filesystem {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    let file = File::create(dest).map_err(|e| PatchError::Filesystem {
        path: dest.display().to_string(),
        reason: e.to_string(),
    })?;

    match stream_to_file(raw.reader, file, raw.total_bytes, remote_path, dest, &mut on_progress) {
        Ok(written) => Ok(written),
        Err(err) => {
            if let Err(cleanup) = fs::remove_file(dest) {
                log::warn!(
                    "failed to delete partial file '{}': {}",
                    dest.display(),
                    cleanup
                );
            }
            Err(err)
        }
    }
}

fn stream_to_file<F>(
    mut reader: Box<dyn Read>,
    mut file: File,
    total: u64,
    remote_path: &str,
    dest: &Path,
    on_progress: &mut F,
) -> Result<u64, PatchError>
where
    F: FnMut(TransferProgress),
{
    let mut buf = [0u8; CHUNK_SIZE];
    let mut written: u64 = 0;

    loop {
        let count = reader.read(&mut buf).map_err(|e| PatchError::TransferFailed {
            file: remote_path.to_string(),
            reason: e.to_string(),
        })?;
        if count == 0 {
            break;
        }

        file.write_all(&buf[..count]).map_err(|e| PatchError::Filesystem {
            path: dest.display().to_string(),
            reason: e.to_string(),
        })?;
        written += count as u64;

        on_progress(TransferProgress {
            path: remote_path.to_string(),
            bytes_downloaded: written,
            bytes_total: total,
            percentage: if total > 0 {
                written as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        });
    }

    Ok(written)
}

/// Delete `path` if it exists.
///
/// Missing files count as success, and any other failure is logged and
/// swallowed so one stuck file cannot abort the patch. Returns true when
/// a file was actually deleted.
pub fn remove_file(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            log::warn!("failed to remove '{}': {}", path.display(), e);
            false
        }
    }
}
