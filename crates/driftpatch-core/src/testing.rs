//! Deterministic in-memory remote for tests.

use std::collections::HashMap;
use std::io::{self, Cursor, Read};

use crate::remote::{
    Comparison, ComparisonFile, RawFile, Release, Remote, RemoteError, RepoLocator,
};

/// Scripted [`Remote`] backed by in-memory data.
///
/// `truncate_after` maps a path to a byte count; downloads of that path
/// yield that many bytes and then fail mid-stream, while still advertising
/// the full content length.
#[derive(Default)]
pub(crate) struct FakeRemote {
    pub comparison: Option<Comparison>,
    pub compare_error: Option<RemoteError>,
    pub files: HashMap<String, Vec<u8>>,
    pub truncate_after: HashMap<String, usize>,
    pub hide_content_length: bool,
    pub latest: Option<Release>,
}

impl Remote for FakeRemote {
    fn compare(
        &self,
        _repo: &RepoLocator,
        _base: &str,
        _target: &str,
    ) -> Result<Comparison, RemoteError> {
        if let Some(err) = &self.compare_error {
            return Err(err.clone());
        }
        Ok(self.comparison.clone().unwrap_or_default())
    }

    fn raw_file(
        &self,
        _repo: &RepoLocator,
        _ref_name: &str,
        path: &str,
    ) -> Result<RawFile, RemoteError> {
        let Some(content) = self.files.get(path) else {
            return Err(RemoteError::NotFound {
                path: path.to_string(),
            });
        };

        let total_bytes = if self.hide_content_length {
            0
        } else {
            content.len() as u64
        };

        let reader: Box<dyn Read> = match self.truncate_after.get(path) {
            Some(&keep) => Box::new(FailingReader {
                inner: Cursor::new(content[..keep.min(content.len())].to_vec()),
            }),
            None => Box::new(Cursor::new(content.clone())),
        };

        Ok(RawFile {
            reader,
            total_bytes,
        })
    }

    fn latest_release(&self, _repo: &RepoLocator) -> Result<Option<Release>, RemoteError> {
        Ok(self.latest.clone())
    }
}

/// Yields its inner bytes, then errors instead of reporting EOF.
struct FailingReader {
    inner: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = self.inner.read(buf)?;
        if count == 0 {
            Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset mid-transfer",
            ))
        } else {
            Ok(count)
        }
    }
}

pub(crate) fn comparison_entry(
    filename: &str,
    status: &str,
    additions: u64,
    deletions: u64,
) -> ComparisonFile {
    ComparisonFile {
        filename: filename.to_string(),
        status: status.to_string(),
        additions,
        deletions,
        changes: additions + deletions,
        patch: None,
        previous_filename: None,
    }
}
