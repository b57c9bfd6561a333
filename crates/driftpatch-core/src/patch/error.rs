use std::fmt;

/// Error type for delta patch operations.
///
/// Display messages are written so a user can tell a remote problem
/// (network, missing ref) from a local one (permissions, disk).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The comparison request failed (network or non-success status)
    CompareFailed { reason: String },
    /// The comparison response body was not well-formed
    MalformedComparison { reason: String },
    /// A file the comparison promised does not exist at the target ref
    FileMissingAtRef { file: String, ref_name: String },
    /// A change entry names a path outside the install root
    UnsafePath { file: String },
    /// A download failed mid-transfer
    TransferFailed { file: String, reason: String },
    /// Local directory creation or file write failed
    Filesystem { path: String, reason: String },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::CompareFailed { reason } => {
                write!(f, "remote comparison failed: {}", reason)
            }
            PatchError::MalformedComparison { reason } => {
                write!(f, "malformed comparison response: {}", reason)
            }
            PatchError::FileMissingAtRef { file, ref_name } => {
                write!(
                    f,
                    "remote file '{}' not found at ref '{}' (tag or branch mismatch?)",
                    file, ref_name
                )
            }
            PatchError::UnsafePath { file } => {
                write!(f, "refusing change entry '{}': path escapes the install root", file)
            }
            PatchError::TransferFailed { file, reason } => {
                write!(f, "download failed for '{}': {}", file, reason)
            }
            PatchError::Filesystem { path, reason } => {
                write!(f, "local filesystem error at '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for PatchError {}
