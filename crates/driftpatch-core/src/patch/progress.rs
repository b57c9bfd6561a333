//! Progress events and terminal results for patch runs.

use std::fmt;

use crate::transfer::TransferProgress;

/// Processing phases for a patch run.
///
/// `Analyzing → Summary → Downloading → Removing → Done`, with `Failed`
/// reachable from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Analyzing,
    Summary,
    Downloading,
    Removing,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Analyzing => write!(f, "Analyzing"),
            Phase::Summary => write!(f, "Summary"),
            Phase::Downloading => write!(f, "Downloading"),
            Phase::Removing => write!(f, "Removing"),
            Phase::Done => write!(f, "Done"),
            Phase::Failed => write!(f, "Failed"),
        }
    }
}

/// Progress event emitted while a patch is applied.
#[derive(Debug, Clone)]
pub struct PatchProgress {
    pub phase: Phase,
    pub message: String,
    /// 1-based index of the file being processed, 0 before file work starts.
    pub current_file: usize,
    pub total_files: usize,
    /// Byte-level progress for the file currently downloading.
    pub transfer: Option<TransferProgress>,
}

/// Counts of work performed by a successful patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchStats {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
    pub total_files_processed: usize,
}

/// Terminal outcome of a patch run.
#[derive(Debug, Clone)]
pub struct PatchResult {
    pub succeeded: bool,
    pub stats: Option<PatchStats>,
    pub error_message: Option<String>,
}

impl PatchResult {
    pub fn success(stats: PatchStats) -> Self {
        PatchResult {
            succeeded: true,
            stats: Some(stats),
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        PatchResult {
            succeeded: false,
            stats: None,
            error_message: Some(message.into()),
        }
    }
}
