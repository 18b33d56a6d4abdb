//! Size-based rotation policy.
//!
//! Pure decisions only: callers supply the on-disk length, this module says
//! whether it crosses the threshold and where the single backup lives.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 10 MiB.
pub const DEFAULT_MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Suffix appended to the full log file name to form the backup name.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Threshold in bytes above which the log file is moved aside at startup.
///
/// Checked once per initialization, not on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    max_size: u64,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_LOG_SIZE,
        }
    }
}

impl RotationPolicy {
    pub fn new(max_size: u64) -> Self {
        Self { max_size }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Strictly greater than: a file exactly at the threshold is kept.
    pub fn should_rotate(&self, current_len: u64) -> bool {
        current_len > self.max_size
    }
}

/// `agent.log` -> `agent.log.bak`, in the same directory.
pub fn backup_path(file: &Path) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}
