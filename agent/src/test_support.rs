//! Test-only helpers for temporary log destinations and config files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::rotation::RotationPolicy;
use crate::error::Result;
use crate::io::destination::LogDestination;
use crate::io::line_logger::RotatingLineLogger;

/// A temporary home directory with a log destination inside it.
///
/// The log directory is not created until a logger initializes it (or a
/// `seed_*` helper writes into it).
pub struct TempLog {
    temp: TempDir,
    destination: LogDestination,
}

impl TempLog {
    pub fn new() -> io::Result<Self> {
        let temp = tempfile::tempdir()?;
        let destination = LogDestination::for_agent(temp.path(), "com.example.test", "agent");
        Ok(Self { temp, destination })
    }

    /// Temporary home directory.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn destination(&self) -> &LogDestination {
        &self.destination
    }

    /// Logger capturing console output in memory. Not yet initialized.
    pub fn logger(&self, policy: RotationPolicy) -> RotatingLineLogger<Vec<u8>> {
        RotatingLineLogger::with_console(self.destination.clone(), policy, Vec::new())
    }

    /// Logger capturing console output in memory, with the directory initialized.
    pub fn opened_logger(&self, policy: RotationPolicy) -> Result<RotatingLineLogger<Vec<u8>>> {
        let (logger, _) = RotatingLineLogger::open(self.destination.clone(), policy, Vec::new())?;
        Ok(logger)
    }

    /// Write `contents` as the current log file, creating the directory.
    pub fn seed_log(&self, contents: &str) -> io::Result<()> {
        fs::create_dir_all(self.destination.dir())?;
        fs::write(self.destination.file_path(), contents)
    }

    /// Write `contents` as the backup file, creating the directory.
    pub fn seed_backup(&self, contents: &str) -> io::Result<()> {
        fs::create_dir_all(self.destination.dir())?;
        fs::write(self.destination.backup_path(), contents)
    }
}

/// Read a file that the test expects to exist.
pub fn read_to_string(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
}

/// Write `agent.json` into `dir` and return its path.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("agent.json");
    fs::write(&path, contents).unwrap_or_else(|err| panic!("write {}: {err}", path.display()));
    path
}
