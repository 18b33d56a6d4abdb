//! Where the agent log file lives.

use std::path::{Path, PathBuf};

use crate::core::rotation::backup_path;
use crate::error::{AgentError, Result};

/// Reverse-DNS identifier naming the per-agent cache directory. Change per deployment.
pub const AGENT_IDENTIFIER: &str = "com.example.launch-agent";
/// Base name for the log file (and the default config file). Change per deployment.
pub const AGENT_NAME: &str = "launch-agent";

const CACHE_SUBDIR: [&str; 2] = ["Library", "Caches"];
const LOG_EXTENSION: &str = "log";

/// Log directory plus file name, resolved once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDestination {
    dir: PathBuf,
    file_path: PathBuf,
}

impl LogDestination {
    pub fn new(dir: impl Into<PathBuf>, file_name: &str) -> Self {
        let dir = dir.into();
        let file_path = dir.join(file_name);
        Self { dir, file_path }
    }

    /// `<home>/Library/Caches/<identifier>/<name>.log`
    pub fn for_agent(home: &Path, identifier: &str, name: &str) -> Self {
        let mut dir = home.to_path_buf();
        dir.extend(CACHE_SUBDIR);
        dir.push(identifier);
        Self::new(dir, &format!("{name}.{LOG_EXTENSION}"))
    }

    /// Destination for the current user with the built-in identifier and name.
    pub fn resolve_default() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            AgentError::system(
                "resolve home directory",
                std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory"),
            )
        })?;
        Ok(Self::for_agent(&home, AGENT_IDENTIFIER, AGENT_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn backup_path(&self) -> PathBuf {
        backup_path(&self.file_path)
    }
}
