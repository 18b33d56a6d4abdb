//! Error taxonomy shared by the logger, configuration and run modes.
//!
//! Only two kinds of failure exist: I/O (with or without a file path) and
//! configuration. Neither is recovered locally; both propagate to the process
//! boundary where `main` maps them to an exit code (see [`crate::exit_codes`]).

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// Directory creation, rename, or append failed on `path`.
    #[error("{action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure with no file behind it: console writes, locating the
    /// home directory or the running executable.
    #[error("{action}")]
    System {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    /// Configuration file missing, unreadable, malformed, or holding invalid values.
    #[error("configuration {}: {message}", .path.display())]
    Configuration { path: PathBuf, message: String },
}

impl AgentError {
    pub fn io(action: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn system(action: &'static str, source: io::Error) -> Self {
        Self::System { action, source }
    }

    pub fn configuration(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}

pub type Result<T, E = AgentError> = std::result::Result<T, E>;
