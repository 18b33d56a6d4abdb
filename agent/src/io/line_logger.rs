//! Append-only line logger mirrored to the console, with startup rotation.
//!
//! Every write goes to the console sink first and is then appended to the log
//! file, opening the file in append mode per call. The size threshold is only
//! consulted by [`RotatingLineLogger::init_log_directory`], so a long-running
//! process can grow the file past it; rotation happens on the next init.
//!
//! A single writer is assumed. Nothing locks the file against other processes.

use std::fs::{self, OpenOptions};
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::destination::LogDestination;
use crate::core::rotation::RotationPolicy;
use crate::error::{AgentError, Result};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// What `init_log_directory` did with an existing log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationOutcome {
    /// No file, or file at or under the threshold.
    Kept,
    /// The file was moved to `backup`, replacing any previous backup.
    Rotated { backup: PathBuf, bytes: u64 },
}

#[derive(Debug)]
pub struct RotatingLineLogger<W: Write = Stdout> {
    destination: LogDestination,
    policy: RotationPolicy,
    console: W,
}

impl RotatingLineLogger<Stdout> {
    /// Logger mirroring to standard output. Call [`Self::init_log_directory`] before writing.
    pub fn stdout(destination: LogDestination, policy: RotationPolicy) -> Self {
        Self::with_console(destination, policy, io::stdout())
    }
}

impl<W: Write> RotatingLineLogger<W> {
    pub fn with_console(destination: LogDestination, policy: RotationPolicy, console: W) -> Self {
        Self {
            destination,
            policy,
            console,
        }
    }

    /// Construct and run [`Self::init_log_directory`] so the directory exists
    /// before the logger is handed out.
    pub fn open(
        destination: LogDestination,
        policy: RotationPolicy,
        console: W,
    ) -> Result<(Self, RotationOutcome)> {
        let logger = Self::with_console(destination, policy, console);
        let outcome = logger.init_log_directory()?;
        Ok((logger, outcome))
    }

    /// Create the log directory if needed and rotate an oversized log file.
    ///
    /// The size comes from filesystem metadata at call time. Rotation is a
    /// single rename onto `<file>.bak`; if it fails the error is returned and
    /// the active file is left where it was.
    pub fn init_log_directory(&self) -> Result<RotationOutcome> {
        let dir = self.destination.dir();
        fs::create_dir_all(dir).map_err(|err| AgentError::io("create log directory", dir, err))?;

        let file = self.destination.file_path();
        let len = match fs::metadata(file) {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => return Ok(RotationOutcome::Kept),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %file.display(), "no existing log file");
                return Ok(RotationOutcome::Kept);
            }
            Err(err) => return Err(AgentError::io("inspect log file", file, err)),
        };

        if !self.policy.should_rotate(len) {
            debug!(
                path = %file.display(),
                len,
                max_size = self.policy.max_size(),
                "log file under threshold"
            );
            return Ok(RotationOutcome::Kept);
        }

        let backup = self.destination.backup_path();
        fs::rename(file, &backup).map_err(|err| AgentError::io("rotate log file", file, err))?;
        info!(
            from = %file.display(),
            to = %backup.display(),
            bytes = len,
            "rotated log file"
        );
        Ok(RotationOutcome::Rotated { backup, bytes: len })
    }

    /// Write `message` verbatim to both sinks. No newline is added.
    pub fn write(&mut self, message: &str) -> Result<()> {
        self.emit(message)
    }

    /// Write `message` followed by the platform line ending to both sinks.
    pub fn write_line(&mut self, message: &str) -> Result<()> {
        let line = format!("{message}{LINE_ENDING}");
        self.emit(&line)
    }

    /// `write_line` for each message in order. Stops at the first failure,
    /// leaving the messages before it written.
    pub fn write_lines<I, S>(&mut self, messages: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for message in messages {
            self.write_line(message.as_ref())?;
        }
        Ok(())
    }

    pub fn destination(&self) -> &LogDestination {
        &self.destination
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    pub fn console(&self) -> &W {
        &self.console
    }

    pub fn into_console(self) -> W {
        self.console
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        self.console
            .write_all(text.as_bytes())
            .and_then(|()| self.console.flush())
            .map_err(|err| AgentError::system("write console", err))?;
        append(self.destination.file_path(), text)
    }
}

fn append(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| AgentError::io("open log file", path, err))?;
    file.write_all(text.as_bytes())
        .map_err(|err| AgentError::io("append to log file", path, err))
}
