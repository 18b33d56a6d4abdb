//! Agent configuration stored as JSON next to the executable.
//!
//! Two layers:
//!
//! - [`AgentConfig`]: the raw document with optional typed lookups for
//!   deployment-specific keys. Lookups never fail; they return `None`.
//! - [`AgentSettings`]: the keys the scaffold itself consumes, deserialized
//!   strictly and validated, with defaults for anything missing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::destination::AGENT_NAME;
use crate::core::keys::{lookup_bool, lookup_integer, lookup_string};
use crate::core::rotation::{DEFAULT_MAX_LOG_SIZE, RotationPolicy};
use crate::core::schedule::LoopSchedule;
use crate::error::{AgentError, Result};

/// Parsed configuration document, or nothing if none was loaded.
///
/// Constructed explicitly and passed to whoever needs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentConfig {
    source: Option<ConfigSource>,
}

#[derive(Debug, Clone, PartialEq)]
struct ConfigSource {
    path: PathBuf,
    root: Value,
}

impl AgentConfig {
    /// No document: every lookup returns `None`.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Read and parse `path`. The file is required.
    pub fn load(path: &Path) -> Result<Self> {
        let root = read_document(path)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(Self {
            source: Some(ConfigSource {
                path: path.to_path_buf(),
                root,
            }),
        })
    }

    /// Pick the configuration for a CLI invocation.
    ///
    /// An explicit path must exist. Otherwise the file beside the executable is
    /// loaded when present, and the config stays uninitialized when it is not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = default_path()?;
        if path.is_file() {
            Self::load(&path)
        } else {
            debug!(path = %path.display(), "no configuration file; using defaults");
            Ok(Self::uninitialized())
        }
    }

    /// Re-read the file this config was loaded from. No-op when uninitialized.
    ///
    /// On failure the previously loaded document is kept.
    pub fn reload(&mut self) -> Result<()> {
        if let Some(source) = self.source.as_mut() {
            source.root = read_document(&source.path)?;
            debug!(path = %source.path.display(), "configuration reloaded");
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.source.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.source.as_ref().map(|source| source.path.as_path())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        lookup_bool(self.root()?, key)
    }

    pub fn get_integer(&self, key: &str) -> Option<i64> {
        lookup_integer(self.root()?, key)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        lookup_string(self.root()?, key)
    }

    fn root(&self) -> Option<&Value> {
        self.source.as_ref().map(|source| &source.root)
    }
}

/// `<executable dir>/<agent name>.json`
pub fn default_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|err| AgentError::system("locate running executable", err))?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(format!("{AGENT_NAME}.json")))
}

fn read_document(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .map_err(|err| AgentError::configuration(path, format!("read failed: {err}")))?;
    let root: Value = serde_json::from_str(&contents)
        .map_err(|err| AgentError::configuration(path, format!("parse failed: {err}")))?;
    if !root.is_object() {
        return Err(AgentError::configuration(path, "root must be a JSON object"));
    }
    Ok(root)
}

/// Settings the scaffold reads from the configuration document.
///
/// Missing fields default; unknown keys are left for deployment code.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentSettings {
    /// Rotate the log file at startup when it is larger than this many bytes.
    pub max_log_size: u64,

    #[serde(rename = "loop")]
    pub looping: LoopSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoopSettings {
    /// Delay between loop iterations in milliseconds.
    pub interval_ms: u64,

    /// Stop after this many iterations; absent means run until stopped.
    pub max_iterations: Option<u64>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_log_size: DEFAULT_MAX_LOG_SIZE,
            looping: LoopSettings::default(),
        }
    }
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            max_iterations: None,
        }
    }
}

impl AgentSettings {
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let Some(source) = config.source.as_ref() else {
            return Ok(Self::default());
        };
        let settings = Self::deserialize(&source.root)
            .map_err(|err| AgentError::configuration(&source.path, err.to_string()))?;
        settings
            .validate()
            .map_err(|message| AgentError::configuration(&source.path, message))?;
        Ok(settings)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_log_size == 0 {
            return Err("max_log_size must be > 0".to_string());
        }
        if self.looping.interval_ms == 0 {
            return Err("loop.interval_ms must be > 0".to_string());
        }
        Ok(())
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::new(self.max_log_size)
    }

    pub fn loop_schedule(&self) -> LoopSchedule {
        LoopSchedule {
            interval: Duration::from_millis(self.looping.interval_ms),
            max_iterations: self.looping.max_iterations,
        }
    }
}
