//! Process startup: configuration, settings, and an initialized logger.
//!
//! Order matters: the config is read first so `max_log_size` can override the
//! rotation threshold before the log directory is initialized.

use std::io::{Stdout, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::io::config::{AgentConfig, AgentSettings};
use crate::io::destination::LogDestination;
use crate::io::line_logger::{RotatingLineLogger, RotationOutcome};

/// Everything a run mode needs, built once per process.
#[derive(Debug)]
pub struct Started<W: Write> {
    pub config: AgentConfig,
    pub settings: AgentSettings,
    pub logger: RotatingLineLogger<W>,
    pub rotation: RotationOutcome,
}

/// Start the agent for the current user, mirroring the log to stdout.
pub fn start_agent(config_path: Option<&Path>) -> Result<Started<Stdout>> {
    let config = AgentConfig::resolve(config_path).context("load configuration")?;
    let destination = LogDestination::resolve_default().context("resolve log destination")?;
    start_with(config, destination, std::io::stdout())
}

/// Start against an explicit config, destination, and console sink.
pub fn start_with<W: Write>(
    config: AgentConfig,
    destination: LogDestination,
    console: W,
) -> Result<Started<W>> {
    let settings = AgentSettings::from_config(&config).context("read agent settings")?;
    debug!(
        config = ?config.path(),
        max_log_size = settings.max_log_size,
        "settings resolved"
    );

    let (logger, rotation) =
        RotatingLineLogger::open(destination, settings.rotation_policy(), console)
            .context("initialize log directory")?;
    info!(
        log = %logger.destination().file_path().display(),
        rotated = matches!(rotation, RotationOutcome::Rotated { .. }),
        "agent started"
    );

    Ok(Started {
        config,
        settings,
        logger,
        rotation,
    })
}
