//! `launch-agent loop`: repeat the agent action with a fixed delay.
//!
//! The delay is spent blocked on a [`StopSignal`], so a stop request (Ctrl+C
//! in the binary, a [`StopHandle`] in tests) ends the wait immediately.

use std::io::Write;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::schedule::LoopSchedule;
use crate::io::line_logger::RotatingLineLogger;

pub const START_MESSAGE: &str = "Starting loop";
pub const STOP_MESSAGE: &str = "Stopping loop";

/// Requests a running loop to stop. Cloneable; safe to move into a signal handler.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Sender<()>,
}

impl StopHandle {
    pub fn stop(&self) {
        // A closed receiver means the loop has already returned.
        let _ = self.tx.send(());
    }
}

/// Receiving side of the stop channel, owned by the loop.
#[derive(Debug)]
pub struct StopSignal {
    rx: Receiver<()>,
}

impl StopSignal {
    pub fn pair() -> (StopHandle, StopSignal) {
        let (tx, rx) = mpsc::channel();
        (StopHandle { tx }, StopSignal { rx })
    }

    /// Block for up to `timeout`. True if a stop was requested or every
    /// [`StopHandle`] has been dropped.
    pub fn wait(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}

/// Reason why `run_loop` stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStop {
    /// A stop was requested through the [`StopSignal`].
    Signalled,
    /// The schedule's `max_iterations` was reached.
    MaxIterations,
}

/// Summary of a loop invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOutcome {
    pub iterations: u64,
    pub stop: LoopStop,
}

/// Run `action` repeatedly, waiting `schedule.interval` between iterations,
/// until stopped or the iteration cap is reached.
///
/// Stops immediately on any action or logging error.
pub fn run_loop<W, F>(
    logger: &mut RotatingLineLogger<W>,
    schedule: &LoopSchedule,
    stop: &StopSignal,
    mut action: F,
) -> Result<LoopOutcome>
where
    W: Write,
    F: FnMut(&mut RotatingLineLogger<W>) -> Result<()>,
{
    logger.write_line(START_MESSAGE)?;
    info!(
        interval = ?schedule.interval,
        max_iterations = ?schedule.max_iterations,
        "loop started"
    );

    let mut iterations = 0u64;
    let reason = loop {
        if schedule.is_exhausted(iterations) {
            break LoopStop::MaxIterations;
        }
        let current = iterations.saturating_add(1);
        action(logger).with_context(|| format!("loop iteration {current}"))?;
        iterations = current;
        debug!(iteration = iterations, "iteration complete");

        if !schedule.is_exhausted(iterations) && stop.wait(schedule.interval) {
            break LoopStop::Signalled;
        }
    };

    logger.write_line(STOP_MESSAGE)?;
    info!(iterations, stop = ?reason, "loop stopped");
    Ok(LoopOutcome {
        iterations,
        stop: reason,
    })
}

/// The scaffold's per-iteration action. Replace the body per deployment.
pub fn log_tick<W: Write>(
    logger: &mut RotatingLineLogger<W>,
    schedule: &LoopSchedule,
) -> Result<()> {
    logger.write_line(&tick_message(schedule.interval))?;
    Ok(())
}

fn tick_message(interval: Duration) -> String {
    if interval == Duration::from_secs(1) {
        "Looping every second".to_string()
    } else {
        format!("Looping every {interval:?}")
    }
}
