//! I/O side of the agent: configuration file, log destination, line logger.

pub mod config;
pub mod destination;
pub mod line_logger;
