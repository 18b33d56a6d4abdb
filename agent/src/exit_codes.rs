//! Stable exit codes for launch-agent CLI commands.

/// `run` completed, or `loop` stopped on a signal or iteration limit.
pub const OK: i32 = 0;
/// Log directory creation, rotation, or append failed (or any other unclassified error).
pub const IO_ERROR: i32 = 1;
/// Configuration file missing, malformed, or holding invalid values.
pub const CONFIGURATION_ERROR: i32 = 2;
