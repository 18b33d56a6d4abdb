//! Minimal long-running agent scaffold.
//!
//! A deployment copies this crate and fills in the agent action. What ships is
//! the plumbing around that action:
//!
//! - **[`core`]**: Pure logic (rotation threshold, loop schedule, config key
//!   lookups). No I/O.
//! - **[`io`]**: Side effects (JSON config file, log destination, the
//!   rotating line logger).
//!
//! Orchestration modules ([`start`], [`run`], [`looping`]) combine the two to
//! implement the `run` and `loop` CLI commands.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod looping;
pub mod run;
pub mod start;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
