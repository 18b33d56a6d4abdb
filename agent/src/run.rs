//! `launch-agent run`: perform the agent action once.

use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::io::line_logger::RotatingLineLogger;

pub const RUN_MESSAGE: &str = "Running once";

/// The scaffold's single action. Replace the body per deployment.
pub fn run_once<W: Write>(logger: &mut RotatingLineLogger<W>) -> Result<()> {
    debug!("running once");
    logger.write_line(RUN_MESSAGE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rotation::RotationPolicy;
    use crate::io::line_logger::LINE_ENDING;
    use crate::test_support::{TempLog, read_to_string};

    #[test]
    fn run_once_writes_one_line_to_both_sinks() {
        let temp = TempLog::new().expect("temp log");
        let mut logger = temp.opened_logger(RotationPolicy::default()).expect("open");

        run_once(&mut logger).expect("run");

        let expected = format!("{RUN_MESSAGE}{LINE_ENDING}");
        assert_eq!(read_to_string(temp.destination().file_path()), expected);
        assert_eq!(logger.into_console(), expected.into_bytes());
    }
}
