/*!
 * End-of-run summary
 */

use std::process::ExitCode;
use std::time::Duration;

/// Elapsed field of the summary line; the real total is part of the message
pub const SUMMARY_ELAPSED: &str = "0.00s";

/// Outcome of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files copied from the server during this run
    pub downloads: usize,
    /// Eligible files left alone because they were already present
    pub skipped: usize,
    /// Bytes received across all copies
    pub bytes: u64,
}

impl RunSummary {
    /// Whether anything was downloaded
    pub fn is_empty(&self) -> bool {
        self.downloads == 0
    }

    /// Summary message for the log and stdout
    pub fn message(&self, total: Duration) -> String {
        format!(
            "Downloaded {} files. Total time: {:.2} seconds",
            self.downloads,
            total.as_secs_f64()
        )
    }

    /// Process exit status: failure when the run pulled nothing
    pub fn exit_code(&self) -> ExitCode {
        if self.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}
