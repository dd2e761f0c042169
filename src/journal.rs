/*!
 * Daily append-only transfer log
 *
 * One text file per calendar day collects a line for every action a run
 * takes. Lines look like:
 *
 * ```text
 * 20181009T143015 (1.27s): Copied "/pub/outgoing/CSDL/a.nc" to "/data/input/a.nc"
 * ```
 *
 * The file is opened, appended to and closed for every line.
 */

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate};

/// Suffix appended to the `YYYYMMDD` date in log file names
pub const LOG_FILE_SUFFIX: &str = "_ftp_transfer.log";

/// Format of the wall-clock timestamp at the start of each line
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Name of the log file for a given day
pub fn log_file_name(date: NaiveDate) -> String {
    format!("{}{}", date.format("%Y%m%d"), LOG_FILE_SUFFIX)
}

/// Render an elapsed duration as seconds with hundredths, e.g. `1.27s`
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

/// Render one log line (without the trailing newline)
pub fn format_line(at: &DateTime<Local>, elapsed: &str, message: &str) -> String {
    format!("{} ({}): {}", at.format(TIMESTAMP_FORMAT), elapsed, message)
}

/// Handle on one day's transfer log
#[derive(Debug, Clone)]
pub struct TransferLog {
    path: PathBuf,
    existed: bool,
}

impl TransferLog {
    /// Select the log file for `date` inside `log_dir`
    ///
    /// Whether the file already exists is captured here, once, and does not
    /// change when this run appends to it.
    pub fn open(log_dir: &Path, date: NaiveDate) -> Self {
        let path = log_dir.join(log_file_name(date));
        let existed = path.exists();
        Self { path, existed }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if an earlier run today already created this file
    pub fn existed_before_run(&self) -> bool {
        self.existed
    }

    /// Build a line stamped now with the time elapsed since an operation started
    pub fn line(&self, elapsed: Duration, message: &str) -> String {
        format_line(&Local::now(), &format_elapsed(elapsed), message)
    }

    /// Append a line to the file, creating it if needed
    pub fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }

    /// Build a line and append it, returning the line for echoing
    pub fn record(&self, elapsed: Duration, message: &str) -> io::Result<String> {
        let line = self.line(elapsed, message);
        self.append(&line)?;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_log_file_name() {
        let date = NaiveDate::from_ymd_opt(2018, 10, 9).unwrap();
        assert_eq!(log_file_name(date), "20181009_ftp_transfer.log");
    }

    #[test]
    fn test_format_line() {
        let at = Local.with_ymd_and_hms(2018, 10, 9, 14, 30, 15).unwrap();
        let line = format_line(&at, &format_elapsed(Duration::from_millis(1271)), "Starting FTP transfer...");
        assert_eq!(line, "20181009T143015 (1.27s): Starting FTP transfer...");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "0.00s");
        assert_eq!(format_elapsed(Duration::from_millis(50)), "0.05s");
        assert_eq!(format_elapsed(Duration::from_secs(75)), "75.00s");
    }

    #[test]
    fn test_append_only() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let date = NaiveDate::from_ymd_opt(2018, 10, 9).unwrap();

        let log = TransferLog::open(temp_dir.path(), date);
        assert!(!log.existed_before_run());

        log.record(Duration::ZERO, "first")?;
        log.record(Duration::ZERO, "second")?;

        // The flag is not refreshed by this run's writes
        assert!(!log.existed_before_run());

        let content = fs::read_to_string(log.path())?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("(0.00s): first"));
        assert!(lines[1].ends_with("(0.00s): second"));

        let reopened = TransferLog::open(temp_dir.path(), date);
        assert!(reopened.existed_before_run());
        reopened.record(Duration::ZERO, "third")?;
        assert_eq!(fs::read_to_string(log.path())?.lines().count(), 3);

        Ok(())
    }

    #[test]
    fn test_separate_days() {
        let temp_dir = tempdir().unwrap();
        let monday = TransferLog::open(temp_dir.path(), NaiveDate::from_ymd_opt(2018, 10, 8).unwrap());
        let tuesday = TransferLog::open(temp_dir.path(), NaiveDate::from_ymd_opt(2018, 10, 9).unwrap());

        assert_ne!(monday.path(), tuesday.path());
    }
}
