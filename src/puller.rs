/*!
 * One pull run: list the remote directory, copy what is missing, log it all
 */

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, trace};

use crate::config::{Config, SkipPolicy};
use crate::error::{Result, ResultExt};
use crate::journal::{format_line, TransferLog};
use crate::layout::Layout;
use crate::remote::RemoteSource;
use crate::report::{RunSummary, SUMMARY_ELAPSED};
use crate::types::{Decision, RemoteEntry};
use crate::utils::format_file_size;

/// First line written by every run
pub const START_MESSAGE: &str = "Starting FTP transfer...";

/// Printed after the summary when something was downloaded
pub const DONE_MESSAGE: &str = "done";

/// Drives a single run against one remote session
pub struct Puller {
    /// Run configuration
    config: Config,
    /// Local directories
    layout: Layout,
    /// Today's transfer log
    log: TransferLog,
    /// When the run started
    started: Instant,
}

impl Puller {
    /// Prepare directories and write the start line to today's log
    pub fn start(config: Config) -> Result<Self> {
        Self::start_on(config, Local::now().date_naive())
    }

    /// Same as [`Puller::start`], logging to the file for `date`
    pub fn start_on(config: Config, date: NaiveDate) -> Result<Self> {
        let started = Instant::now();
        let layout = Layout::create(&config)?;
        let log = TransferLog::open(&layout.log_dir, date);

        log.record(started.elapsed(), START_MESSAGE)
            .with_context(|| format!("writing {}", log.path().display()))?;
        info!(
            log = %log.path().display(),
            first_run_today = !log.existed_before_run(),
            "transfer log opened"
        );

        Ok(Self {
            config,
            layout,
            log,
            started,
        })
    }

    /// Run configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Local directories used by this run
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Pull from `remote`, close it, then write the summary
    pub fn run<R: RemoteSource, W: Write>(&self, mut remote: R, out: &mut W) -> Result<RunSummary> {
        let summary = self.pull(&mut remote, out)?;
        drop(remote);

        self.finish(&summary, out)?;
        Ok(summary)
    }

    /// Decide what to do with one listed entry
    pub fn decide(&self, entry: &RemoteEntry) -> Decision {
        if !entry.is_eligible() {
            return Decision::Ignore;
        }

        let dest = entry.local_path(&self.layout.input_dir);
        if self.already_downloaded(&dest) {
            Decision::Skip
        } else {
            Decision::Download
        }
    }

    /// Walk the remote listing, copying or skipping each eligible entry
    pub fn pull<R: RemoteSource, W: Write>(&self, remote: &mut R, out: &mut W) -> Result<RunSummary> {
        let listing = remote.list(&self.config.remote_dir)?;
        info!(
            dir = %self.config.remote_dir,
            entries = listing.len(),
            "listed remote directory"
        );

        let mut summary = RunSummary::default();

        for path in listing {
            let entry = RemoteEntry::new(path);
            let file_started = Instant::now();
            let dest = entry.local_path(&self.layout.input_dir);

            match self.decide(&entry) {
                Decision::Ignore => trace!(path = %entry.path, "not eligible"),
                Decision::Skip => {
                    let message = format!("Destination file already exists: \"{}\"", dest.display());
                    let line = self.log.line(file_started.elapsed(), &message);

                    // Later runs on the same day would repeat this for every file
                    if !self.log.existed_before_run() {
                        self.log.append(&line)?;
                    }
                    writeln!(out, "{}", line)?;
                    summary.skipped += 1;
                }
                Decision::Download => {
                    let bytes = self.copy(remote, &entry, &dest)?;

                    let message = format!("Copied \"{}\" to \"{}\"", entry.path, dest.display());
                    let line = self.log.record(file_started.elapsed(), &message)?;
                    writeln!(out, "{}", line)?;

                    debug!(path = %entry.path, size = %format_file_size(bytes), "downloaded");
                    summary.downloads += 1;
                    summary.bytes += bytes;
                }
            }
        }

        Ok(summary)
    }

    /// Write the summary line to the log and `out`
    pub fn finish<W: Write>(&self, summary: &RunSummary, out: &mut W) -> Result<()> {
        let message = summary.message(self.started.elapsed());
        let line = format_line(&Local::now(), SUMMARY_ELAPSED, &message);

        self.log.append(&line)?;
        writeln!(out, "{}", line)?;

        info!(
            downloads = summary.downloads,
            skipped = summary.skipped,
            received = %format_file_size(summary.bytes),
            "run finished"
        );

        if !summary.is_empty() {
            writeln!(out, "{}", DONE_MESSAGE)?;
        }

        Ok(())
    }

    /// Stream one remote file to `dest`, truncating anything already there
    fn copy<R: RemoteSource>(&self, remote: &mut R, entry: &RemoteEntry, dest: &Path) -> Result<u64> {
        let file = File::create(dest).with_context(|| format!("creating {}", dest.display()))?;
        let mut writer = BufWriter::new(file);

        let bytes = remote.retrieve(&entry.path, &mut writer)?;
        writer.flush()?;

        Ok(bytes)
    }

    fn already_downloaded(&self, dest: &Path) -> bool {
        match self.config.skip_policy {
            SkipPolicy::Sentinel => {
                dest.exists()
                    && sentinel_is_large(&self.config.sentinel_path, self.config.sentinel_min_size)
            }
            SkipPolicy::Destination => fs::metadata(dest)
                .map(|meta| meta.is_file() && meta.len() > 0)
                .unwrap_or(false),
        }
    }
}

/// A missing or unreadable sentinel counts as too small
fn sentinel_is_large(path: &Path, min_size: u64) -> bool {
    fs::metadata(path)
        .map(|meta| meta.len() > min_size)
        .unwrap_or(false)
}
