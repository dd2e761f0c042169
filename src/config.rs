/*!
 * Configuration handling for ofs-ftp-pull
 */

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::error::Result;
use crate::{bail, ensure};

/// Environment variable holding the base data directory
pub const DATA_DIR_ENV: &str = "OFS_DATA";

/// Default FTP host serving the data slices
pub const DEFAULT_HOST: &str = "tidepool.nos.noaa.gov";

/// Default remote directory listed on every run
pub const DEFAULT_REMOTE_DIR: &str = "/pub/outgoing/CSDL";

/// Default sentinel file consulted by [`SkipPolicy::Sentinel`]
pub const DEFAULT_SENTINEL: &str = "somefile.txt";

/// Sentinel must be strictly larger than this many bytes
pub const DEFAULT_SENTINEL_MIN_SIZE: u64 = 232_000;

/// How to decide that a remote file is already present locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SkipPolicy {
    /// Skip when the destination exists and the sentinel file is large enough (default)
    Sentinel,
    /// Skip when the destination itself exists and is non-empty
    Destination,
}

impl Default for SkipPolicy {
    fn default() -> Self {
        Self::Sentinel
    }
}

/// Command-line arguments for ofs-ftp-pull
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "ofs-ftp-pull",
    version = env!("CARGO_PKG_VERSION"),
    about = "Pull new NetCDF and TAR data slices from an anonymous FTP server",
    long_about = "Lists one directory on an FTP server, downloads every NetCDF (.nc) and TAR file not already present into <DATA_DIR>/input, and appends a dated transfer log under <DATA_DIR>/log. Exits with status 1 when nothing was downloaded."
)]
pub struct Args {
    /// Base data directory (downloads go to <DIR>/input, logs to <DIR>/log)
    #[clap(long, env = DATA_DIR_ENV, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// FTP host to pull from
    #[clap(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// FTP control port
    #[clap(long, default_value_t = 21)]
    pub port: u16,

    /// Remote directory to list
    #[clap(long, default_value = DEFAULT_REMOTE_DIR)]
    pub remote_dir: String,

    /// Sentinel file checked before skipping an existing download
    #[clap(long, default_value = DEFAULT_SENTINEL)]
    pub sentinel: PathBuf,

    /// Minimum sentinel size in bytes (exclusive)
    #[clap(long, default_value_t = DEFAULT_SENTINEL_MIN_SIZE)]
    pub sentinel_min_size: u64,

    /// Rule used to decide whether an existing local file is skipped
    #[clap(long, value_enum, default_value_t = SkipPolicy::default())]
    pub skip_policy: SkipPolicy,

    /// Connect timeout in seconds (no timeout when omitted)
    #[clap(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Base data directory
    pub data_dir: PathBuf,

    /// FTP host
    pub host: String,

    /// FTP control port
    pub port: u16,

    /// Remote directory to list
    pub remote_dir: String,

    /// Sentinel file path, relative to the working directory unless absolute
    pub sentinel_path: PathBuf,

    /// Sentinel size threshold
    pub sentinel_min_size: u64,

    /// Skip rule for files already present locally
    pub skip_policy: SkipPolicy,

    /// Optional connect timeout
    pub timeout: Option<Duration>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let Some(data_dir) = args.data_dir else {
            bail!(
                Config,
                "no data directory given; set {} or pass --data-dir",
                DATA_DIR_ENV
            );
        };

        Ok(Self {
            data_dir,
            host: args.host,
            port: args.port,
            remote_dir: args.remote_dir,
            sentinel_path: args.sentinel,
            sentinel_min_size: args.sentinel_min_size,
            skip_policy: args.skip_policy,
            timeout: args.timeout.map(Duration::from_secs),
        })
    }

    /// Create a configuration with default remote settings for a data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            host: DEFAULT_HOST.to_string(),
            port: 21,
            remote_dir: DEFAULT_REMOTE_DIR.to_string(),
            sentinel_path: PathBuf::from(DEFAULT_SENTINEL),
            sentinel_min_size: DEFAULT_SENTINEL_MIN_SIZE,
            skip_policy: SkipPolicy::default(),
            timeout: None,
        }
    }

    /// Directory receiving downloaded files
    pub fn input_dir(&self) -> PathBuf {
        self.data_dir.join("input")
    }

    /// Directory receiving the daily transfer logs
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("log")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Only one level of directories is ever created, so the base must exist
        if !self.data_dir.is_dir() {
            bail!(
                PathNotFound,
                "data directory {} does not exist or is not a directory",
                self.data_dir.display()
            );
        }

        ensure!(!self.host.trim().is_empty(), Config, "FTP host must not be empty");
        ensure!(self.port != 0, Config, "FTP port must be non-zero");
        ensure!(
            !self.remote_dir.trim().is_empty(),
            Config,
            "remote directory must not be empty"
        );

        if let Some(timeout) = self.timeout {
            ensure!(!timeout.is_zero(), Config, "timeout must be at least one second");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PullError;
    use tempfile::tempdir;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["ofs-ftp-pull"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--data-dir", "/srv/ofs"]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/ofs"));
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 21);
        assert_eq!(config.remote_dir, DEFAULT_REMOTE_DIR);
        assert_eq!(config.sentinel_path, PathBuf::from("somefile.txt"));
        assert_eq!(config.sentinel_min_size, 232_000);
        assert_eq!(config.skip_policy, SkipPolicy::Sentinel);
        assert_eq!(config.timeout, None);
        assert_eq!(config.input_dir(), PathBuf::from("/srv/ofs/input"));
        assert_eq!(config.log_dir(), PathBuf::from("/srv/ofs/log"));
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "--data-dir",
            "/srv/ofs",
            "--host",
            "127.0.0.1",
            "--port",
            "2121",
            "--skip-policy",
            "destination",
            "--timeout",
            "30",
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 2121);
        assert_eq!(config.skip_policy, SkipPolicy::Destination);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_missing_data_dir() {
        let args = Args {
            data_dir: None,
            ..parse(&["--data-dir", "/unused"])
        };
        let err = Config::from_args(args).unwrap_err();

        assert!(matches!(err, PullError::Config(_)));
        assert!(err.to_string().contains(DATA_DIR_ENV));
    }

    #[test]
    fn test_validate() {
        let temp_dir = tempdir().unwrap();
        let config = Config::new(temp_dir.path());
        assert!(config.validate().is_ok());

        let missing = Config::new(temp_dir.path().join("nope"));
        assert!(matches!(
            missing.validate(),
            Err(PullError::PathNotFound(_))
        ));

        let mut empty_host = Config::new(temp_dir.path());
        empty_host.host = "  ".to_string();
        assert!(matches!(empty_host.validate(), Err(PullError::Config(_))));

        let mut zero_timeout = Config::new(temp_dir.path());
        zero_timeout.timeout = Some(Duration::ZERO);
        assert!(zero_timeout.validate().is_err());
    }
}
