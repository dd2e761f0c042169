/*!
 * ofs-ftp-pull - Pull new ocean forecast data slices from an FTP server
 *
 * This library lists one directory on an anonymous FTP server, copies every
 * NetCDF and TAR file not yet present into a local input directory, and keeps
 * a dated, human-readable transfer log of what it did.
 */

pub mod config;
pub mod error;
pub mod filter;
pub mod journal;
pub mod layout;
pub mod puller;
pub mod remote;
pub mod report;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use config::{Args, Config, SkipPolicy};
pub use error::{PullError, Result};
pub use journal::TransferLog;
pub use layout::Layout;
pub use puller::Puller;
pub use remote::{FtpSource, RemoteError, RemoteSource};
pub use report::RunSummary;
pub use types::{Decision, RemoteEntry};
pub use utils::format_file_size;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
