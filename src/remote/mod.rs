/*!
 * Access to the remote file server
 */

mod error;
mod ftp;

// Re-export public items
pub use error::{RemoteError, RemoteResult};
pub use ftp::{FtpSource, ANONYMOUS_PASSWORD, ANONYMOUS_USER};

use std::io::Write;

/// Trait for servers files are pulled from
///
/// A source is one open session; dropping it closes the session.
pub trait RemoteSource {
    /// List the entries of a remote directory, without recursing
    fn list(&mut self, dir: &str) -> RemoteResult<Vec<String>>;

    /// Stream a remote file into `sink`, returning the number of bytes copied
    fn retrieve(&mut self, path: &str, sink: &mut dyn Write) -> RemoteResult<u64>;
}
