/*!
 * Core types and data structures for ofs-ftp-pull
 */

use std::path::{Path, PathBuf};

use crate::filter;

/// A path returned by listing the remote directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Full remote path as reported by the server
    pub path: String,
}

impl RemoteEntry {
    /// Wrap a listed path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// File name without the remote directory
    pub fn basename(&self) -> &str {
        filter::basename(&self.path)
    }

    /// Final dot-suffix of the file name
    pub fn extension(&self) -> &str {
        filter::extension(&self.path)
    }

    /// Whether this entry passes the name filter
    pub fn is_eligible(&self) -> bool {
        filter::is_eligible(&self.path)
    }

    /// Local destination for this entry inside `dir`
    pub fn local_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.basename())
    }
}

/// What to do with one listed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Name filter rejected it
    Ignore,
    /// Already present locally
    Skip,
    /// Copy it from the server
    Download,
}
