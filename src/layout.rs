/*!
 * Local directory layout under the data directory
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ResultExt};

/// Directories a run writes into
#[derive(Debug, Clone)]
pub struct Layout {
    /// Downloaded files
    pub input_dir: PathBuf,
    /// Daily transfer logs
    pub log_dir: PathBuf,
}

impl Layout {
    /// Create the input and log directories if they are missing
    pub fn create(config: &Config) -> Result<Self> {
        let layout = Self {
            input_dir: config.input_dir(),
            log_dir: config.log_dir(),
        };

        for dir in [&layout.input_dir, &layout.log_dir] {
            ensure_dir(dir).with_context(|| format!("creating {}", dir.display()))?;
        }

        Ok(layout)
    }
}

/// Create a single directory level unless it already exists
///
/// Missing parents are an error, as is a non-directory at `path`.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    fs::create_dir(path)?;
    debug!(path = %path.display(), "created directory");
    Ok(())
}
