/*!
 * Error types for remote operations
 */

use suppaftp::FtpError;
use thiserror::Error;

/// Errors that can occur while talking to the remote server
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The control connection could not be established
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: FtpError,
    },

    /// The server refused the anonymous login
    #[error("Login rejected: {0}")]
    Login(FtpError),

    /// Switching to binary transfers failed
    #[error("Failed to set binary mode: {0}")]
    TransferType(FtpError),

    /// Listing the remote directory failed
    #[error("Failed to list {dir}: {source}")]
    List {
        dir: String,
        #[source]
        source: FtpError,
    },

    /// Retrieving a file failed
    #[error("Failed to retrieve {path}: {source}")]
    Retrieve {
        path: String,
        #[source]
        source: FtpError,
    },

    /// Host name did not resolve to any address
    #[error("Could not resolve {0}")]
    Resolve(String),

    /// IO error during remote operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Specialized Result type for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;
