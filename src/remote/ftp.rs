/*!
 * FTP implementation of [`RemoteSource`]
 */

use std::io::{self, Write};
use std::net::ToSocketAddrs;
use std::time::Duration;

use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};
use tracing::{debug, warn};

use super::error::{RemoteError, RemoteResult};
use super::RemoteSource;

/// User name sent for anonymous login
pub const ANONYMOUS_USER: &str = "anonymous";

/// Password sent for anonymous login
pub const ANONYMOUS_PASSWORD: &str = "anonymous@";

/// An authenticated FTP session in binary mode
///
/// The session is closed with `QUIT` when the value is dropped, including
/// when a transfer fails part way.
pub struct FtpSource {
    stream: FtpStream,
    addr: String,
}

impl FtpSource {
    /// Connect, log in anonymously and switch to binary transfers
    pub fn connect(host: &str, port: u16, timeout: Option<Duration>) -> RemoteResult<Self> {
        let addr = format!("{}:{}", host, port);
        debug!(%addr, "connecting");

        let stream = match timeout {
            Some(timeout) => connect_any(&addr, timeout)?,
            None => FtpStream::connect(addr.as_str()).map_err(|source| RemoteError::Connect {
                addr: addr.clone(),
                source,
            })?,
        };

        // From here on Drop takes care of closing the session
        let mut source = Self { stream, addr };

        source
            .stream
            .login(ANONYMOUS_USER, ANONYMOUS_PASSWORD)
            .map_err(RemoteError::Login)?;
        source
            .stream
            .transfer_type(FileType::Binary)
            .map_err(RemoteError::TransferType)?;

        debug!(addr = %source.addr, "logged in");
        Ok(source)
    }
}

/// Try every resolved address in turn, keeping the last failure
fn connect_any(addr: &str, timeout: Duration) -> RemoteResult<FtpStream> {
    let mut last_err = None;

    for socket in addr.to_socket_addrs()? {
        match FtpStream::connect_timeout(socket, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%socket, error = %e, "connect attempt failed");
                last_err = Some(e);
            }
        }
    }

    Err(match last_err {
        Some(source) => RemoteError::Connect {
            addr: addr.to_string(),
            source,
        },
        None => RemoteError::Resolve(addr.to_string()),
    })
}

impl RemoteSource for FtpSource {
    fn list(&mut self, dir: &str) -> RemoteResult<Vec<String>> {
        self.stream
            .nlst(Some(dir))
            .map_err(|source| RemoteError::List {
                dir: dir.to_string(),
                source,
            })
    }

    fn retrieve(&mut self, path: &str, sink: &mut dyn Write) -> RemoteResult<u64> {
        let retrieve_err = |source: FtpError| RemoteError::Retrieve {
            path: path.to_string(),
            source,
        };

        let mut data = self.stream.retr_as_stream(path).map_err(retrieve_err)?;
        let copied = io::copy(&mut data, sink)?;
        self.stream
            .finalize_retr_stream(data)
            .map_err(retrieve_err)?;

        Ok(copied)
    }
}

impl Drop for FtpSource {
    fn drop(&mut self) {
        match self.stream.quit() {
            Ok(()) => debug!(addr = %self.addr, "session closed"),
            Err(e) => warn!(addr = %self.addr, error = %e, "failed to close FTP session"),
        }
    }
}
