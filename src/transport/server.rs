//! Line-delimited JSON server.
//!
//! Reads one [`Request`] per line and writes one [`Response`] per line.
//! Requests are handled strictly one at a time, in arrival order.
//!
//! # Session Flow
//!
//! 1. Read a line; blank lines are skipped
//! 2. Decode it as a [`Request`]; undecodable lines get an error response
//!    with a `null` id
//! 3. Hand it to [`Driver::handle`]
//! 4. Write the response and flush
//! 5. Stop at end of input

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Value, from_str, to_string};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::protocol::{Request, Response};

// ============================================================================
// StdioServer
// ============================================================================

/// Serves a [`Driver`] over a pair of byte streams.
///
/// # Example
///
/// ```no_run
/// use tab_bridge::Driver;
/// use tab_bridge::transport::StdioServer;
///
/// # async fn example() -> tab_bridge::Result<()> {
/// let driver = Driver::builder().build()?;
/// StdioServer::new(driver).serve().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StdioServer {
    driver: Driver,
}

impl StdioServer {
    /// Creates a server for `driver`.
    #[inline]
    #[must_use]
    pub fn new(driver: Driver) -> Self {
        Self { driver }
    }

    /// Serves stdin/stdout until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading stdin or writing stdout fails.
    pub async fn serve(&self) -> Result<usize> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve_io(stdin, stdout).await
    }

    /// Serves any reader/writer pair until the reader is exhausted.
    ///
    /// Returns the number of requests answered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on a stream failure. Request-level failures
    /// are answered, not returned.
    pub async fn serve_io<R, W>(&self, reader: R, mut writer: W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(browser = self.driver.browser().as_str(), "Serving requests");

        let mut lines = reader.lines();
        let mut answered = 0;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = self.respond(line).await;
            let mut encoded = to_string(&response)?;
            encoded.push('\n');
            writer.write_all(encoded.as_bytes()).await?;
            writer.flush().await?;
            answered += 1;
        }

        info!(answered, "Input closed, server stopping");
        Ok(answered)
    }

    async fn respond(&self, line: &str) -> Response {
        match from_str::<Request>(line) {
            Ok(request) => {
                debug!(method = %request.method, id = %request.id, "Request received");
                self.driver.handle(request).await
            }
            Err(e) => {
                warn!(error = %e, "Undecodable request line");
                Response::failure(Value::Null, &Error::Json(e))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
