//! osascript-backed bridge invoker.
//!
//! Runs exactly one script per call in a child `osascript` process. There is
//! no retry and no timeout at this layer: a stuck script blocks its caller
//! until the OS process ends.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::{BridgeScript, BrowserApp, ScriptRunner};

// ============================================================================
// OsascriptInvoker
// ============================================================================

/// Runs bridge scripts through `osascript -e`.
///
/// Calls are single-flight: an internal gate keeps at most one child process
/// in flight per invoker.
pub struct OsascriptInvoker {
    /// Path or command name of the osascript binary.
    program: PathBuf,
    /// Application every script is addressed to.
    app: BrowserApp,
    /// Single-flight gate.
    gate: Mutex<()>,
}

impl fmt::Debug for OsascriptInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsascriptInvoker")
            .field("program", &self.program)
            .field("app", &self.app)
            .finish_non_exhaustive()
    }
}

impl OsascriptInvoker {
    /// Creates an invoker for the given program and application.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, app: BrowserApp) -> Self {
        Self {
            program: program.into(),
            app,
            gate: Mutex::new(()),
        }
    }

    /// Returns the osascript program path.
    #[inline]
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Returns the target application.
    #[inline]
    #[must_use]
    pub fn app(&self) -> BrowserApp {
        self.app
    }

    /// Runs raw script text and returns stdout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bridge`] if the process cannot be spawned or exits
    /// with a non-zero status.
    pub async fn run_script(&self, source: &str) -> Result<String> {
        let _flight = self.gate.lock().await;

        let output = Command::new(&self.program)
            .arg("-e")
            .arg(source)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                Error::bridge(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("osascript exited with {}", output.status)
            } else {
                stderr
            };
            Err(Error::bridge(message))
        }
    }
}

#[async_trait]
impl ScriptRunner for OsascriptInvoker {
    async fn run(&self, script: &BridgeScript) -> Result<String> {
        let source = script.render(self.app);
        debug!(
            kind = script.kind(),
            app = self.app.as_str(),
            script_len = source.len(),
            "Running bridge script"
        );

        self.run_script(&source).await.inspect_err(|e| {
            warn!(kind = script.kind(), error = %e, "Bridge script failed");
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_bridge_error() {
        let invoker = OsascriptInvoker::new("/nonexistent/osascript", BrowserApp::Chrome);
        let err = invoker.run(&BridgeScript::Enumerate).await.unwrap_err();
        assert!(err.is_bridge_error());
        assert!(err.to_string().contains("/nonexistent/osascript"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_uses_stderr() {
        // `perl -e <code>` stands in for osascript: same argv shape.
        let invoker = OsascriptInvoker::new("perl", BrowserApp::Chrome);
        let err = invoker
            .run_script("print STDERR qq(Google Chrome is not running\\n); exit 1")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bridge error: Google Chrome is not running"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_success_returns_stdout_untrimmed() {
        let invoker = OsascriptInvoker::new("perl", BrowserApp::Chrome);
        let out = invoker.run_script("print qq(a|||b\\n)").await.unwrap();
        assert_eq!(out, "a|||b\n");
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_scripts_are_single_flight() {
        let invoker = OsascriptInvoker::new("perl", BrowserApp::Chrome);
        let nap = "select(undef, undef, undef, 0.1); print qq(ok)";

        let started = std::time::Instant::now();
        let (a, b) = tokio::join!(invoker.run_script(nap), invoker.run_script(nap));

        assert_eq!(a.unwrap(), "ok");
        assert_eq!(b.unwrap(), "ok");
        assert!(started.elapsed() >= std::time::Duration::from_millis(200));
    }

    #[test]
    fn test_debug_omits_gate() {
        let invoker = OsascriptInvoker::new("osascript", BrowserApp::Vivaldi);
        let rendered = format!("{invoker:?}");
        assert!(rendered.contains("Vivaldi"));
        assert!(!rendered.contains("gate"));
    }
}
