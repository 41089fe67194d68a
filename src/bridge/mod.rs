//! OS automation bridge.
//!
//! The browser is never driven directly. Every query and every mutation is a
//! [`BridgeScript`] handed to a [`ScriptRunner`], which returns the raw text
//! output of the script or an [`Error::Bridge`](crate::Error::Bridge).
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `app` | Supported browser applications |
//! | `invoker` | `osascript` process runner |
//! | `script` | Script templates and wire-format constants |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;

use crate::error::Result;

// ============================================================================
// Submodules
// ============================================================================

/// Supported browser applications.
pub mod app;

/// `osascript` process runner.
pub mod invoker;

/// Script templates.
pub mod script;

#[cfg(test)]
pub(crate) mod fake;

// ============================================================================
// Re-exports
// ============================================================================

pub use app::BrowserApp;
pub use invoker::OsascriptInvoker;
pub use script::{BridgeScript, FIELD_COUNT, FIELD_DELIMITER};

// ============================================================================
// ScriptRunner
// ============================================================================

/// Executes one bridge script and returns its raw output.
///
/// Implementations must not retry: a retried mutation against a browser
/// whose tab order has shifted can hit the wrong tab.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Runs `script` to completion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bridge`](crate::Error::Bridge) on any bridge failure.
    async fn run(&self, script: &BridgeScript) -> Result<String>;
}
