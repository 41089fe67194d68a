//! Bridge configuration.
//!
//! # Example
//!
//! ```
//! use tab_bridge::{BridgeOptions, BrowserApp};
//!
//! let options = BridgeOptions::new()
//!     .with_browser(BrowserApp::Brave)
//!     .with_verify_activation(false);
//!
//! assert_eq!(options.browser.app_name(), "Brave Browser");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use crate::bridge::BrowserApp;

// ============================================================================
// Constants
// ============================================================================

/// Default osascript program, resolved through `PATH`.
pub const DEFAULT_OSASCRIPT: &str = "osascript";

// ============================================================================
// BridgeOptions
// ============================================================================

/// How to reach the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    /// Application every script is addressed to.
    pub browser: BrowserApp,

    /// osascript program (bare name or path).
    pub osascript: PathBuf,

    /// Re-read the browser after activation and check that the target is
    /// its window's only active tab.
    pub verify_activation: bool,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl BridgeOptions {
    /// Creates options targeting Google Chrome through `osascript`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            browser: BrowserApp::default(),
            osascript: PathBuf::from(DEFAULT_OSASCRIPT),
            verify_activation: true,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl BridgeOptions {
    /// Sets the target browser.
    #[inline]
    #[must_use]
    pub fn with_browser(mut self, browser: BrowserApp) -> Self {
        self.browser = browser;
        self
    }

    /// Sets the osascript program.
    #[inline]
    #[must_use]
    pub fn with_osascript(mut self, program: impl Into<PathBuf>) -> Self {
        self.osascript = program.into();
        self
    }

    /// Enables or disables post-activation verification.
    #[inline]
    #[must_use]
    pub fn with_verify_activation(mut self, verify: bool) -> Self {
        self.verify_activation = verify;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
