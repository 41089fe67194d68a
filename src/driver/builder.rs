//! Builder pattern for driver configuration.
//!
//! # Example
//!
//! ```no_run
//! use tab_bridge::{BrowserApp, Driver};
//!
//! # fn example() -> tab_bridge::Result<()> {
//! let driver = Driver::builder()
//!     .browser(BrowserApp::Chrome)
//!     .osascript("/usr/bin/osascript")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::bridge::{BrowserApp, OsascriptInvoker};
use crate::error::{Error, Result};

use super::core::Driver;
use super::options::BridgeOptions;

// ============================================================================
// DriverBuilder
// ============================================================================

/// Builder for configuring a [`Driver`] instance.
///
/// Use [`Driver::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct DriverBuilder {
    options: BridgeOptions,
}

// ============================================================================
// DriverBuilder Implementation
// ============================================================================

impl DriverBuilder {
    /// Creates a builder with default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target browser.
    #[inline]
    #[must_use]
    pub fn browser(mut self, browser: BrowserApp) -> Self {
        self.options.browser = browser;
        self
    }

    /// Sets the osascript program, either a bare name looked up on `PATH` or
    /// a path to the binary.
    #[inline]
    #[must_use]
    pub fn osascript(mut self, program: impl Into<PathBuf>) -> Self {
        self.options.osascript = program.into();
        self
    }

    /// Enables or disables post-activation verification.
    #[inline]
    #[must_use]
    pub fn verify_activation(mut self, verify: bool) -> Self {
        self.options.verify_activation = verify;
        self
    }

    /// Replaces all options at once.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: BridgeOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the driver with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the osascript program is empty
    /// - [`Error::Config`] if an explicit osascript path does not exist
    pub fn build(self) -> Result<Driver> {
        validate_osascript(&self.options.osascript)?;

        let invoker = OsascriptInvoker::new(&self.options.osascript, self.options.browser);
        Ok(Driver::with_runner(self.options, Arc::new(invoker)))
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_osascript(program: &Path) -> Result<()> {
    if program.as_os_str().is_empty() {
        return Err(Error::config(
            "osascript program is empty. Use .osascript() to set it.\n\
             Example: Driver::builder().osascript(\"/usr/bin/osascript\")",
        ));
    }

    // Bare names are resolved through PATH when the script runs.
    let is_bare_name = program.components().count() == 1 && !program.is_absolute();
    if !is_bare_name && !program.exists() {
        return Err(Error::config(format!(
            "osascript not found at: {}",
            program.display()
        )));
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
