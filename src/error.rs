//! Error types for tab-bridge.
//!
//! Every fallible operation in the crate returns [`Result<T>`], which uses
//! [`Error`]. Failures never cross the dispatch boundary as panics: the
//! protocol layer converts each one into an error response carrying
//! [`Error::kind`] and the display message.
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Bridge | [`Error::Bridge`] |
//! | Wire format | [`Error::Parse`] |
//! | Addressing | [`Error::TabNotFound`] |
//! | Caller input | [`Error::Validation`] |
//! | Configuration | [`Error::Config`] |
//! | External | [`Error::Io`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::TabId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Bridge Errors
    // ========================================================================
    /// Automation bridge failure.
    ///
    /// Covers a bridge process that could not be spawned or exited non-zero,
    /// a target application that is not running, denied automation
    /// permission, and script execution errors.
    #[error("Bridge error: {message}")]
    Bridge {
        /// Bridge diagnostic text (usually osascript stderr).
        message: String,
    },

    // ========================================================================
    // Wire Format Errors
    // ========================================================================
    /// Malformed bridge output.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number within the bridge output.
        line: usize,
        /// What was wrong with the record.
        message: String,
    },

    // ========================================================================
    // Addressing Errors
    // ========================================================================
    /// Tab identity not present in the current snapshot.
    #[error("Tab not found: {tab_id}")]
    TabNotFound {
        /// The missing tab ID.
        tab_id: TabId,
    },

    // ========================================================================
    // Caller Errors
    // ========================================================================
    /// Caller-supplied argument has the wrong shape.
    #[error("Invalid argument: {message}")]
    Validation {
        /// Description of the invalid argument.
        message: String,
    },

    /// Configuration error.
    ///
    /// Returned by [`DriverBuilder::build`](crate::DriverBuilder::build).
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a bridge error.
    #[inline]
    pub fn bridge(message: impl Into<String>) -> Self {
        Self::Bridge {
            message: message.into(),
        }
    }

    /// Creates a parse error for the given 1-based line.
    #[inline]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Creates a tab not found error.
    #[inline]
    pub fn tab_not_found(tab_id: TabId) -> Self {
        Self::TabNotFound { tab_id }
    }

    /// Creates a validation error.
    #[inline]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if the automation bridge failed.
    #[inline]
    #[must_use]
    pub fn is_bridge_error(&self) -> bool {
        matches!(self, Self::Bridge { .. })
    }

    /// Returns `true` if an identity target was missing.
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TabNotFound { .. })
    }

    /// Returns `true` if the caller can fix this by changing the request.
    #[inline]
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::TabNotFound { .. })
    }

    /// Stable snake_case code used in error responses.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bridge { .. } => "bridge_failure",
            Self::Parse { .. } => "parse_failure",
            Self::TabNotFound { .. } => "not_found",
            Self::Validation { .. } => "validation_failure",
            Self::Config { .. } => "config_error",
            Self::Io(_) => "io_error",
            Self::Json(_) => "invalid_request",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
