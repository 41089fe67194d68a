//! Tab Bridge - browser tab operations over the macOS automation bridge.
//!
//! This library lists, closes and activates tabs of a Chromium-family
//! browser by running AppleScript through `osascript`.
//!
//! # Architecture
//!
//! - **Bridge**: every browser query or mutation is one script run by a
//!   [`ScriptRunner`](bridge::ScriptRunner)
//! - **Snapshot**: enumerate output parsed into windows and tabs, indexed by
//!   tab id
//! - **Driver**: the four operations, each taking its own fresh snapshot
//!
//! Key design principles:
//!
//! - Tabs are addressed by stable [`TabId`], never by a position remembered
//!   from an earlier listing
//! - Identity lookups happen at mutation time, against a fresh snapshot
//! - Bridge failures are reported, never retried
//! - Operations on one [`Driver`] are serialized
//!
//! # Quick Start
//!
//! ```no_run
//! use tab_bridge::{BrowserApp, Driver, Result, TabId};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let driver = Driver::builder().browser(BrowserApp::Chrome).build()?;
//!
//!     let listing = driver.list_tabs().await?;
//!     println!("{listing}");
//!
//!     let tab_id = TabId::new(555).expect("non-zero");
//!     driver.activate_tab_by_id(tab_id).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bridge`] | Script templates and the `osascript` runner |
//! | [`browser`] | Snapshot, records and target resolution |
//! | [`driver`] | Driver, configuration and operation results |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Request/response message types |
//! | [`transport`] | Line-delimited JSON server |

// ============================================================================
// Modules
// ============================================================================

/// OS automation bridge.
pub mod bridge;

/// Browser state: snapshot, windows, tabs.
///
/// - [`Snapshot`] - One capture of every window and tab
/// - [`Resolver`] - Target to coordinates
pub mod browser;

/// Driver and configuration.
///
/// Use [`Driver::builder()`] to create a configured driver instance.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for browser entities.
///
/// Newtype wrappers prevent mixing tab and window ids at compile time.
pub mod identifiers;

/// Request/response message types.
pub mod protocol;

/// Request transport.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Bridge types
pub use bridge::{BrowserApp, ScriptRunner};

// Browser types
pub use browser::{
    PositionalAddress, ResolvedAddress, Resolver, Snapshot, TabRecord, Target, WindowRecord,
};

// Driver types
pub use driver::{BridgeOptions, Driver, DriverBuilder, TabAction, TabActionKind, TabListing};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{TabId, WindowId};

// Protocol types
pub use protocol::{Command, Request, Response, ResponseType};

// Transport types
pub use transport::StdioServer;
