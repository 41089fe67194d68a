//! Tab operations entry point.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Driver`] | Runs the tab operations against one browser |
//! | [`DriverBuilder`] | Fluent configuration builder |
//! | [`BridgeOptions`] | Browser and osascript settings |
//! | [`TabListing`] | Result of a listing |
//! | [`TabAction`] | Result of a close or activate |
//!
//! # Example
//!
//! ```no_run
//! use tab_bridge::{BrowserApp, Driver, Result, TabId};
//!
//! # async fn example() -> Result<()> {
//! let driver = Driver::builder().browser(BrowserApp::Brave).build()?;
//!
//! print!("{}", driver.list_tabs().await?);
//!
//! let tab_id = TabId::new(555).expect("non-zero");
//! let action = driver.close_tab_by_id(tab_id).await?;
//! println!("{action}");
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for driver configuration.
pub mod builder;

/// Core driver implementation.
pub mod core;

/// Request dispatch.
pub mod dispatch;

/// Operation result types.
pub mod listing;

/// Bridge options.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::DriverBuilder;
pub use core::Driver;
pub use listing::{TabAction, TabActionKind, TabListing};
pub use options::{BridgeOptions, DEFAULT_OSASCRIPT};
