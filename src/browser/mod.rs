//! Browser state as seen through the automation bridge.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Snapshot`] | Immutable capture of all windows and tabs, indexed by tab id |
//! | [`WindowRecord`] | One window and its ordered tabs |
//! | [`TabRecord`] | One tab |
//! | [`Resolver`] | Turns a [`Target`] into concrete coordinates |
//!
//! # Example
//!
//! ```no_run
//! use tab_bridge::bridge::{BrowserApp, OsascriptInvoker};
//! use tab_bridge::browser::{Resolver, Snapshot, Target};
//! use tab_bridge::TabId;
//!
//! # async fn example() -> tab_bridge::Result<()> {
//! let bridge = OsascriptInvoker::new("osascript", BrowserApp::Chrome);
//!
//! let snapshot = Snapshot::fetch(&bridge).await?;
//! for tab in snapshot.iter_tabs() {
//!     println!("{} {}", tab.id, tab.title);
//! }
//!
//! let tab_id = TabId::new(555).expect("non-zero");
//! let resolved = Resolver::new(&bridge).resolve(Target::ById(tab_id)).await?;
//! println!("now at {}", resolved.position);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Enumerate output decoder.
pub mod parser;

/// Target resolution.
pub mod resolver;

/// Snapshot and tab directory.
pub mod snapshot;

/// Tab records.
pub mod tab;

/// Window records.
pub mod window;

// ============================================================================
// Re-exports
// ============================================================================

pub use parser::{TabLine, parse_snapshot};
pub use resolver::{PositionalAddress, ResolvedAddress, Resolver, TabIdentity, Target};
pub use snapshot::{Snapshot, TabLocation};
pub use tab::TabRecord;
pub use window::WindowRecord;
