//! Tab operations coordinator.
//!
//! The [`Driver`] owns the bridge and runs the four tab operations. Every
//! operation that needs browser state takes its own fresh [`Snapshot`];
//! nothing is cached between calls.
//!
//! # Example
//!
//! ```no_run
//! use tab_bridge::{Driver, TabId};
//!
//! # async fn example() -> tab_bridge::Result<()> {
//! let driver = Driver::builder().build()?;
//!
//! let listing = driver.list_tabs().await?;
//! println!("{listing}");
//!
//! let tab_id = TabId::new(555).expect("non-zero");
//! driver.activate_tab_by_id(tab_id).await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::bridge::{BridgeScript, BrowserApp, ScriptRunner};
use crate::browser::{
    PositionalAddress, ResolvedAddress, Resolver, Snapshot, TabIdentity, Target,
};
use crate::error::{Error, Result};
use crate::identifiers::TabId;

use super::builder::DriverBuilder;
use super::listing::{TabAction, TabActionKind, TabListing};
use super::options::BridgeOptions;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the driver.
pub(crate) struct DriverInner {
    /// Configuration the driver was built with.
    pub options: BridgeOptions,

    /// Script runner for all browser access.
    pub bridge: Arc<dyn ScriptRunner>,

    /// Serializes whole operations so read-then-act pipelines never
    /// interleave.
    gate: Mutex<()>,
}

// ============================================================================
// Driver
// ============================================================================

/// Tab operations over one browser application.
///
/// Cheap to clone; clones share the bridge and the operation gate.
#[derive(Clone)]
pub struct Driver {
    /// Shared inner state.
    pub(crate) inner: Arc<DriverInner>,
}

// ============================================================================
// Driver - Display
// ============================================================================

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("browser", &self.inner.options.browser)
            .field("osascript", &self.inner.options.osascript)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Driver - Constructors & Accessors
// ============================================================================

impl Driver {
    /// Creates a configuration builder for the driver.
    #[inline]
    #[must_use]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Creates a driver over any script runner.
    ///
    /// `options.osascript` is informational here; `bridge` decides how
    /// scripts actually run.
    #[must_use]
    pub fn with_runner(options: BridgeOptions, bridge: Arc<dyn ScriptRunner>) -> Self {
        debug!(browser = options.browser.as_str(), "Driver created");
        Self {
            inner: Arc::new(DriverInner {
                options,
                bridge,
                gate: Mutex::new(()),
            }),
        }
    }

    /// Returns the driver's options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &BridgeOptions {
        &self.inner.options
    }

    /// Returns the target browser.
    #[inline]
    #[must_use]
    pub fn browser(&self) -> BrowserApp {
        self.inner.options.browser
    }
}

// ============================================================================
// Driver - Tab Operations
// ============================================================================

impl Driver {
    /// Captures a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bridge`] or [`Error::Parse`].
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let _op = self.inner.gate.lock().await;
        Snapshot::fetch(self.inner.bridge.as_ref()).await
    }

    /// Lists every window and tab. Never mutates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bridge`] or [`Error::Parse`].
    pub async fn list_tabs(&self) -> Result<TabListing> {
        let snapshot = self.snapshot().await?;
        info!(
            windows = snapshot.window_count(),
            tabs = snapshot.tab_count(),
            "Listed tabs"
        );
        Ok(TabListing::new(snapshot))
    }

    /// Closes a tab by stable identity.
    ///
    /// The tab is located in a snapshot taken now, not in any earlier
    /// listing. If it is gone, no mutation is issued.
    ///
    /// # Errors
    ///
    /// - [`Error::TabNotFound`] if the id is not open
    /// - [`Error::Bridge`] / [`Error::Parse`] from the bridge
    pub async fn close_tab_by_id(&self, tab_id: TabId) -> Result<TabAction> {
        let _op = self.inner.gate.lock().await;
        let (resolved, identity) = self.resolve_identity(tab_id).await?;

        self.run_mutation(BridgeScript::CloseById {
            window_id: identity.window_id,
            tab_id,
        })
        .await?;

        let action = TabAction::new(TabActionKind::Closed, resolved);
        info!(tab_id = %tab_id, window_id = %identity.window_id, "Closed tab");
        Ok(action)
    }

    /// Focuses a tab and brings its window to the front.
    ///
    /// Raising the window and selecting the tab happen in one script. With
    /// [`BridgeOptions::verify_activation`] set, a fresh snapshot is then
    /// checked for the target being its window's only active tab.
    ///
    /// # Errors
    ///
    /// - [`Error::TabNotFound`] if the id is not open
    /// - [`Error::Bridge`] from the bridge, or if verification fails
    /// - [`Error::Parse`] from either snapshot
    pub async fn activate_tab_by_id(&self, tab_id: TabId) -> Result<TabAction> {
        let _op = self.inner.gate.lock().await;
        let (resolved, identity) = self.resolve_identity(tab_id).await?;

        self.run_mutation(BridgeScript::ActivateById {
            window_id: identity.window_id,
            tab_id,
        })
        .await?;

        if self.inner.options.verify_activation {
            self.verify_activation(identity).await?;
        }

        let action = TabAction::new(TabActionKind::Activated, resolved);
        info!(tab_id = %tab_id, window_id = %identity.window_id, "Activated tab");
        Ok(action)
    }

    /// Closes a tab by position. Deprecated.
    ///
    /// The coordinates are used as given, with no snapshot. Issuing several
    /// positional closes without re-listing in between is unsafe: each close
    /// shifts the indices after it, and this is not compensated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bridge`] for stale or out-of-range coordinates, as
    /// reported by the browser.
    pub async fn close_tab_by_position(&self, address: PositionalAddress) -> Result<TabAction> {
        let _op = self.inner.gate.lock().await;
        let resolver = Resolver::new(self.inner.bridge.as_ref());
        let resolved = resolver.resolve(Target::ByPosition(address)).await?;

        warn!(address = %address, "Closing tab by position (deprecated, unchecked)");
        self.run_mutation(BridgeScript::CloseByPosition(resolved.position))
            .await?;

        info!(address = %address, "Closed tab by position");
        Ok(TabAction::new(TabActionKind::Closed, resolved))
    }
}

// ============================================================================
// Driver - Internal
// ============================================================================

impl Driver {
    /// Resolves an id against a snapshot fetched now.
    async fn resolve_identity(&self, tab_id: TabId) -> Result<(ResolvedAddress, TabIdentity)> {
        Resolver::new(self.inner.bridge.as_ref())
            .resolve_id(tab_id)
            .await
    }

    /// Runs a mutation script, discarding its output.
    async fn run_mutation(&self, script: BridgeScript) -> Result<()> {
        debug!(script = %script, "Issuing mutation");
        self.inner.bridge.run(&script).await?;
        Ok(())
    }

    /// Confirms the target is the single active tab of its window.
    async fn verify_activation(&self, identity: TabIdentity) -> Result<()> {
        let snapshot = Snapshot::fetch(self.inner.bridge.as_ref()).await?;
        let found = snapshot.lookup_by_id(identity.tab_id).map_err(|_| {
            Error::bridge(format!(
                "tab {} disappeared during activation",
                identity.tab_id
            ))
        })?;

        let active = found.window.active_count();
        if !found.tab.is_active || active != 1 {
            return Err(Error::bridge(format!(
                "activation of tab {} did not take effect ({} active tabs in window {})",
                identity.tab_id, active, found.window.id
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
