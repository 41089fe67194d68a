//! Address resolution for tab mutations.
//!
//! Callers address a tab either by stable identity ([`Target::ById`]) or by
//! the deprecated positional pair ([`Target::ByPosition`]). Both go through
//! [`Resolver::resolve`].
//!
//! Identity targets are always resolved against a snapshot fetched *at
//! mutation time*. Between a caller's earlier listing and the mutation, tabs
//! may have been opened, closed, reordered or moved between windows; the id
//! is unaffected, the positions are not.
//!
//! Positional targets pass straight through without any snapshot. Stale or
//! out-of-range coordinates surface as whatever error the bridge reports.
//! Several positional closes in a row without re-listing are unsafe, because
//! each close shifts the indices after it. This is not compensated for.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::bridge::ScriptRunner;
use crate::error::{Error, Result};
use crate::identifiers::{TabId, WindowId};

use super::Snapshot;

// ============================================================================
// PositionalAddress
// ============================================================================

/// A 1-based (window, tab) pair, meaningful only relative to one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionalAddress {
    window_index: usize,
    tab_index: usize,
}

impl PositionalAddress {
    /// Creates an address from caller-supplied indices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if either index is zero.
    pub fn new(window_index: usize, tab_index: usize) -> Result<Self> {
        if window_index == 0 {
            return Err(Error::validation("windowIndex must be a positive integer"));
        }
        if tab_index == 0 {
            return Err(Error::validation("tabIndex must be a positive integer"));
        }
        Ok(Self {
            window_index,
            tab_index,
        })
    }

    /// Creates an address from snapshot positions, which are already 1-based.
    #[inline]
    pub(crate) const fn from_positions(window_index: usize, tab_index: usize) -> Self {
        Self {
            window_index,
            tab_index,
        }
    }

    /// 1-based window index.
    #[inline]
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window_index
    }

    /// 1-based tab index within the window.
    #[inline]
    #[must_use]
    pub const fn tab(&self) -> usize {
        self.tab_index
    }
}

impl fmt::Display for PositionalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab {} of window {}", self.tab_index, self.window_index)
    }
}

// ============================================================================
// Target
// ============================================================================

/// How the caller addresses a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Stable identity; re-resolved against a fresh snapshot.
    ById(TabId),
    /// Legacy positional pair; passed through unchecked.
    ByPosition(PositionalAddress),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(tab_id) => write!(f, "tab id {tab_id}"),
            Self::ByPosition(address) => write!(f, "{address}"),
        }
    }
}

// ============================================================================
// ResolvedAddress
// ============================================================================

/// Identity of a tab confirmed present in a fresh snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabIdentity {
    /// Owning window.
    pub window_id: WindowId,
    /// The tab.
    pub tab_id: TabId,
}

/// Concrete coordinates to hand to a mutation script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAddress {
    /// Coordinates at resolution time.
    pub position: PositionalAddress,
    /// Present only for identity targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<TabIdentity>,
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves [`Target`]s to [`ResolvedAddress`]es.
pub struct Resolver<'a> {
    bridge: &'a dyn ScriptRunner,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver that fetches snapshots through `bridge`.
    #[inline]
    #[must_use]
    pub fn new(bridge: &'a dyn ScriptRunner) -> Self {
        Self { bridge }
    }

    /// Resolves a target, fetching a fresh snapshot for identity targets.
    ///
    /// Positional targets never touch the bridge.
    ///
    /// # Errors
    ///
    /// - [`Error::Bridge`] / [`Error::Parse`] if the snapshot cannot be taken
    /// - [`Error::TabNotFound`] if the id is not in the fresh snapshot
    pub async fn resolve(&self, target: Target) -> Result<ResolvedAddress> {
        match target {
            Target::ById(_) => {
                let snapshot = Snapshot::fetch(self.bridge).await?;
                Self::resolve_in(&snapshot, target)
            }
            Target::ByPosition(position) => Ok(ResolvedAddress {
                position,
                identity: None,
            }),
        }
    }

    /// Resolves a tab id against a fresh snapshot, returning the identity
    /// alongside the address.
    ///
    /// # Errors
    ///
    /// - [`Error::Bridge`] / [`Error::Parse`] if the snapshot cannot be taken
    /// - [`Error::TabNotFound`] if the id is not in the fresh snapshot
    pub async fn resolve_id(&self, tab_id: TabId) -> Result<(ResolvedAddress, TabIdentity)> {
        let snapshot = Snapshot::fetch(self.bridge).await?;
        Self::locate(&snapshot, tab_id)
    }

    fn locate(snapshot: &Snapshot, tab_id: TabId) -> Result<(ResolvedAddress, TabIdentity)> {
        let found = snapshot.lookup_by_id(tab_id)?;
        let identity = TabIdentity {
            window_id: found.window_id(),
            tab_id,
        };
        let resolved = ResolvedAddress {
            position: found.address(),
            identity: Some(identity),
        };
        debug!(tab_id = %tab_id, address = %resolved.position, "Resolved tab id");
        Ok((resolved, identity))
    }

    /// Resolves a target against a snapshot the caller has just fetched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if an identity target is not present.
    pub fn resolve_in(snapshot: &Snapshot, target: Target) -> Result<ResolvedAddress> {
        match target {
            Target::ById(tab_id) => Self::locate(snapshot, tab_id).map(|(resolved, _)| resolved),
            Target::ByPosition(position) => Ok(ResolvedAddress {
                position,
                identity: None,
            }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::bridge::BridgeScript;
    use crate::bridge::fake::FakeBrowser;

    fn browser() -> FakeBrowser {
        FakeBrowser::new()
            .with_window(
                1,
                &[(41, "A", "https://a.test"), (42, "X", "https://x.test")],
                1,
            )
            .with_window(2, &[(51, "B", "https://b.test")], 1)
    }

    fn tab_id(value: u64) -> TabId {
        TabId::new(value).unwrap()
    }

    #[test]
    fn test_positional_address_rejects_zero() {
        assert!(PositionalAddress::new(0, 1).is_err());
        let err = PositionalAddress::new(1, 0).unwrap_err();
        assert_eq!(err.kind(), "validation_failure");
        assert!(err.to_string().contains("tabIndex"));
    }

    #[tokio::test]
    async fn test_resolve_by_id_fetches_fresh_snapshot() {
        let fake = browser();
        let resolved = Resolver::new(&fake)
            .resolve(Target::ById(tab_id(42)))
            .await
            .unwrap();

        assert_eq!(resolved.position, PositionalAddress::new(1, 2).unwrap());
        let identity = resolved.identity.unwrap();
        assert_eq!(identity.window_id.get(), 1);
        assert_eq!(identity.tab_id, tab_id(42));
        assert_eq!(fake.scripts(), vec![BridgeScript::Enumerate]);
    }

    #[tokio::test]
    async fn test_resolve_by_id_follows_moved_tab() {
        let fake = browser();
        let resolver = Resolver::new(&fake);
        let before = resolver.resolve(Target::ById(tab_id(42))).await.unwrap();

        fake.move_tab(42, 2, 1);
        let after = resolver.resolve(Target::ById(tab_id(42))).await.unwrap();

        assert_eq!(before.position, PositionalAddress::new(1, 2).unwrap());
        assert_eq!(after.position, PositionalAddress::new(2, 1).unwrap());
        assert_eq!(after.identity.unwrap().window_id.get(), 2);
    }

    #[tokio::test]
    async fn test_resolve_id_returns_identity() {
        let fake = browser();
        let (resolved, identity) = Resolver::new(&fake).resolve_id(tab_id(51)).await.unwrap();

        assert_eq!(identity.window_id.get(), 2);
        assert_eq!(identity.tab_id, tab_id(51));
        assert_eq!(resolved.identity, Some(identity));
        assert_eq!(resolved.position, PositionalAddress::new(2, 1).unwrap());
    }

    #[tokio::test]
    async fn test_resolve_unknown_id_is_not_found() {
        let fake = browser();
        let err = Resolver::new(&fake)
            .resolve(Target::ById(tab_id(999)))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_resolve_by_position_skips_bridge() {
        let fake = browser();
        let address = PositionalAddress::new(7, 9).unwrap();
        let resolved = Resolver::new(&fake)
            .resolve(Target::ByPosition(address))
            .await
            .unwrap();

        assert_eq!(resolved.position, address);
        assert!(resolved.identity.is_none());
        assert!(fake.scripts().is_empty());
    }

    #[tokio::test]
    async fn test_bridge_failure_propagates() {
        let fake = browser();
        fake.fail_with("Google Chrome is not running.");
        let err = Resolver::new(&fake)
            .resolve(Target::ById(tab_id(41)))
            .await
            .unwrap_err();
        assert!(err.is_bridge_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(Target::ById(tab_id(5)).to_string(), "tab id 5");
        assert_eq!(
            Target::ByPosition(PositionalAddress::new(1, 3).unwrap()).to_string(),
            "tab 3 of window 1"
        );
    }
}
