//! Immutable point-in-time capture of all windows and tabs.
//!
//! A [`Snapshot`] doubles as the tab directory: it indexes tabs by stable
//! identity and translates an identity back into the positional coordinates
//! that are valid *for this snapshot only*. It is the sole source of truth
//! for one operation and must be treated as stale once any mutation has been
//! issued.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::bridge::{BridgeScript, ScriptRunner};
use crate::error::{Error, Result};
use crate::identifiers::{TabId, WindowId};

use super::parser::{TabLine, parse_snapshot};
use super::{PositionalAddress, TabRecord, WindowRecord};

// ============================================================================
// TabLocation
// ============================================================================

/// A tab together with its owning window, as found in one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct TabLocation<'a> {
    /// The owning window.
    pub window: &'a WindowRecord,
    /// The tab itself.
    pub tab: &'a TabRecord,
}

impl TabLocation<'_> {
    /// Positional coordinates of the tab in this snapshot.
    #[inline]
    #[must_use]
    pub fn address(&self) -> PositionalAddress {
        PositionalAddress::from_positions(self.window.position, self.tab.position)
    }

    /// Owning window's id.
    #[inline]
    #[must_use]
    pub fn window_id(&self) -> WindowId {
        self.window.id
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Windows in positional order, each holding its tabs in positional order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    /// Windows, frontmost first.
    windows: Vec<WindowRecord>,
    /// Tab id to (window slot, tab slot), both zero-based.
    #[serde(skip)]
    index: FxHashMap<TabId, (usize, usize)>,
}

// ============================================================================
// Snapshot - Construction
// ============================================================================

impl Snapshot {
    /// Runs the enumerate script and parses a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bridge`] if the script fails and [`Error::Parse`] if
    /// its output is malformed.
    pub async fn fetch(bridge: &dyn ScriptRunner) -> Result<Self> {
        let raw = bridge.run(&BridgeScript::Enumerate).await?;
        let snapshot = parse_snapshot(&raw)?;
        debug!(
            windows = snapshot.window_count(),
            tabs = snapshot.tab_count(),
            "Snapshot captured"
        );
        Ok(snapshot)
    }

    /// Groups decoded lines into windows and validates invariants.
    ///
    /// Windows keep first-seen order and tabs keep emitted order; nothing is
    /// re-sorted. Positions must already be dense and in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for a duplicate tab id, a position gap, or a
    /// window reported at two different positions.
    pub fn from_lines(lines: Vec<TabLine>) -> Result<Self> {
        let mut windows: Vec<WindowRecord> = Vec::new();
        let mut slots: FxHashMap<WindowId, usize> = FxHashMap::default();
        let mut index: FxHashMap<TabId, (usize, usize)> = FxHashMap::default();

        for TabLine {
            line,
            window_position,
            tab,
        } in lines
        {
            let slot = match slots.get(&tab.window_id) {
                Some(&slot) => {
                    let known = windows[slot].position;
                    if known != window_position {
                        return Err(Error::parse(
                            line,
                            format!(
                                "window {} reported at index {} and {}",
                                tab.window_id, known, window_position
                            ),
                        ));
                    }
                    slot
                }
                None => {
                    let expected = windows.len() + 1;
                    if window_position != expected {
                        return Err(Error::parse(
                            line,
                            format!("window index {window_position}, expected {expected}"),
                        ));
                    }
                    windows.push(WindowRecord::new(tab.window_id, window_position));
                    slots.insert(tab.window_id, windows.len() - 1);
                    windows.len() - 1
                }
            };

            let window = &mut windows[slot];
            let expected = window.len() + 1;
            if tab.position != expected {
                return Err(Error::parse(
                    line,
                    format!(
                        "tab index {} in window {}, expected {}",
                        tab.position, window.id, expected
                    ),
                ));
            }
            if index.insert(tab.id, (slot, window.len())).is_some() {
                return Err(Error::parse(line, format!("duplicate tab id {}", tab.id)));
            }
            window.tabs.push(tab);
        }

        for window in &windows {
            match window.active_count() {
                1 => {}
                0 => warn!(window_id = %window.id, "Window reported no active tab"),
                n => warn!(window_id = %window.id, active = n, "Window reported several active tabs"),
            }
        }

        Ok(Self { windows, index })
    }
}

// ============================================================================
// Snapshot - Lookups
// ============================================================================

impl Snapshot {
    /// All windows, frontmost first.
    #[inline]
    #[must_use]
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    /// Number of windows.
    #[inline]
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Number of tabs across all windows.
    #[inline]
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no windows are open.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Iterates every tab, window by window.
    pub fn iter_tabs(&self) -> impl Iterator<Item = &TabRecord> {
        self.windows.iter().flat_map(|window| window.tabs.iter())
    }

    /// Returns the window at a 1-based position.
    #[must_use]
    pub fn window(&self, position: usize) -> Option<&WindowRecord> {
        position.checked_sub(1).and_then(|i| self.windows.get(i))
    }

    /// Returns the active tab of the window at a 1-based position.
    #[must_use]
    pub fn active_tab(&self, window_position: usize) -> Option<&TabRecord> {
        self.window(window_position).and_then(WindowRecord::active_tab)
    }

    /// Looks up a tab by positional coordinates.
    #[must_use]
    pub fn lookup_by_position(&self, address: PositionalAddress) -> Option<&TabRecord> {
        self.window(address.window())
            .and_then(|window| window.tab(address.tab()))
    }

    /// Looks up a tab by identity, returning its current coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if no tab has this id.
    pub fn lookup_by_id(&self, tab_id: TabId) -> Result<TabLocation<'_>> {
        let &(w, t) = self
            .index
            .get(&tab_id)
            .ok_or_else(|| Error::tab_not_found(tab_id))?;
        let window = &self.windows[w];
        Ok(TabLocation {
            window,
            tab: &window.tabs[t],
        })
    }

    /// Returns `true` if a tab with this id exists.
    #[inline]
    #[must_use]
    pub fn contains(&self, tab_id: TabId) -> bool {
        self.index.contains_key(&tab_id)
    }
}

// ============================================================================
// Tests
// ============================================================================
