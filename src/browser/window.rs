//! Window records.

use serde::Serialize;

use crate::identifiers::WindowId;

use super::TabRecord;

// ============================================================================
// WindowRecord
// ============================================================================

/// One browser window and its tabs, in tab-strip order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowRecord {
    /// Stable window identity.
    pub id: WindowId,
    /// 1-based index among open windows (1 is frontmost).
    pub position: usize,
    /// Tabs in positional order.
    pub tabs: Vec<TabRecord>,
}

impl WindowRecord {
    /// Creates an empty window record.
    #[inline]
    #[must_use]
    pub fn new(id: WindowId, position: usize) -> Self {
        Self {
            id,
            position,
            tabs: Vec::new(),
        }
    }

    /// Returns the tab at a 1-based position.
    #[inline]
    #[must_use]
    pub fn tab(&self, position: usize) -> Option<&TabRecord> {
        position.checked_sub(1).and_then(|i| self.tabs.get(i))
    }

    /// Returns the active tab, if the bridge reported one.
    #[must_use]
    pub fn active_tab(&self) -> Option<&TabRecord> {
        self.tabs.iter().find(|tab| tab.is_active)
    }

    /// Number of tabs flagged active. Healthy windows report exactly one.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tabs.iter().filter(|tab| tab.is_active).count()
    }

    /// Number of tabs in this window.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns `true` if the window has no tabs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
