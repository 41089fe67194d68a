//! Tab records.

use serde::Serialize;

use crate::identifiers::{TabId, WindowId};

// ============================================================================
// TabRecord
// ============================================================================

/// One open tab as seen in a single snapshot.
///
/// `position` is only meaningful relative to the snapshot that produced the
/// record. Use `id` to address the tab in a later operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    /// Stable tab identity.
    pub id: TabId,
    /// Stable identity of the owning window.
    pub window_id: WindowId,
    /// 1-based index within the window's tab strip.
    pub position: usize,
    /// Whether this is the window's focused tab.
    pub is_active: bool,
    /// Page title, possibly empty.
    pub title: String,
    /// Page URL, possibly empty.
    pub url: String,
}

impl TabRecord {
    /// Returns the title, or the URL when the title is empty.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}
