//! Operation results: the tab directory view and mutation confirmations.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};

use crate::browser::{PositionalAddress, ResolvedAddress, Snapshot};
use crate::identifiers::{TabId, WindowId};

// ============================================================================
// TabListing
// ============================================================================

/// Directory view of one snapshot.
///
/// Each tab shows its stable `id`, which is what later calls should use to
/// address it. Positions are printed for orientation only.
#[derive(Debug, Clone)]
pub struct TabListing {
    snapshot: Snapshot,
}

impl TabListing {
    /// Wraps a snapshot.
    #[inline]
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Returns the underlying snapshot.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Renders the human-readable directory.
    #[must_use]
    pub fn render_text(&self) -> String {
        let snapshot = &self.snapshot;
        if snapshot.is_empty() {
            return "No open browser windows.".to_string();
        }

        let mut out = format!(
            "{} {}, {} {}\n",
            snapshot.window_count(),
            plural(snapshot.window_count(), "window", "windows"),
            snapshot.tab_count(),
            plural(snapshot.tab_count(), "tab", "tabs")
        );

        for window in snapshot.windows() {
            out.push_str(&format!("\nWindow {} (id {})\n", window.position, window.id));
            for tab in &window.tabs {
                let marker = if tab.is_active { " [active]" } else { "" };
                out.push_str(&format!(
                    "  {}.{} {} (id {})\n",
                    tab.position,
                    marker,
                    tab.label(),
                    tab.id
                ));
                if !tab.url.is_empty() && tab.url != tab.label() {
                    out.push_str(&format!("     {}\n", tab.url));
                }
            }
        }

        out
    }

    /// Structured payload: rendered text plus the full window/tab tree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "text": self.render_text(),
            "windowCount": self.snapshot.window_count(),
            "tabCount": self.snapshot.tab_count(),
            "windows": self.snapshot.windows(),
        })
    }
}

impl fmt::Display for TabListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

// ============================================================================
// TabAction
// ============================================================================

/// Which mutation was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TabActionKind {
    /// A tab was closed.
    Closed,
    /// A tab was focused and its window raised.
    Activated,
}

/// Confirmation of a completed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabAction {
    /// What happened.
    pub action: TabActionKind,
    /// Target tab, for identity-based calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<TabId>,
    /// Owning window, for identity-based calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_id: Option<WindowId>,
    /// Coordinates at the time of the call.
    pub address: PositionalAddress,
}

impl TabAction {
    /// Builds a confirmation from a resolved address.
    #[must_use]
    pub fn new(action: TabActionKind, resolved: ResolvedAddress) -> Self {
        Self {
            action,
            tab_id: resolved.identity.map(|identity| identity.tab_id),
            window_id: resolved.identity.map(|identity| identity.window_id),
            address: resolved.position,
        }
    }

    /// Human-readable confirmation line.
    #[must_use]
    pub fn message(&self) -> String {
        let verb = match self.action {
            TabActionKind::Closed => "Closed",
            TabActionKind::Activated => "Activated",
        };
        match self.tab_id {
            Some(tab_id) => format!("{verb} tab {tab_id} (was {}).", self.address),
            None => format!("{verb} {}.", self.address),
        }
    }

    /// Structured payload: confirmation text plus the action fields.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut value = json!({
            "action": self.action,
            "address": self.address,
            "text": self.message(),
        });
        if let (Some(tab_id), Some(map)) = (self.tab_id, value.as_object_mut()) {
            map.insert("tabId".to_string(), json!(tab_id));
        }
        if let (Some(window_id), Some(map)) = (self.window_id, value.as_object_mut()) {
            map.insert("windowId".to_string(), json!(window_id));
        }
        value
    }
}

impl fmt::Display for TabAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::browser::{TabIdentity, parse_snapshot};

    const TWO_TABS: &str = "10|||1|||555|||1|||true|||Home|||https://example.com\n\
                            10|||1|||556|||2|||false|||Docs|||https://example.com/docs\n";

    #[test]
    fn test_listing_names_tabs_marks_active_and_shows_ids() {
        let listing = TabListing::new(parse_snapshot(TWO_TABS).unwrap());
        let text = listing.render_text();

        assert!(text.starts_with("1 window, 2 tabs\n"));
        assert!(text.contains("Window 1 (id 10)"));
        assert!(text.contains("  1. [active] Home (id 555)\n     https://example.com\n"));
        assert!(text.contains("  2. Docs (id 556)\n     https://example.com/docs\n"));
    }

    #[test]
    fn test_listing_value() {
        let listing = TabListing::new(parse_snapshot(TWO_TABS).unwrap());
        let value = listing.to_value();
        assert_eq!(value["windowCount"], 1);
        assert_eq!(value["tabCount"], 2);
        assert_eq!(value["windows"][0]["tabs"][0]["id"], 555);
        assert_eq!(value["windows"][0]["tabs"][0]["isActive"], true);
        assert!(value["text"].as_str().unwrap().contains("(id 556)"));
    }

    #[test]
    fn test_empty_listing() {
        let listing = TabListing::new(Snapshot::default());
        assert_eq!(listing.to_string(), "No open browser windows.");
    }

    #[test]
    fn test_untitled_tab_shows_url_once() {
        let listing =
            TabListing::new(parse_snapshot("1|||1|||9|||1|||true||||||about:blank\n").unwrap());
        let text = listing.render_text();
        assert!(text.contains("  1. [active] about:blank (id 9)\n"));
        assert_eq!(text.matches("about:blank").count(), 1);
    }

    #[test]
    fn test_action_message_by_id() {
        let action = TabAction::new(
            TabActionKind::Closed,
            ResolvedAddress {
                position: PositionalAddress::new(1, 2).unwrap(),
                identity: Some(TabIdentity {
                    window_id: WindowId::new(10).unwrap(),
                    tab_id: TabId::new(556).unwrap(),
                }),
            },
        );
        assert_eq!(action.message(), "Closed tab 556 (was tab 2 of window 1).");
        let value = action.to_value();
        assert_eq!(value["action"], "closed");
        assert_eq!(value["tabId"], 556);
        assert_eq!(value["windowId"], 10);
        assert_eq!(value["address"]["windowIndex"], 1);
        assert_eq!(value["text"], "Closed tab 556 (was tab 2 of window 1).");
    }

    #[test]
    fn test_action_message_by_position() {
        let action = TabAction::new(
            TabActionKind::Closed,
            ResolvedAddress {
                position: PositionalAddress::new(2, 3).unwrap(),
                identity: None,
            },
        );
        assert_eq!(action.to_string(), "Closed tab 3 of window 2.");
        let value = action.to_value();
        assert!(value.get("tabId").is_none());
        assert!(value.get("windowId").is_none());
        assert_eq!(value["text"], "Closed tab 3 of window 2.");
    }
}
