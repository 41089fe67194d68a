//! Outbound AppleScript templates.
//!
//! Each [`BridgeScript`] is either a pure query or a pure mutation, never
//! both. Only typed values are interpolated: ids and positions are integers,
//! and the application name comes from the closed [`BrowserApp`] set. Caller
//! text never reaches a script.
//!
//! # Enumerate Output Format
//!
//! One line per tab, fields separated by [`FIELD_DELIMITER`]:
//!
//! ```text
//! windowId|||windowIndex|||tabId|||tabIndex|||active|||title|||url
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use crate::browser::PositionalAddress;
use crate::identifiers::{TabId, WindowId};

use super::BrowserApp;

// ============================================================================
// Constants
// ============================================================================

/// Separator between fields of an enumerate record.
///
/// Titles and URLs may contain any common punctuation, so a non-natural
/// sequence is used.
pub const FIELD_DELIMITER: &str = "|||";

/// Number of fields in an enumerate record.
pub const FIELD_COUNT: usize = 7;

// ============================================================================
// BridgeScript
// ============================================================================

/// A single script to run against the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeScript {
    /// Lists every tab of every window. No mutation.
    Enumerate,

    /// Closes a tab addressed by identity.
    CloseById {
        /// Owning window.
        window_id: WindowId,
        /// Tab to close.
        tab_id: TabId,
    },

    /// Raises the tab's window and makes the tab active, in one script.
    ActivateById {
        /// Owning window.
        window_id: WindowId,
        /// Tab to activate.
        tab_id: TabId,
    },

    /// Closes a tab by position. Legacy path, no freshness check.
    CloseByPosition(PositionalAddress),
}

impl BridgeScript {
    /// Short name used in logs.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Enumerate => "enumerate",
            Self::CloseById { .. } => "close_by_id",
            Self::ActivateById { .. } => "activate_by_id",
            Self::CloseByPosition(_) => "close_by_position",
        }
    }

    /// Returns `true` if running this script changes browser state.
    #[inline]
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Enumerate)
    }

    /// Renders the AppleScript source for the given application.
    #[must_use]
    pub fn render(&self, app: BrowserApp) -> String {
        let app = app.app_name();
        match *self {
            Self::Enumerate => format!(
                r#"tell application "{app}"
    set output to ""
    set windowCount to count of windows
    repeat with w from 1 to windowCount
        set theWindow to window w
        set windowId to id of theWindow
        set activeIndex to active tab index of theWindow
        set tabCount to count of tabs of theWindow
        repeat with t from 1 to tabCount
            set theTab to tab t of theWindow
            set output to output & windowId & "{d}" & w & "{d}" & (id of theTab) & "{d}" & t & "{d}" & (t = activeIndex) & "{d}" & (title of theTab) & "{d}" & (URL of theTab) & linefeed
        end repeat
    end repeat
    return output
end tell"#,
                d = FIELD_DELIMITER
            ),
            Self::CloseById { window_id, tab_id } => format!(
                r#"tell application "{app}"
    close tab id {tab_id} of window id {window_id}
end tell"#
            ),
            Self::ActivateById { window_id, tab_id } => format!(
                r#"tell application "{app}"
    set targetWindow to window id {window_id}
    set targetIndex to 0
    repeat with t from 1 to count of tabs of targetWindow
        if id of tab t of targetWindow is {tab_id} then
            set targetIndex to t
            exit repeat
        end if
    end repeat
    if targetIndex is 0 then error "Tab {tab_id} is not in window {window_id}"
    set active tab index of targetWindow to targetIndex
    set index of targetWindow to 1
    activate
end tell"#
            ),
            Self::CloseByPosition(address) => format!(
                r#"tell application "{app}"
    close tab {tab} of window {window}
end tell"#,
                tab = address.tab(),
                window = address.window()
            ),
        }
    }
}

impl fmt::Display for BridgeScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enumerate => f.write_str("enumerate"),
            Self::CloseById { window_id, tab_id } => {
                write!(f, "close tab {tab_id} of window {window_id}")
            }
            Self::ActivateById { window_id, tab_id } => {
                write!(f, "activate tab {tab_id} of window {window_id}")
            }
            Self::CloseByPosition(address) => write!(f, "close {address}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
