//! Typed commands decoded from inbound requests.
//!
//! | Method | Params | Notes |
//! |--------|--------|-------|
//! | `get_tabs` | none | Read-only listing |
//! | `close_tab_by_id` | `tabId` | Identity-based |
//! | `activate_tab_by_id` | `tabId` | Identity-based, raises the window |
//! | `close_tab` | `windowIndex`, `tabIndex` | Deprecated positional close |

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;

use crate::browser::PositionalAddress;
use crate::error::{Error, Result};
use crate::identifiers::TabId;

use super::Request;

// ============================================================================
// Command
// ============================================================================

/// A validated operation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List every window and tab.
    GetTabs,
    /// Close a tab by stable identity.
    CloseTabById {
        /// Tab to close.
        tab_id: TabId,
    },
    /// Focus a tab and raise its window.
    ActivateTabById {
        /// Tab to activate.
        tab_id: TabId,
    },
    /// Close a tab by position. Deprecated.
    CloseTab {
        /// Position in the caller's last listing.
        address: PositionalAddress,
    },
}

impl Command {
    /// `get_tabs` method name.
    pub const GET_TABS: &'static str = "get_tabs";
    /// `close_tab_by_id` method name.
    pub const CLOSE_TAB_BY_ID: &'static str = "close_tab_by_id";
    /// `activate_tab_by_id` method name.
    pub const ACTIVATE_TAB_BY_ID: &'static str = "activate_tab_by_id";
    /// `close_tab` method name.
    pub const CLOSE_TAB: &'static str = "close_tab";

    /// Returns the wire method name.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::GetTabs => Self::GET_TABS,
            Self::CloseTabById { .. } => Self::CLOSE_TAB_BY_ID,
            Self::ActivateTabById { .. } => Self::ACTIVATE_TAB_BY_ID,
            Self::CloseTab { .. } => Self::CLOSE_TAB,
        }
    }

    /// Decodes and validates a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unknown method, a missing
    /// parameter, or a parameter that is not a positive integer.
    pub fn from_request(request: &Request) -> Result<Self> {
        let params = &request.params;
        if !(params.is_null() || params.is_object()) {
            return Err(Error::validation("params must be an object"));
        }

        match request.method.as_str() {
            Self::GET_TABS => Ok(Self::GetTabs),
            Self::CLOSE_TAB_BY_ID => Ok(Self::CloseTabById {
                tab_id: tab_id_param(params)?,
            }),
            Self::ACTIVATE_TAB_BY_ID => Ok(Self::ActivateTabById {
                tab_id: tab_id_param(params)?,
            }),
            Self::CLOSE_TAB => {
                let window = positive_param(params, "windowIndex")?;
                let tab = positive_param(params, "tabIndex")?;
                let address = PositionalAddress::new(
                    to_index(window, "windowIndex")?,
                    to_index(tab, "tabIndex")?,
                )?;
                Ok(Self::CloseTab { address })
            }
            other => Err(Error::validation(format!(
                "unknown method '{}', expected one of: {}, {}, {}, {}",
                other,
                Self::GET_TABS,
                Self::CLOSE_TAB_BY_ID,
                Self::ACTIVATE_TAB_BY_ID,
                Self::CLOSE_TAB
            ))),
        }
    }
}

// ============================================================================
// Parameter Helpers
// ============================================================================

fn tab_id_param(params: &Value) -> Result<TabId> {
    let raw = positive_param(params, "tabId")?;
    TabId::new(raw).ok_or_else(|| Error::validation("tabId must be a positive integer"))
}

/// Reads a required positive integer parameter.
fn positive_param(params: &Value, name: &str) -> Result<u64> {
    let value = params
        .get(name)
        .ok_or_else(|| Error::validation(format!("missing required parameter '{name}'")))?;
    match value.as_u64() {
        Some(n) if n > 0 => Ok(n),
        _ => Err(Error::validation(format!(
            "{name} must be a positive integer, got {value}"
        ))),
    }
}

fn to_index(value: u64, name: &str) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::validation(format!("{name} is out of range")))
}

// ============================================================================
// Tests
// ============================================================================
