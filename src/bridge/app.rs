//! Target browser applications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ============================================================================
// BrowserApp
// ============================================================================

/// A scriptable macOS browser.
///
/// All variants share the Chromium scripting dictionary (`tab id`,
/// `window id`, `active tab index`). The set is closed so that the
/// application name interpolated into scripts never comes from caller input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrowserApp {
    /// Google Chrome.
    #[default]
    Chrome,
    /// Google Chrome Canary.
    ChromeCanary,
    /// Chromium.
    Chromium,
    /// Brave Browser.
    Brave,
    /// Microsoft Edge.
    Edge,
    /// Vivaldi.
    Vivaldi,
}

impl BrowserApp {
    /// All supported applications.
    pub const ALL: [BrowserApp; 6] = [
        Self::Chrome,
        Self::ChromeCanary,
        Self::Chromium,
        Self::Brave,
        Self::Edge,
        Self::Vivaldi,
    ];

    /// Returns the application name as used in `tell application "..."`.
    #[inline]
    #[must_use]
    pub const fn app_name(self) -> &'static str {
        match self {
            Self::Chrome => "Google Chrome",
            Self::ChromeCanary => "Google Chrome Canary",
            Self::Chromium => "Chromium",
            Self::Brave => "Brave Browser",
            Self::Edge => "Microsoft Edge",
            Self::Vivaldi => "Vivaldi",
        }
    }

    /// Returns the short configuration name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::ChromeCanary => "chrome-canary",
            Self::Chromium => "chromium",
            Self::Brave => "brave",
            Self::Edge => "edge",
            Self::Vivaldi => "vivaldi",
        }
    }
}

impl fmt::Display for BrowserApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.app_name())
    }
}

impl FromStr for BrowserApp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|app| app.as_str() == wanted || app.app_name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|app| app.as_str()).collect();
                Error::config(format!(
                    "unknown browser '{}', expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_chrome() {
        assert_eq!(BrowserApp::default().app_name(), "Google Chrome");
    }

    #[test]
    fn test_from_str_accepts_short_and_app_names() {
        assert_eq!("brave".parse::<BrowserApp>().unwrap(), BrowserApp::Brave);
        assert_eq!(
            "Microsoft Edge".parse::<BrowserApp>().unwrap(),
            BrowserApp::Edge
        );
        assert_eq!(
            " CHROME-CANARY ".parse::<BrowserApp>().unwrap(),
            BrowserApp::ChromeCanary
        );
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "safari".parse::<BrowserApp>().unwrap_err();
        assert_eq!(err.kind(), "config_error");
        assert!(err.to_string().contains("safari"));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&BrowserApp::ChromeCanary).unwrap(),
            "\"chrome-canary\""
        );
    }
}
