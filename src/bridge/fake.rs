//! In-memory browser standing in for osascript in tests.
//!
//! Answers [`BridgeScript::Enumerate`] in the real wire format, applies
//! mutations the way Chromium does, and records every script it receives.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};

use super::{BridgeScript, FIELD_DELIMITER, ScriptRunner};

#[derive(Debug, Clone)]
struct FakeTab {
    id: u64,
    title: String,
    url: String,
}

#[derive(Debug, Clone)]
struct FakeWindow {
    id: u64,
    tabs: Vec<FakeTab>,
    /// 1-based index of the active tab.
    active: usize,
}

#[derive(Debug, Default)]
pub(crate) struct FakeBrowser {
    windows: Mutex<Vec<FakeWindow>>,
    scripts: Mutex<Vec<BridgeScript>>,
    failure: Mutex<Option<String>>,
    canned_output: Mutex<Option<String>>,
}

impl FakeBrowser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a window; `active` is the 1-based active tab.
    pub(crate) fn with_window(self, id: u64, tabs: &[(u64, &str, &str)], active: usize) -> Self {
        let tabs = tabs
            .iter()
            .map(|(id, title, url)| FakeTab {
                id: *id,
                title: (*title).to_string(),
                url: (*url).to_string(),
            })
            .collect();
        self.windows.lock().push(FakeWindow { id, tabs, active });
        self
    }

    /// Makes every enumerate return `raw` verbatim.
    pub(crate) fn with_output(self, raw: impl Into<String>) -> Self {
        *self.canned_output.lock() = Some(raw.into());
        self
    }

    /// Makes every subsequent script fail with `message`.
    pub(crate) fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    pub(crate) fn scripts(&self) -> Vec<BridgeScript> {
        self.scripts.lock().clone()
    }

    pub(crate) fn mutations(&self) -> Vec<BridgeScript> {
        self.scripts
            .lock()
            .iter()
            .copied()
            .filter(BridgeScript::is_mutation)
            .collect()
    }

    /// Moves a tab to `position` in another window, behind the caller's back.
    pub(crate) fn move_tab(&self, tab_id: u64, to_window: u64, position: usize) {
        let mut windows = self.windows.lock();
        let Some((w, t)) = find(&windows, tab_id) else {
            return;
        };
        let source = &mut windows[w];
        let tab = source.tabs.remove(t);
        if t + 1 < source.active {
            source.active -= 1;
        }
        source.active = source.active.min(source.tabs.len()).max(1);
        if let Some(target) = windows.iter_mut().find(|win| win.id == to_window) {
            target.tabs.insert(position - 1, tab);
            if target.active >= position {
                target.active += 1;
            }
        }
        windows.retain(|win| !win.tabs.is_empty());
    }

    /// Inserts a new tab at the front of a window.
    pub(crate) fn open_tab_front(&self, window_id: u64, tab_id: u64, title: &str) {
        let mut windows = self.windows.lock();
        if let Some(window) = windows.iter_mut().find(|win| win.id == window_id) {
            window.tabs.insert(
                0,
                FakeTab {
                    id: tab_id,
                    title: title.to_string(),
                    url: format!("https://example.com/{tab_id}"),
                },
            );
            window.active += 1;
        }
    }

    fn render(&self) -> String {
        let windows = self.windows.lock();
        let mut out = String::new();
        for (w, window) in windows.iter().enumerate() {
            for (t, tab) in window.tabs.iter().enumerate() {
                let fields = [
                    window.id.to_string(),
                    (w + 1).to_string(),
                    tab.id.to_string(),
                    (t + 1).to_string(),
                    (t + 1 == window.active).to_string(),
                    tab.title.clone(),
                    tab.url.clone(),
                ];
                out.push_str(&fields.join(FIELD_DELIMITER));
                out.push('\n');
            }
        }
        out
    }

    fn apply(&self, script: &BridgeScript) -> Result<()> {
        let mut windows = self.windows.lock();
        match *script {
            BridgeScript::Enumerate => Ok(()),
            BridgeScript::CloseById { window_id, tab_id } => {
                let w = windows
                    .iter()
                    .position(|win| win.id == window_id.get())
                    .ok_or_else(|| Error::bridge(format!("Can't get window id {window_id}.")))?;
                let t = windows[w]
                    .tabs
                    .iter()
                    .position(|tab| tab.id == tab_id.get())
                    .ok_or_else(|| {
                        Error::bridge(format!("Can't get tab id {tab_id} of window id {window_id}."))
                    })?;
                close_at(&mut windows, w, t);
                Ok(())
            }
            BridgeScript::ActivateById { window_id, tab_id } => {
                let w = windows
                    .iter()
                    .position(|win| win.id == window_id.get())
                    .ok_or_else(|| Error::bridge(format!("Can't get window id {window_id}.")))?;
                let t = windows[w]
                    .tabs
                    .iter()
                    .position(|tab| tab.id == tab_id.get())
                    .ok_or_else(|| {
                        Error::bridge(format!("Tab {tab_id} is not in window {window_id}"))
                    })?;
                let mut window = windows.remove(w);
                window.active = t + 1;
                windows.insert(0, window);
                Ok(())
            }
            BridgeScript::CloseByPosition(address) => {
                let w = address.window() - 1;
                let t = address.tab() - 1;
                if w >= windows.len() {
                    return Err(Error::bridge(format!("Can't get window {}.", address.window())));
                }
                if t >= windows[w].tabs.len() {
                    return Err(Error::bridge(format!(
                        "Can't get tab {} of window {}.",
                        address.tab(),
                        address.window()
                    )));
                }
                close_at(&mut windows, w, t);
                Ok(())
            }
        }
    }
}

fn find(windows: &[FakeWindow], tab_id: u64) -> Option<(usize, usize)> {
    windows.iter().enumerate().find_map(|(w, win)| {
        win.tabs
            .iter()
            .position(|tab| tab.id == tab_id)
            .map(|t| (w, t))
    })
}

/// Removes a tab; the right-hand neighbour inherits focus, as in Chromium.
fn close_at(windows: &mut Vec<FakeWindow>, w: usize, t: usize) {
    let window = &mut windows[w];
    window.tabs.remove(t);
    if window.tabs.is_empty() {
        windows.remove(w);
        return;
    }
    if t + 1 < window.active {
        window.active -= 1;
    }
    window.active = window.active.min(window.tabs.len());
}

#[async_trait]
impl ScriptRunner for FakeBrowser {
    async fn run(&self, script: &BridgeScript) -> Result<String> {
        self.scripts.lock().push(*script);
        if let Some(message) = self.failure.lock().clone() {
            return Err(Error::bridge(message));
        }
        // Canned output is a frozen browser: mutations succeed and change nothing.
        if let Some(raw) = self.canned_output.lock().clone() {
            return match script {
                BridgeScript::Enumerate => Ok(raw),
                _ => Ok(String::new()),
            };
        }
        self.apply(script)?;
        match script {
            BridgeScript::Enumerate => Ok(self.render()),
            _ => Ok(String::new()),
        }
    }
}
