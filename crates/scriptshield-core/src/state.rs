use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{TabId, WindowId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub actually_blocked: bool,
    pub will_block: bool,
    pub user_interacted: bool,
}

impl ScriptEntry {
    // The shape the engine reports when it stops a script: blocked now,
    // blocked by default, not yet touched by the user.
    pub fn blocked() -> Self {
        Self {
            actually_blocked: true,
            will_block: true,
            user_interacted: false,
        }
    }
}

pub type NoScriptInfo = BTreeMap<String, ScriptEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub origin: String,
    pub noscript_info: NoScriptInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no window currently has focus")]
    NoFocusedWindow,
    #[error("{0} is not tracked")]
    WindowNotFound(WindowId),
    #[error("{0} is not tracked")]
    TabNotFound(TabId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldsState {
    pub tabs: BTreeMap<TabId, Tab>,
    pub windows: BTreeMap<WindowId, TabId>,
    pub current_window_id: Option<WindowId>,
}

impl ShieldsState {
    pub fn track_tab(&mut self, tab_id: TabId, origin: impl Into<String>) -> &mut Tab {
        let origin = origin.into();
        let tab = self.tabs.entry(tab_id).or_insert_with(|| Tab {
            id: tab_id,
            origin: String::new(),
            noscript_info: NoScriptInfo::new(),
        });
        tab.origin = origin;
        tab
    }

    pub fn bind_window(&mut self, window_id: WindowId, tab_id: TabId) -> Result<(), LookupError> {
        if !self.tabs.contains_key(&tab_id) {
            return Err(LookupError::TabNotFound(tab_id));
        }
        self.windows.insert(window_id, tab_id);
        if self.current_window_id.is_none() {
            self.current_window_id = Some(window_id);
        }
        Ok(())
    }

    pub fn focus_window(&mut self, window_id: WindowId) -> Result<(), LookupError> {
        if !self.windows.contains_key(&window_id) {
            return Err(LookupError::WindowNotFound(window_id));
        }
        self.current_window_id = Some(window_id);
        Ok(())
    }

    pub fn current_tab(&self) -> Result<&Tab, LookupError> {
        let window_id = self.current_window_id.ok_or(LookupError::NoFocusedWindow)?;
        let tab_id = self
            .windows
            .get(&window_id)
            .ok_or(LookupError::WindowNotFound(window_id))?;
        self.tabs.get(tab_id).ok_or(LookupError::TabNotFound(*tab_id))
    }

    pub fn noscript_info(&self) -> Result<&NoScriptInfo, LookupError> {
        Ok(&self.current_tab()?.noscript_info)
    }

    // Copy-on-write: the receiver stays untouched, readers holding it keep
    // a consistent snapshot.
    pub fn set_script_entry(
        &self,
        tab_id: TabId,
        url: impl Into<String>,
        entry: ScriptEntry,
    ) -> Result<Self, LookupError> {
        if !self.tabs.contains_key(&tab_id) {
            return Err(LookupError::TabNotFound(tab_id));
        }
        let mut next = self.clone();
        let tab = next.tabs.get_mut(&tab_id).expect("checked above");
        tab.noscript_info.insert(url.into(), entry);
        Ok(next)
    }
}
