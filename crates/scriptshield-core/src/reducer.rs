use thiserror::Error;

use crate::ids::{TabId, WindowId};
use crate::intent::Intent;
use crate::noscript::parse_origin;
use crate::patch::PatchOp;
use crate::state::{NoScriptInfo, ScriptEntry, ShieldsState, Tab};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    #[error("{0} is not tracked")]
    WindowNotFound(WindowId),
    #[error("{0} is not tracked")]
    TabNotFound(TabId),
    #[error("{0} is already tracked")]
    TabAlreadyTracked(TabId),
    #[error("{0} is already bound")]
    WindowAlreadyBound(WindowId),
    #[error("script {url} was never observed for {tab_id}")]
    ScriptNotObserved { tab_id: TabId, url: String },
    #[error("{0:?} is not a valid origin")]
    InvalidOrigin(String),
}

pub fn apply_intent(state: &mut ShieldsState, intent: Intent) -> Result<Vec<PatchOp>, ReduceError> {
    let mut ops = Vec::new();

    match intent {
        Intent::WindowOpened { window_id, tab_id } => {
            if state.windows.contains_key(&window_id) {
                return Err(ReduceError::WindowAlreadyBound(window_id));
            }
            if !state.tabs.contains_key(&tab_id) {
                return Err(ReduceError::TabNotFound(tab_id));
            }
            state.windows.insert(window_id, tab_id);
            ops.push(PatchOp::WindowBound { window_id, tab_id });
            if state.current_window_id.is_none() {
                state.current_window_id = Some(window_id);
                ops.push(PatchOp::CurrentWindowChanged {
                    window_id: Some(window_id),
                });
            }
        }
        Intent::WindowClosed { window_id } => {
            if state.windows.remove(&window_id).is_none() {
                return Err(ReduceError::WindowNotFound(window_id));
            }
            ops.push(PatchOp::WindowUnbound { window_id });
            if state.current_window_id == Some(window_id) {
                state.current_window_id = state.windows.keys().next().copied();
                ops.push(PatchOp::CurrentWindowChanged {
                    window_id: state.current_window_id,
                });
            }
        }
        Intent::WindowFocused { window_id } => {
            if !state.windows.contains_key(&window_id) {
                return Err(ReduceError::WindowNotFound(window_id));
            }
            if state.current_window_id != Some(window_id) {
                state.current_window_id = Some(window_id);
                ops.push(PatchOp::CurrentWindowChanged {
                    window_id: Some(window_id),
                });
            }
        }
        Intent::TabFronted { window_id, tab_id } => {
            if !state.tabs.contains_key(&tab_id) {
                return Err(ReduceError::TabNotFound(tab_id));
            }
            let fronted = state
                .windows
                .get_mut(&window_id)
                .ok_or(ReduceError::WindowNotFound(window_id))?;
            if *fronted != tab_id {
                *fronted = tab_id;
                ops.push(PatchOp::WindowBound { window_id, tab_id });
            }
        }
        Intent::TabOpened { tab_id, origin } => {
            if state.tabs.contains_key(&tab_id) {
                return Err(ReduceError::TabAlreadyTracked(tab_id));
            }
            let tab = Tab {
                id: tab_id,
                origin,
                noscript_info: NoScriptInfo::new(),
            };
            state.tabs.insert(tab_id, tab.clone());
            ops.push(PatchOp::UpsertTab(tab));
        }
        Intent::TabNavigated { tab_id, origin } => {
            let tab = state
                .tabs
                .get_mut(&tab_id)
                .ok_or(ReduceError::TabNotFound(tab_id))?;
            let origin_changed = tab.origin != origin;
            let had_scripts = !tab.noscript_info.is_empty();
            if !origin_changed && !had_scripts {
                return Ok(ops);
            }
            // A navigation starts a fresh observation window for the tab.
            tab.origin = origin;
            tab.noscript_info.clear();
            if had_scripts {
                ops.push(PatchOp::NoScriptCleared { tab_id });
            }
            ops.push(PatchOp::UpsertTab(tab.clone()));
        }
        Intent::TabClosed { tab_id } => {
            if state.tabs.remove(&tab_id).is_none() {
                return Err(ReduceError::TabNotFound(tab_id));
            }
            ops.push(PatchOp::RemoveTab { tab_id });

            let unbound: Vec<WindowId> = state
                .windows
                .iter()
                .filter(|(_, fronted)| **fronted == tab_id)
                .map(|(window_id, _)| *window_id)
                .collect();
            for window_id in unbound {
                state.windows.remove(&window_id);
                ops.push(PatchOp::WindowUnbound { window_id });
                if state.current_window_id == Some(window_id) {
                    state.current_window_id = state.windows.keys().next().copied();
                    ops.push(PatchOp::CurrentWindowChanged {
                        window_id: state.current_window_id,
                    });
                }
            }
        }
        Intent::ScriptBlocked { tab_id, url } => {
            let tab = state
                .tabs
                .get_mut(&tab_id)
                .ok_or(ReduceError::TabNotFound(tab_id))?;
            if !tab.noscript_info.contains_key(&url) {
                let entry = ScriptEntry::blocked();
                tab.noscript_info.insert(url.clone(), entry);
                ops.push(PatchOp::ScriptEntrySet { tab_id, url, entry });
            }
        }
        Intent::ToggleScriptBlock { tab_id, url } => {
            let tab = state
                .tabs
                .get_mut(&tab_id)
                .ok_or(ReduceError::TabNotFound(tab_id))?;
            let entry = tab
                .noscript_info
                .get_mut(&url)
                .ok_or_else(|| ReduceError::ScriptNotObserved {
                    tab_id,
                    url: url.clone(),
                })?;
            entry.actually_blocked = !entry.actually_blocked;
            entry.user_interacted = true;
            let entry = *entry;
            ops.push(PatchOp::ScriptEntrySet { tab_id, url, entry });
        }
        Intent::SetOriginScripts {
            tab_id,
            origin,
            allow,
        } => {
            let target =
                parse_origin(&origin).ok_or_else(|| ReduceError::InvalidOrigin(origin.clone()))?;
            let tab = state
                .tabs
                .get_mut(&tab_id)
                .ok_or(ReduceError::TabNotFound(tab_id))?;
            for (url, entry) in tab.noscript_info.iter_mut() {
                if parse_origin(url).as_ref() != Some(&target) {
                    continue;
                }
                if entry.actually_blocked == !allow && entry.user_interacted {
                    continue;
                }
                entry.actually_blocked = !allow;
                entry.user_interacted = true;
                ops.push(PatchOp::ScriptEntrySet {
                    tab_id,
                    url: url.clone(),
                    entry: *entry,
                });
            }
        }
        Intent::SetAllScripts { tab_id, allow } => {
            let tab = state
                .tabs
                .get_mut(&tab_id)
                .ok_or(ReduceError::TabNotFound(tab_id))?;
            for (url, entry) in tab.noscript_info.iter_mut() {
                if entry.actually_blocked == !allow && entry.user_interacted {
                    continue;
                }
                entry.actually_blocked = !allow;
                entry.user_interacted = true;
                ops.push(PatchOp::ScriptEntrySet {
                    tab_id,
                    url: url.clone(),
                    entry: *entry,
                });
            }
        }
        Intent::CommitScriptDecisions { tab_id } => {
            let tab = state
                .tabs
                .get_mut(&tab_id)
                .ok_or(ReduceError::TabNotFound(tab_id))?;
            for (url, entry) in tab.noscript_info.iter_mut() {
                if entry.will_block == entry.actually_blocked && !entry.user_interacted {
                    continue;
                }
                // The per-page "once" decision becomes the default policy.
                entry.will_block = entry.actually_blocked;
                entry.user_interacted = false;
                ops.push(PatchOp::ScriptEntrySet {
                    tab_id,
                    url: url.clone(),
                    entry: *entry,
                });
            }
        }
    }

    Ok(ops)
}
