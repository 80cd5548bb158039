use crate::ids::{TabId, WindowId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    WindowOpened {
        window_id: WindowId,
        tab_id: TabId,
    },
    WindowClosed {
        window_id: WindowId,
    },
    WindowFocused {
        window_id: WindowId,
    },
    TabFronted {
        window_id: WindowId,
        tab_id: TabId,
    },
    TabOpened {
        tab_id: TabId,
        origin: String,
    },
    TabNavigated {
        tab_id: TabId,
        origin: String,
    },
    TabClosed {
        tab_id: TabId,
    },
    ScriptBlocked {
        tab_id: TabId,
        url: String,
    },
    ToggleScriptBlock {
        tab_id: TabId,
        url: String,
    },
    SetOriginScripts {
        tab_id: TabId,
        origin: String,
        allow: bool,
    },
    SetAllScripts {
        tab_id: TabId,
        allow: bool,
    },
    CommitScriptDecisions {
        tab_id: TabId,
    },
}
