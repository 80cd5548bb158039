use crate::ids::{TabId, WindowId};
use crate::state::{ScriptEntry, ShieldsState, Tab};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: ShieldsState,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub ops: Vec<PatchOp>,
    pub from_revision: u64,
    pub to_revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOp {
    UpsertTab(Tab),
    RemoveTab {
        tab_id: TabId,
    },
    NoScriptCleared {
        tab_id: TabId,
    },
    ScriptEntrySet {
        tab_id: TabId,
        url: String,
        entry: ScriptEntry,
    },
    WindowBound {
        window_id: WindowId,
        tab_id: TabId,
    },
    WindowUnbound {
        window_id: WindowId,
    },
    CurrentWindowChanged {
        window_id: Option<WindowId>,
    },
}
