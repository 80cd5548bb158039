use std::collections::BTreeSet;

use scriptshield_core::{
    block_all_label, block_script_label, filter_by_will_block, group_scripts_by_origin,
    NoScriptInfo, ScriptEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListVisibility {
    Collapsed,
    Expanded,
}

impl Default for ListVisibility {
    fn default() -> Self {
        Self::Collapsed
    }
}

impl ListVisibility {
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

// Per-panel UI state: which origin lists the user has opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    expanded: BTreeSet<String>,
}

impl PanelState {
    pub fn toggle_group(&mut self, origin: &str) {
        match self.visibility(origin).toggled() {
            ListVisibility::Expanded => {
                self.expanded.insert(origin.to_owned());
            }
            ListVisibility::Collapsed => {
                self.expanded.remove(origin);
            }
        }
    }

    pub fn visibility(&self, origin: &str) -> ListVisibility {
        if self.expanded.contains(origin) {
            ListVisibility::Expanded
        } else {
            ListVisibility::Collapsed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRow {
    pub url: String,
    pub entry: ScriptEntry,
    pub toggle_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginGroup {
    pub origin: String,
    pub rows: Vec<ScriptRow>,
    pub visibility: ListVisibility,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub blocked_summary_label: &'static str,
    pub allowed_summary_label: &'static str,
    pub blocked: Vec<OriginGroup>,
    pub allowed: Vec<OriginGroup>,
}

pub fn build_panel(info: &NoScriptInfo, panel: &PanelState) -> PanelView {
    let mut blocked = Vec::new();
    let mut allowed = Vec::new();

    for (origin, members) in group_scripts_by_origin(info) {
        for (section, keep) in [(&mut blocked, true), (&mut allowed, false)] {
            let rows: Vec<ScriptRow> = filter_by_will_block(&members, keep)
                .into_iter()
                .map(|(url, entry)| ScriptRow {
                    url: url.to_owned(),
                    entry,
                    toggle_label: block_script_label(entry.user_interacted, entry.will_block),
                })
                .collect();
            if !rows.is_empty() {
                section.push(OriginGroup {
                    origin: origin.clone(),
                    rows,
                    visibility: panel.visibility(&origin),
                });
            }
        }
    }

    PanelView {
        blocked_summary_label: block_all_label(info, true),
        allowed_summary_label: block_all_label(info, false),
        blocked,
        allowed,
    }
}
