use url::{Origin, Url};

use crate::state::{NoScriptInfo, ScriptEntry};

// Opaque origins (data:, about:, parse failures) never compare equal across
// parses, so they cannot serve as a grouping key.
pub fn parse_origin(url: &str) -> Option<Origin> {
    let origin = Url::parse(url).ok()?.origin();
    match origin {
        Origin::Tuple(..) => Some(origin),
        Origin::Opaque(_) => None,
    }
}

pub fn script_entries(info: &NoScriptInfo) -> Vec<(&str, ScriptEntry)> {
    info.iter()
        .map(|(url, entry)| (url.as_str(), *entry))
        .collect()
}

pub fn scripts_for_origin<'a>(info: &'a NoScriptInfo, url: &str) -> Vec<(&'a str, ScriptEntry)> {
    let target = match parse_origin(url) {
        Some(origin) => origin,
        None => return Vec::new(),
    };
    info.iter()
        .filter(|(key, _)| parse_origin(key).as_ref() == Some(&target))
        .map(|(key, entry)| (key.as_str(), *entry))
        .collect()
}

pub fn group_scripts_by_origin(info: &NoScriptInfo) -> Vec<(String, Vec<(&str, ScriptEntry)>)> {
    let mut groups: Vec<(String, Vec<(&str, ScriptEntry)>)> = Vec::new();
    for (url, entry) in info {
        let origin = match parse_origin(url) {
            Some(origin) => origin.ascii_serialization(),
            None => continue,
        };
        match groups.iter_mut().find(|(existing, _)| *existing == origin) {
            Some((_, members)) => members.push((url.as_str(), *entry)),
            None => groups.push((origin, vec![(url.as_str(), *entry)])),
        }
    }
    groups
}

pub fn filter_by_will_block<'a>(
    pairs: &[(&'a str, ScriptEntry)],
    blocked: bool,
) -> Vec<(&'a str, ScriptEntry)> {
    pairs
        .iter()
        .copied()
        .filter(|(_, entry)| entry.will_block == blocked)
        .collect()
}

pub fn every_interaction_matches(pairs: &[(&str, ScriptEntry)], interacted: bool) -> bool {
    pairs
        .iter()
        .all(|(_, entry)| entry.user_interacted == interacted)
}

pub fn block_script_label(user_interacted: bool, will_block: bool) -> &'static str {
    match (user_interacted, will_block) {
        (true, true) => "Allowed once",
        (false, true) => "Allow",
        (true, false) => "Blocked once",
        (false, false) => "Block",
    }
}

pub fn block_all_label(info: &NoScriptInfo, will_block: bool) -> &'static str {
    let user_interacted = info.values().all(|entry| entry.user_interacted);
    match (user_interacted, will_block) {
        (true, true) => "Allowed once",
        (false, true) => "Allow all",
        (true, false) => "Blocked once",
        (false, false) => "Block all",
    }
}
