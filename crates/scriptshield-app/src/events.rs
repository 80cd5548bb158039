use std::collections::VecDeque;
use std::convert::Infallible;

use scriptshield_core::{Intent, TabId, WindowId};

// Raw browser-side notifications, ids still untyped. Everything the state
// model reacts to arrives through here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    WindowOpened { window_id: u64, tab_id: u64 },
    WindowClosed { window_id: u64 },
    WindowFocused { window_id: u64 },
    TabActivated { window_id: u64, tab_id: u64 },
    TabOpened { tab_id: u64, origin: String },
    TabNavigated { tab_id: u64, origin: String },
    TabClosed { tab_id: u64 },
    ScriptBlocked { tab_id: u64, url: String },
    ScriptToggleClicked { tab_id: u64, url: String },
    OriginToggleClicked { tab_id: u64, origin: String, allow: bool },
    AllScriptsToggleClicked { tab_id: u64, allow: bool },
    PageReloaded { tab_id: u64 },
}

impl BrowserEvent {
    pub fn into_intent(self) -> Intent {
        match self {
            Self::WindowOpened { window_id, tab_id } => Intent::WindowOpened {
                window_id: WindowId(window_id),
                tab_id: TabId(tab_id),
            },
            Self::WindowClosed { window_id } => Intent::WindowClosed {
                window_id: WindowId(window_id),
            },
            Self::WindowFocused { window_id } => Intent::WindowFocused {
                window_id: WindowId(window_id),
            },
            Self::TabActivated { window_id, tab_id } => Intent::TabFronted {
                window_id: WindowId(window_id),
                tab_id: TabId(tab_id),
            },
            Self::TabOpened { tab_id, origin } => Intent::TabOpened {
                tab_id: TabId(tab_id),
                origin,
            },
            Self::TabNavigated { tab_id, origin } => Intent::TabNavigated {
                tab_id: TabId(tab_id),
                origin,
            },
            Self::TabClosed { tab_id } => Intent::TabClosed {
                tab_id: TabId(tab_id),
            },
            Self::ScriptBlocked { tab_id, url } => Intent::ScriptBlocked {
                tab_id: TabId(tab_id),
                url,
            },
            Self::ScriptToggleClicked { tab_id, url } => Intent::ToggleScriptBlock {
                tab_id: TabId(tab_id),
                url,
            },
            Self::OriginToggleClicked {
                tab_id,
                origin,
                allow,
            } => Intent::SetOriginScripts {
                tab_id: TabId(tab_id),
                origin,
                allow,
            },
            Self::AllScriptsToggleClicked { tab_id, allow } => Intent::SetAllScripts {
                tab_id: TabId(tab_id),
                allow,
            },
            Self::PageReloaded { tab_id } => Intent::CommitScriptDecisions {
                tab_id: TabId(tab_id),
            },
        }
    }
}

pub trait EventSource {
    type Error;

    fn poll_event(&mut self) -> Result<Option<BrowserEvent>, Self::Error>;
}

#[derive(Debug, Default)]
pub struct QueueEventSource {
    queue: VecDeque<BrowserEvent>,
}

impl QueueEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BrowserEvent) {
        self.queue.push_back(event);
    }
}

impl FromIterator<BrowserEvent> for QueueEventSource {
    fn from_iter<I: IntoIterator<Item = BrowserEvent>>(events: I) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }
}

impl EventSource for QueueEventSource {
    type Error = Infallible;

    fn poll_event(&mut self) -> Result<Option<BrowserEvent>, Self::Error> {
        Ok(self.queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use scriptshield_core::{Intent, TabId, WindowId};

    use super::{BrowserEvent, EventSource, QueueEventSource};

    #[test]
    fn events_map_onto_intents() {
        let event = BrowserEvent::OriginToggleClicked {
            tab_id: 4,
            origin: "http://aaaa.com".to_owned(),
            allow: true,
        };

        assert_eq!(
            event.into_intent(),
            Intent::SetOriginScripts {
                tab_id: TabId(4),
                origin: "http://aaaa.com".to_owned(),
                allow: true,
            }
        );
    }

    #[test]
    fn tab_activation_refronts_the_window() {
        assert_eq!(
            BrowserEvent::TabActivated {
                window_id: 2,
                tab_id: 5,
            }
            .into_intent(),
            Intent::TabFronted {
                window_id: WindowId(2),
                tab_id: TabId(5),
            }
        );
    }

    #[test]
    fn reload_commits_the_page_decisions() {
        assert_eq!(
            BrowserEvent::PageReloaded { tab_id: 7 }.into_intent(),
            Intent::CommitScriptDecisions { tab_id: TabId(7) }
        );
    }

    #[test]
    fn queue_drains_in_arrival_order() {
        let mut source: QueueEventSource = [
            BrowserEvent::TabOpened {
                tab_id: 1,
                origin: "https://news.example".to_owned(),
            },
            BrowserEvent::WindowOpened {
                window_id: 1,
                tab_id: 1,
            },
        ]
        .into_iter()
        .collect();

        assert!(matches!(
            source.poll_event(),
            Ok(Some(BrowserEvent::TabOpened { tab_id: 1, .. }))
        ));
        assert!(matches!(
            source.poll_event(),
            Ok(Some(BrowserEvent::WindowOpened {
                window_id: 1,
                tab_id: 1,
            }))
        ));
        assert!(matches!(source.poll_event(), Ok(None)));
    }
}
