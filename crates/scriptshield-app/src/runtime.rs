use thiserror::Error;

use scriptshield_core::{Engine, EngineError, LookupError, Persistence};

use crate::events::EventSource;
use crate::panel::{build_panel, PanelState, PanelView};

#[derive(Debug, Error)]
pub enum RuntimeError<SE, PE> {
    #[error("event source failed: {0}")]
    Source(SE),
    #[error("event was rejected: {0}")]
    Engine(EngineError<PE>),
}

pub struct AppRuntime<S: EventSource, P: Persistence> {
    engine: Engine<P>,
    source: S,
}

impl<S: EventSource, P: Persistence> AppRuntime<S, P> {
    pub fn new(engine: Engine<P>, source: S) -> Self {
        Self { engine, source }
    }

    pub fn engine(&self) -> &Engine<P> {
        &self.engine
    }

    pub fn current_panel(&self, panel: &PanelState) -> Result<PanelView, LookupError> {
        Ok(build_panel(self.engine.state().noscript_info()?, panel))
    }

    // Drains the source; an exhausted source is the clean exit.
    pub fn run(&mut self) -> Result<(), RuntimeError<S::Error, P::Error>> {
        loop {
            let event = match self.source.poll_event().map_err(RuntimeError::Source)? {
                Some(event) => event,
                None => return Ok(()),
            };
            tracing::debug!(?event, "browser event received");
            let patch = self
                .engine
                .dispatch(event.into_intent())
                .map_err(RuntimeError::Engine)?;
            if !patch.ops.is_empty() {
                tracing::info!(
                    revision = patch.to_revision,
                    op_count = patch.ops.len(),
                    "shields state advanced"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scriptshield_core::{
        Engine, EngineError, LookupError, NoopPersistence, ReduceError, TabId,
    };

    use super::{AppRuntime, RuntimeError};
    use crate::events::{BrowserEvent, QueueEventSource};
    use crate::panel::PanelState;

    fn seeded_feed() -> QueueEventSource {
        [
            BrowserEvent::TabOpened {
                tab_id: 1,
                origin: "https://news.example".to_owned(),
            },
            BrowserEvent::WindowOpened {
                window_id: 1,
                tab_id: 1,
            },
            BrowserEvent::ScriptBlocked {
                tab_id: 1,
                url: "http://aaaa.com/script1.js".to_owned(),
            },
            BrowserEvent::ScriptBlocked {
                tab_id: 1,
                url: "http://bbbb.com/script1.js".to_owned(),
            },
            BrowserEvent::ScriptToggleClicked {
                tab_id: 1,
                url: "http://aaaa.com/script1.js".to_owned(),
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn run_drains_the_feed_and_advances_the_engine() {
        let mut runtime = AppRuntime::new(Engine::new(NoopPersistence), seeded_feed());

        runtime.run().expect("feed should apply cleanly");

        assert_eq!(runtime.engine().revision(), 5);
        let info = &runtime.engine().state().tabs[&TabId(1)].noscript_info;
        assert_eq!(info.len(), 2);
        assert!(!info["http://aaaa.com/script1.js"].actually_blocked);
        assert!(info["http://bbbb.com/script1.js"].actually_blocked);
    }

    #[test]
    fn panel_reflects_the_drained_state() {
        let mut runtime = AppRuntime::new(Engine::new(NoopPersistence), seeded_feed());
        runtime.run().expect("feed should apply cleanly");

        let view = runtime
            .current_panel(&PanelState::default())
            .expect("window and tab are tracked");

        assert_eq!(view.blocked.len(), 2);
        assert_eq!(view.blocked[0].rows[0].toggle_label, "Allowed once");
        assert_eq!(view.blocked[1].rows[0].toggle_label, "Allow");
    }

    #[test]
    fn panel_fails_fast_with_no_focused_window() {
        let runtime = AppRuntime::new(Engine::new(NoopPersistence), QueueEventSource::new());

        assert_eq!(
            runtime.current_panel(&PanelState::default()),
            Err(LookupError::NoFocusedWindow)
        );
    }

    #[test]
    fn a_rejected_event_stops_the_run() {
        let feed: QueueEventSource = [BrowserEvent::ScriptToggleClicked {
            tab_id: 42,
            url: "http://aaaa.com/script1.js".to_owned(),
        }]
        .into_iter()
        .collect();
        let mut runtime = AppRuntime::new(Engine::new(NoopPersistence), feed);

        let result = runtime.run();

        assert!(matches!(
            result,
            Err(RuntimeError::Engine(EngineError::Reduce(
                ReduceError::TabNotFound(TabId(42))
            )))
        ));
    }
}
