mod events;
mod panel;
mod persistence;
mod runtime;

use scriptshield_core::Engine;

use events::{BrowserEvent, QueueEventSource};
use panel::PanelState;
use persistence::JsonPersistence;
use runtime::AppRuntime;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(message) = run() {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let persistence = JsonPersistence::open_default()
        .map_err(|error| format!("scriptshield-app: persistence unavailable\n  {error}"))?;
    tracing::info!(path = %persistence.path().display(), "state snapshot location");
    let state = persistence
        .load_state()
        .map_err(|error| format!("scriptshield-app: snapshot could not be restored\n  {error}"))?;

    let restored = state.is_some();
    let feed = if restored {
        QueueEventSource::new()
    } else {
        demo_feed()
    };

    let engine = Engine::with_state(persistence, state.unwrap_or_default(), 0);
    let mut runtime = AppRuntime::new(engine, feed);
    runtime
        .run()
        .map_err(|error| format!("scriptshield-app: event loop failed\n  {error}"))?;

    let panel = runtime
        .current_panel(&PanelState::default())
        .map_err(|error| format!("scriptshield-app: no shields panel to show\n  {error}"))?;

    println!(
        "scriptshield {} revision={} tabs={} windows={} blocked_groups={} allowed_groups={}",
        if restored { "restored" } else { "seeded" },
        runtime.engine().revision(),
        runtime.engine().state().tabs.len(),
        runtime.engine().state().windows.len(),
        panel.blocked.len(),
        panel.allowed.len()
    );
    Ok(())
}

// A replay of one short browsing session, enough to light up every part
// of the model: two windows, per-script and per-origin toggles, a reload
// commit, and a tab teardown.
fn demo_feed() -> QueueEventSource {
    [
        BrowserEvent::TabOpened {
            tab_id: 1,
            origin: "https://news.example".to_owned(),
        },
        BrowserEvent::WindowOpened {
            window_id: 1,
            tab_id: 1,
        },
        BrowserEvent::TabOpened {
            tab_id: 2,
            origin: "https://mail.example".to_owned(),
        },
        BrowserEvent::WindowOpened {
            window_id: 2,
            tab_id: 2,
        },
        BrowserEvent::ScriptBlocked {
            tab_id: 1,
            url: "http://aaaa.com/script1.js".to_owned(),
        },
        BrowserEvent::ScriptBlocked {
            tab_id: 1,
            url: "http://aaaa.com/script2.js".to_owned(),
        },
        BrowserEvent::ScriptBlocked {
            tab_id: 1,
            url: "http://bbbb.com/script1.js".to_owned(),
        },
        BrowserEvent::ScriptToggleClicked {
            tab_id: 1,
            url: "http://bbbb.com/script1.js".to_owned(),
        },
        BrowserEvent::OriginToggleClicked {
            tab_id: 1,
            origin: "http://aaaa.com".to_owned(),
            allow: true,
        },
        BrowserEvent::WindowFocused { window_id: 2 },
        BrowserEvent::TabActivated {
            window_id: 2,
            tab_id: 2,
        },
        BrowserEvent::ScriptBlocked {
            tab_id: 2,
            url: "http://cccc.com/ad.js".to_owned(),
        },
        BrowserEvent::AllScriptsToggleClicked {
            tab_id: 2,
            allow: false,
        },
        BrowserEvent::PageReloaded { tab_id: 2 },
        BrowserEvent::TabNavigated {
            tab_id: 2,
            origin: "https://docs.example".to_owned(),
        },
        BrowserEvent::WindowClosed { window_id: 2 },
        BrowserEvent::TabClosed { tab_id: 2 },
    ]
    .into_iter()
    .collect()
}
