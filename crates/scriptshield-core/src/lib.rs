pub mod engine;
pub mod ids;
pub mod intent;
pub mod noscript;
pub mod patch;
pub mod reducer;
pub mod state;

pub use engine::{Engine, EngineError, NoopPersistence, Persistence};
pub use ids::{TabId, WindowId};
pub use intent::Intent;
pub use noscript::{
    block_all_label, block_script_label, every_interaction_matches, filter_by_will_block,
    group_scripts_by_origin, parse_origin, script_entries, scripts_for_origin,
};
pub use patch::{Patch, PatchOp, Snapshot};
pub use reducer::ReduceError;
pub use state::{LookupError, NoScriptInfo, ScriptEntry, ShieldsState, Tab};
