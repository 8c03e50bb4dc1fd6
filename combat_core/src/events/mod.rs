//! Combat event dispatch - native listeners and script hooks

mod bus;
mod event;
mod script;

pub use bus::{CombatEventBus, CombatListener, ListenerError};
pub use event::{CombatContext, CombatEvent, DamageInfo, EventKind, EventPayload, StatusInfo};
pub use script::{EventSnapshot, NullScriptHost, ScriptError, ScriptHost};
