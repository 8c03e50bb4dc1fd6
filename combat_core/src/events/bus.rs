//! CombatEventBus - Ordered, failure-isolated combat event dispatch

use super::event::{CombatEvent, EventKind};
use super::script::{EventSnapshot, ScriptHost};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Failure inside a native listener
#[derive(Error, Debug)]
#[error("Listener failed: {reason}")]
pub struct ListenerError {
    pub reason: String,
}

impl ListenerError {
    pub fn new(reason: impl Into<String>) -> Self {
        ListenerError {
            reason: reason.into(),
        }
    }
}

/// A native observer of combat events
///
/// Listeners receive the live event and may mutate its result fields
/// (final damage, cancelled flag). A returned error is logged and
/// skipped; it never aborts dispatch to the remaining listeners.
pub trait CombatListener: Send + Sync {
    fn on_event(&self, event: &mut CombatEvent) -> Result<(), ListenerError>;
}

impl<F> CombatListener for F
where
    F: Fn(&mut CombatEvent) -> Result<(), ListenerError> + Send + Sync,
{
    fn on_event(&self, event: &mut CombatEvent) -> Result<(), ListenerError> {
        self(event)
    }
}

/// Registers native and scripted observers per event kind and dispatches
/// combat events to them
///
/// Registration is append-only, order-preserving and duplicate-tolerant.
/// Dispatch per [`CombatEventBus::fire`] runs globals, then kind-specific
/// natives, then script hooks, each stage in registration order.
///
/// The registries sit behind short read/write locks; `fire` snapshots
/// the relevant lists and invokes with no lock held, so registration may
/// happen concurrently (e.g. a script hot-reload off the simulation
/// loop) and a listener may re-enter the bus. Nothing guards against
/// unbounded recursion; that responsibility stays with the caller.
#[derive(Default)]
pub struct CombatEventBus {
    listeners: RwLock<HashMap<EventKind, Vec<Arc<dyn CombatListener>>>>,
    global_listeners: RwLock<Vec<Arc<dyn CombatListener>>>,
    script_hooks: RwLock<HashMap<EventKind, Vec<String>>>,
    counts: RwLock<HashMap<EventKind, u64>>,
    script_host: RwLock<Option<Arc<dyn ScriptHost>>>,
}

impl CombatEventBus {
    pub fn new() -> Self {
        CombatEventBus::default()
    }

    /// Append a listener for one event kind
    pub fn register(&self, kind: EventKind, listener: impl CombatListener + 'static) {
        self.listeners
            .write()
            .entry(kind)
            .or_default()
            .push(Arc::new(listener));
    }

    /// Append a listener that observes every event kind
    pub fn register_global(&self, listener: impl CombatListener + 'static) {
        self.global_listeners.write().push(Arc::new(listener));
    }

    /// Append a named script hook for one event kind
    pub fn register_script_hook(&self, kind: EventKind, hook: impl Into<String>) {
        self.script_hooks
            .write()
            .entry(kind)
            .or_default()
            .push(hook.into());
    }

    /// Install the scripting collaborator hooks are invoked against
    pub fn set_script_host(&self, host: Arc<dyn ScriptHost>) {
        *self.script_host.write() = Some(host);
    }

    /// Dispatch one event through the full listener chain
    ///
    /// Order: global listeners, kind-specific native listeners, script
    /// hooks. Every invocation is isolated: a failure is logged and the
    /// chain continues. Cancellation is cooperative; the flag's final
    /// value after the whole chain has run is returned, and the caller
    /// decides whether to proceed.
    pub fn fire(&self, event: &mut CombatEvent) -> bool {
        let kind = event.kind();
        *self.counts.write().entry(kind).or_insert(0) += 1;

        // Snapshot under short read locks, invoke with no lock held
        let globals: Vec<Arc<dyn CombatListener>> = self.global_listeners.read().clone();
        let natives: Vec<Arc<dyn CombatListener>> = self
            .listeners
            .read()
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        for listener in globals.iter().chain(natives.iter()) {
            if let Err(err) = listener.on_event(event) {
                tracing::warn!(kind = ?kind, error = %err, "combat listener failed, continuing dispatch");
            }
        }

        let hooks: Vec<String> = self
            .script_hooks
            .read()
            .get(&kind)
            .cloned()
            .unwrap_or_default();
        if !hooks.is_empty() {
            let host = self.script_host.read().clone();
            match host {
                Some(host) => {
                    for hook in &hooks {
                        let mut snapshot = EventSnapshot::of(event);
                        match host.invoke(hook, &mut snapshot) {
                            Ok(()) => snapshot.apply_results(event),
                            Err(err) => {
                                tracing::warn!(hook = %hook, error = %err, "script hook failed, continuing dispatch");
                            }
                        }
                    }
                }
                None => {
                    tracing::debug!(kind = ?kind, "script hooks registered but no script host installed");
                }
            }
        }

        event.is_cancelled()
    }

    /// How many events have been fired per kind
    pub fn event_counts(&self) -> HashMap<EventKind, u64> {
        self.counts.read().clone()
    }

    /// Number of native listeners registered for one kind
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .read()
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Number of global listeners
    pub fn global_listener_count(&self) -> usize {
        self.global_listeners.read().len()
    }

    /// Number of script hooks registered for one kind
    pub fn hook_count(&self, kind: EventKind) -> usize {
        self.script_hooks
            .read()
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Drop every registration and counter (hot-reload support)
    pub fn clear(&self) {
        self.listeners.write().clear();
        self.global_listeners.write().clear();
        self.script_hooks.write().clear();
        self.counts.write().clear();
        *self.script_host.write() = None;
    }
}
