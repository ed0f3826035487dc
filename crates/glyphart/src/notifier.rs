//! In-process event bus
//!
//! Handlers are kept per event name. Publishing clones the matching handlers
//! out of the registry before calling them, so a handler may subscribe,
//! unsubscribe, or publish without deadlocking.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::Value;

use glyphart_core::traits::{EventHandler, Notifier, Subscription};

/// Subscribing to this name receives every event
pub const WILDCARD: &str = "*";

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HashMap<String, Vec<(u64, EventHandler)>>,
}

impl Registry {
    fn remove(&mut self, event: &str, id: u64) {
        if let Some(list) = self.handlers.get_mut(event) {
            list.retain(|(handler_id, _)| *handler_id != id);
            if list.is_empty() {
                self.handlers.remove(event);
            }
        }
    }
}

/// Synchronous publish/subscribe within one process
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<RwLock<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers registered under exactly this name
    pub fn handler_count(&self, event: &str) -> usize {
        self.registry.read().handlers.get(event).map_or(0, Vec::len)
    }
}

impl Notifier for EventBus {
    fn publish(&self, event: &str, payload: Value) {
        let handlers: Vec<EventHandler> = {
            let registry = self.registry.read();
            [event, WILDCARD]
                .iter()
                .filter_map(|name| registry.handlers.get(*name))
                .flatten()
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };

        log::trace!("Publishing {event} to {} handler(s)", handlers.len());
        for handler in handlers {
            handler(event, &payload);
        }
    }

    fn subscribe(&self, event: &str, handler: EventHandler) -> Subscription {
        let id = {
            let mut registry = self.registry.write();
            let id = registry.next_id;
            registry.next_id += 1;
            registry
                .handlers
                .entry(event.to_string())
                .or_default()
                .push((id, handler));
            id
        };

        let registry: Weak<RwLock<Registry>> = Arc::downgrade(&self.registry);
        let event = event.to_string();
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.write().remove(&event, id);
            }
        })
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("EventBus")
            .field("events", &registry.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
