//! Listener bookkeeping.
//!
//! The document only records *which* listeners exist on which node; the
//! callbacks themselves belong to the host that registered them and are looked
//! up by [`ListenerId`]. Dispatch order follows the bubbling phase: the target's
//! listeners first, then each ancestor's, up to the document root.

use crate::{Document, DomError, Id};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
}

/// A dispatched event as seen by listeners.
#[derive(Debug)]
pub struct Event {
    kind: EventType,
    target: Id,
    current_target: Id,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(kind: EventType, target: Id) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn current_target(&self) -> Id {
        self.current_target
    }

    pub fn set_current_target(&mut self, node: Id) {
        self.current_target = node;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Listeners on the current node still run; ancestors are skipped.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next: u64,
    by_node: HashMap<Id, Vec<(EventType, ListenerId)>>,
}

impl ListenerRegistry {
    pub(crate) fn forget_node(&mut self, node: Id) {
        self.by_node.remove(&node);
    }
}

impl Document {
    pub fn add_event_listener(&mut self, node: Id, kind: EventType) -> Result<ListenerId, DomError> {
        if !self.is_live(node) {
            return Err(DomError::MissingNode(node));
        }
        self.listeners.next += 1;
        let id = ListenerId(self.listeners.next);
        self.listeners
            .by_node
            .entry(node)
            .or_default()
            .push((kind, id));
        Ok(id)
    }

    /// Returns whether the listener was registered on `node`.
    pub fn remove_event_listener(&mut self, node: Id, listener: ListenerId) -> bool {
        let Some(list) = self.listeners.by_node.get_mut(&node) else {
            return false;
        };
        let before = list.len();
        list.retain(|(_, id)| *id != listener);
        let removed = list.len() != before;
        if list.is_empty() {
            self.listeners.by_node.remove(&node);
        }
        removed
    }

    pub fn listener_count(&self, node: Id) -> usize {
        self.listeners.by_node.get(&node).map_or(0, Vec::len)
    }

    /// Total listeners registered anywhere in the document.
    pub fn total_listener_count(&self) -> usize {
        self.listeners.by_node.values().map(Vec::len).sum()
    }

    /// Listeners an event of `kind` fired at `target` would reach, grouped per
    /// node in bubbling order. Nodes without matching listeners are omitted.
    pub fn propagation_path(&self, target: Id, kind: EventType) -> Vec<(Id, Vec<ListenerId>)> {
        if !self.is_live(target) {
            return Vec::new();
        }
        std::iter::once(target)
            .chain(self.ancestors(target))
            .filter_map(|node| {
                let ids: Vec<_> = self
                    .listeners
                    .by_node
                    .get(&node)?
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, id)| *id)
                    .collect();
                (!ids.is_empty()).then_some((node, ids))
            })
            .collect()
    }
}
