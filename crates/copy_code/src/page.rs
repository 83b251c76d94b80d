//! The page host: one document, its event loop and the capabilities the
//! engine needs (clipboard, icon renderer).
//!
//! Everything runs on the caller's thread. A click is one task: listeners along
//! the bubbling path run, then microtasks drain (clipboard settlement lands
//! there). Timers only fire when the host advances virtual time.

use crate::clipboard::{Clipboard, ClipboardError};
use crate::control::ControlRecord;
use crate::icons::{IconRenderer, MarkupRenderer};
use crate::state::CopyState;
use dom::{Document, DomError, Event, EventType, Id, ListenerId};
use runtime::{EventLoop, TimerId};
use std::collections::HashMap;
use std::time::Duration;

pub(crate) enum Task {
    Settle {
        button: Id,
        outcome: Result<(), ClipboardError>,
    },
    Revert {
        button: Id,
    },
    ClearHighlight {
        pre: Id,
        class: String,
    },
}

type Callback = Box<dyn FnMut(&mut Event)>;

enum Listener {
    Copy { button: Id },
    Callback(Callback),
}

pub struct Page {
    pub(crate) document: Document,
    pub(crate) event_loop: EventLoop<Task>,
    pub(crate) clipboard: Box<dyn Clipboard>,
    pub(crate) icons: Box<dyn IconRenderer>,
    /// Live controls keyed by their button.
    pub(crate) controls: HashMap<Id, ControlRecord>,
    /// Pending highlight removal per `pre` and highlight class.
    pub(crate) highlights: HashMap<(Id, String), TimerId>,
    listeners: HashMap<ListenerId, Listener>,
    next_attachment: u64,
}

impl Page {
    pub fn new(document: Document, clipboard: impl Clipboard + 'static) -> Self {
        Self {
            document,
            event_loop: EventLoop::new(),
            clipboard: Box::new(clipboard),
            icons: Box::new(MarkupRenderer::new()),
            controls: HashMap::new(),
            highlights: HashMap::new(),
            listeners: HashMap::new(),
            next_attachment: 0,
        }
    }

    pub fn with_icon_renderer(mut self, renderer: impl IconRenderer + 'static) -> Self {
        self.icons = Box::new(renderer);
        self
    }

    pub fn set_clipboard(&mut self, clipboard: impl Clipboard + 'static) {
        self.clipboard = Box::new(clipboard);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn icon_renderer(&self) -> &dyn IconRenderer {
        self.icons.as_ref()
    }

    pub fn now(&self) -> Duration {
        self.event_loop.now()
    }

    /// Registers a click listener that is not part of any control.
    pub fn add_listener(
        &mut self,
        node: Id,
        callback: impl FnMut(&mut Event) + 'static,
    ) -> Result<ListenerId, DomError> {
        let id = self.document.add_event_listener(node, EventType::Click)?;
        self.listeners.insert(id, Listener::Callback(Box::new(callback)));
        Ok(id)
    }

    pub fn remove_listener(&mut self, node: Id, listener: ListenerId) -> bool {
        self.listeners.remove(&listener);
        self.document.remove_event_listener(node, listener)
    }

    pub(crate) fn add_copy_listener(&mut self, button: Id) -> Result<ListenerId, DomError> {
        let id = self.document.add_event_listener(button, EventType::Click)?;
        self.listeners.insert(id, Listener::Copy { button });
        Ok(id)
    }

    pub(crate) fn next_attachment(&mut self) -> u64 {
        self.next_attachment += 1;
        self.next_attachment
    }

    /// Runs a click on `target` to completion, microtasks included, and
    /// returns the dispatched event.
    pub fn click(&mut self, target: Id) -> Event {
        let mut event = Event::new(EventType::Click, target);
        self.dispatch(&mut event);
        self.perform_microtasks();
        event
    }

    fn dispatch(&mut self, event: &mut Event) {
        let path = self.document.propagation_path(event.target(), event.kind());
        log::trace!(target: "copy_code.page", "dispatch {:?} to {:?}, {} hops", event.kind(), event.target(), path.len());
        for (node, listeners) in path {
            event.set_current_target(node);
            for listener in listeners {
                self.invoke(listener, event);
            }
            if event.propagation_stopped() {
                break;
            }
        }
    }

    fn invoke(&mut self, listener: ListenerId, event: &mut Event) {
        let button = match self.listeners.get_mut(&listener) {
            Some(Listener::Copy { button }) => *button,
            Some(Listener::Callback(callback)) => {
                callback(event);
                return;
            }
            // removed earlier in this dispatch
            None => return,
        };
        self.activate(button, event);
    }

    fn perform_microtasks(&mut self) {
        while let Some(task) = self.event_loop.pop_microtask() {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Settle { button, outcome } => self.settle(button, outcome),
            Task::Revert { button } => self.revert(button),
            Task::ClearHighlight { pre, class } => self.clear_highlight(pre, &class),
        }
    }

    /// Moves virtual time forward by `by`, firing every timer due on the way in
    /// due order. Microtasks drain after each timer.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.event_loop.now() + by;
        self.perform_microtasks();
        while let Some(task) = self.event_loop.next_due(deadline) {
            self.run_task(task);
            self.perform_microtasks();
        }
        self.event_loop.advance_to(deadline);
    }

    /// Fires timers until none are pending.
    pub fn run_until_idle(&mut self) {
        self.perform_microtasks();
        while let Some(deadline) = self.event_loop.next_deadline() {
            if let Some(task) = self.event_loop.next_due(deadline) {
                self.run_task(task);
            }
            self.perform_microtasks();
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.event_loop.pending_timers()
    }

    /// State of the control whose button is `button`, if it is still attached.
    pub fn control_state(&self, button: Id) -> Option<CopyState> {
        self.controls.get(&button).map(|record| record.state)
    }

    /// Number of attached controls across all attachments.
    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// Listeners registered through this page that have not been removed.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
