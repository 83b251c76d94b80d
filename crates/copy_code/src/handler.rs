//! Activation and the timed transitions that follow it.
//!
//! Overlapping activations cancel and restart: a newer settlement replaces the
//! content shown and reschedules the revert, and a newer highlight of the same
//! class on the same `pre` reschedules its removal. Tasks for controls that
//! have been torn down, or whose nodes are gone, do nothing.

use crate::clipboard::ClipboardError;
use crate::control::{block_text, render_failure, render_idle, render_success};
use crate::options::HIGHLIGHT_DURATION;
use crate::page::{Page, Task};
use dom::{Event, Id};

impl Page {
    pub(crate) fn activate(&mut self, button: Id, event: &mut Event) {
        event.prevent_default();
        event.stop_propagation();

        let Some(record) = self.controls.get(&button) else {
            log::trace!(target: "copy_code.activate", "{button:?} is no longer a control");
            return;
        };
        let text = block_text(
            &self.document,
            record.block,
            record.options.include_line_numbers,
        );
        log::debug!(target: "copy_code.activate", "{button:?}: writing {} bytes", text.len());
        let outcome = self.clipboard.write_text(&text);
        self.event_loop
            .queue_microtask(Task::Settle { button, outcome });
    }

    pub(crate) fn settle(&mut self, button: Id, outcome: Result<(), ClipboardError>) {
        let Some(record) = self.controls.get_mut(&button) else {
            log::trace!(target: "copy_code.activate", "settled after teardown of {button:?}");
            return;
        };
        if let Some(timer) = record.revert_timer.take() {
            self.event_loop.clear_timeout(timer);
        }
        record.state = record.state.settle(outcome.is_ok());

        let rendered = match &outcome {
            Ok(()) => render_success(&mut self.document, self.icons.as_mut(), record),
            Err(err) => {
                log::warn!(target: "copy_code.activate", "clipboard write for {button:?} failed: {err}");
                render_failure(&mut self.document, self.icons.as_mut(), record)
            }
        };
        if let Err(err) = rendered {
            log::trace!(target: "copy_code.activate", "render for {button:?}: {err}");
        }

        let timeout = record.options.copy_message_timeout;
        record.revert_timer = Some(self.event_loop.set_timeout(timeout, Task::Revert { button }));

        if outcome.is_ok() && record.options.highlight_on_copy {
            let pre = record.pre;
            let class = record.names.highlight.clone();
            self.highlight(pre, class);
        }
    }

    pub(crate) fn revert(&mut self, button: Id) {
        let Some(record) = self.controls.get_mut(&button) else {
            log::trace!(target: "copy_code.timers", "revert for forgotten {button:?}");
            return;
        };
        record.revert_timer = None;
        record.state = record.state.revert();
        if let Err(err) = render_idle(&mut self.document, self.icons.as_mut(), record, true) {
            log::trace!(target: "copy_code.timers", "revert for {button:?}: {err}");
        }
    }

    fn highlight(&mut self, pre: Id, class: String) {
        if let Err(err) = self.document.add_class(pre, &class) {
            log::trace!(target: "copy_code.activate", "highlight {pre:?}: {err}");
            return;
        }
        let key = (pre, class);
        if let Some(timer) = self.highlights.remove(&key) {
            self.event_loop.clear_timeout(timer);
        }
        let task = Task::ClearHighlight {
            pre,
            class: key.1.clone(),
        };
        let timer = self.event_loop.set_timeout(HIGHLIGHT_DURATION, task);
        self.highlights.insert(key, timer);
    }

    pub(crate) fn clear_highlight(&mut self, pre: Id, class: &str) {
        self.highlights.remove(&(pre, class.to_string()));
        if self.document.is_live(pre) {
            if let Err(err) = self.document.remove_class(pre, class) {
                log::trace!(target: "copy_code.timers", "clear highlight {pre:?}: {err}");
            }
        }
    }
}
