//! Clipboard write capability.
//!
//! The engine only ever needs one operation, `write_text`. Whether the write
//! succeeded is reported back through the page's microtask queue, so the
//! button's content changes after the dispatching task has finished, like a
//! resolved promise.

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

impl<F> Clipboard for F
where
    F: FnMut(&str) -> Result<(), ClipboardError>,
{
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self(text)
    }
}

/// Records every write. Clones share the same history.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    writes: Rc<RefCell<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Rejects every write, e.g. a denied permission.
#[derive(Clone, Debug)]
pub struct FailingClipboard {
    reason: String,
}

impl FailingClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Clipboard for FailingClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Rejected(self.reason.clone()))
    }
}

/// The operating system clipboard.
///
/// The `arboard` handle is opened on first use; on headless machines that
/// fails and every write reports [`ClipboardError::Unavailable`].
#[cfg(feature = "system-clipboard")]
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let ctx = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(format!("clipboard init: {e}")))?;
            self.inner = Some(ctx);
        }
        let Some(ctx) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("clipboard init".into()));
        };
        ctx.set_text(text.to_owned())
            .map_err(|e| ClipboardError::Rejected(format!("clipboard set: {e}")))
    }
}
