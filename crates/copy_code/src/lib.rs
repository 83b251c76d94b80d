//! # copy_code
//!
//! Attaches a copy-to-clipboard control to every code block in a document.
//!
//! - [`attach`] scans a scope, appends one control per `pre > code` block and
//!   returns a [`Teardown`] that removes exactly what it added
//! - [`Page`] hosts the document, dispatches clicks and drives the timers that
//!   revert each control to idle
//! - [`ScopeBinding`] ties an attachment to a scope's lifetime and re-attaches
//!   when options change
//!
//! ```no_run
//! use copy_code::{MemoryClipboard, Options, Page, attach};
//! use dom::{Document, build};
//! use std::time::Duration;
//!
//! let document = Document::from_node(&build::doc(vec![build::code_block("ls -la")]));
//! let clipboard = MemoryClipboard::new();
//! let mut page = Page::new(document, clipboard.clone());
//! let teardown = attach(&mut page, None, &Options::default());
//! if let Some(button) = teardown.buttons().next() {
//!     page.click(button);
//! }
//! assert_eq!(clipboard.last().as_deref(), Some("ls -la"));
//! page.advance(Duration::from_millis(2000));
//! teardown.run(&mut page);
//! ```

pub mod clipboard;
pub mod icons;
pub mod options;
pub mod styles;

mod binding;
mod control;
mod engine;
mod handler;
mod page;
mod state;

pub use crate::binding::ScopeBinding;
pub use crate::clipboard::{Clipboard, ClipboardError, FailingClipboard, MemoryClipboard};
#[cfg(feature = "system-clipboard")]
pub use crate::clipboard::SystemClipboard;
pub use crate::control::{ARIA_LABEL, FAILURE_MESSAGE, LINE_NUMBER_CLASS};
pub use crate::engine::{AttachedControl, Teardown, attach};
pub use crate::icons::{IconMount, IconRenderer, MarkupRenderer, Renderable};
pub use crate::options::{Options, OptionsError, Position};
pub use crate::page::Page;
pub use crate::state::CopyState;
pub use crate::styles::StyleNames;
