//! # dom
//!
//! Mutable, arena-backed document tree used as the rendering surface for code
//! block augmentation.
//!
//! - [`Document`]: node storage, structure mutation, attributes and class lists
//! - [`Node`]: owned snapshot format, used for fixtures and comparisons
//! - listener bookkeeping and bubbling paths (see [`events`])

pub mod build;
pub mod debug;
pub mod events;

mod document;
mod traverse;
mod types;

pub use crate::document::{Document, DomError};
pub use crate::events::{Event, EventType, ListenerId};
pub use crate::traverse::{Ancestors, Descendants};
pub use crate::types::{Attribute, Id, Node, NodeId};
