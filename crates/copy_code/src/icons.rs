//! Icon content and the capability that renders it.
//!
//! The engine treats caller-supplied icons as opaque [`Renderable`] values and
//! only ever passes them to an [`IconRenderer`]. The renderer decides what the
//! content is and how it turns into nodes; [`MarkupRenderer`] understands
//! `dom::Node` trees.

use dom::build::elem;
use dom::{Document, DomError, Id, Node};
use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Caller-owned icon content. Equality is identity.
#[derive(Clone)]
pub struct Renderable(Rc<dyn Any>);

impl Renderable {
    pub fn new<T: Any>(content: T) -> Self {
        Self(Rc::new(content))
    }

    pub fn markup(node: Node) -> Self {
        Self::new(node)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl PartialEq for Renderable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Renderable({:p})", Rc::as_ptr(&self.0))
    }
}

/// Handle to one mounted rendering, returned by [`IconRenderer::mount`].
#[derive(Debug, PartialEq, Eq)]
pub struct IconMount {
    id: u64,
    nodes: Vec<Id>,
}

impl IconMount {
    pub fn new(id: u64, nodes: Vec<Id>) -> Self {
        Self { id, nodes }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn nodes(&self) -> &[Id] {
        &self.nodes
    }
}

pub trait IconRenderer {
    /// Renders `content` as the last children of `target`.
    fn mount(
        &mut self,
        doc: &mut Document,
        target: Id,
        content: &Renderable,
    ) -> Result<IconMount, DomError>;

    /// Removes a rendering and releases what it holds. Nodes that are already
    /// gone are skipped.
    fn unmount(&mut self, doc: &mut Document, mount: IconMount);

    /// Renderings mounted and not yet unmounted.
    fn live_mounts(&self) -> usize;
}

/// Renders `dom::Node` content by importing it into the document.
///
/// Content of any other type renders as nothing.
#[derive(Debug, Default)]
pub struct MarkupRenderer {
    next: u64,
    live: HashSet<u64>,
}

impl MarkupRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IconRenderer for MarkupRenderer {
    fn mount(
        &mut self,
        doc: &mut Document,
        target: Id,
        content: &Renderable,
    ) -> Result<IconMount, DomError> {
        let nodes = match content.downcast_ref::<Node>() {
            Some(node) => vec![doc.append_tree(target, node)?],
            None => {
                log::debug!(target: "copy_code.icons", "unsupported icon content {content:?}");
                Vec::new()
            }
        };
        self.next += 1;
        self.live.insert(self.next);
        Ok(IconMount::new(self.next, nodes))
    }

    fn unmount(&mut self, doc: &mut Document, mount: IconMount) {
        for node in mount.nodes {
            if doc.is_live(node) {
                if let Err(err) = doc.remove(node) {
                    log::trace!(target: "copy_code.icons", "unmount {node:?}: {err}");
                }
            }
        }
        self.live.remove(&mount.id);
    }

    fn live_mounts(&self) -> usize {
        self.live.len()
    }
}

fn svg(stroke: &str, class: Option<&str>, children: Vec<Node>) -> Node {
    let mut attributes = vec![
        ("xmlns", "http://www.w3.org/2000/svg"),
        ("width", "16"),
        ("height", "16"),
        ("viewBox", "0 0 24 24"),
        ("fill", "none"),
        ("stroke", stroke),
        ("stroke-width", "2"),
        ("stroke-linecap", "round"),
        ("stroke-linejoin", "round"),
    ];
    if let Some(class) = class {
        attributes.push(("class", class));
    }
    elem("svg", attributes, children)
}

/// Two overlapping rounded squares.
pub fn default_copy_icon(class: Option<&str>) -> Node {
    svg(
        "currentColor",
        class,
        vec![
            elem(
                "rect",
                vec![("width", "14"), ("height", "14"), ("x", "8"), ("y", "8"), ("rx", "2"), ("ry", "2")],
                vec![],
            ),
            elem(
                "path",
                vec![("d", "M4 16c-1.1 0-2-.9-2-2V4c0-1.1.9-2 2-2h10c1.1 0 2 .9 2 2")],
                vec![],
            ),
        ],
    )
}

/// Green check mark.
pub fn default_success_icon() -> Node {
    svg("#10b981", None, vec![elem("path", vec![("d", "M20 6 9 17l-5-5")], vec![])])
}
