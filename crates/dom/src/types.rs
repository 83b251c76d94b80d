use std::sync::Arc;

pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    /// Reserved sentinel for "unassigned" identity. Never handed out by a `Document`.
    pub const INVALID: Id = Id(0);
}

pub type Attribute = (Arc<str>, Option<String>);

/// Owned snapshot of a subtree.
///
/// `Node` is the exchange format between a [`Document`](crate::Document) and the
/// outside world: fixtures are written as `Node` trees and imported, and
/// [`Document::materialize`](crate::Document::materialize) turns live nodes back
/// into one for comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document {
        id: Id,
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: Arc<str>,
        attributes: Vec<Attribute>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Structural copy with every id reset to [`Id::INVALID`].
    ///
    /// Two documents built from the same fixture allocate different ids once one
    /// of them has been mutated, so tree comparisons go through this.
    pub fn without_ids(&self) -> Node {
        match self {
            Node::Document {
                doctype, children, ..
            } => Node::Document {
                id: Id::INVALID,
                doctype: doctype.clone(),
                children: children.iter().map(Node::without_ids).collect(),
            },
            Node::Element {
                name,
                attributes,
                children,
                ..
            } => Node::Element {
                id: Id::INVALID,
                name: Arc::clone(name),
                attributes: attributes.clone(),
                children: children.iter().map(Node::without_ids).collect(),
            },
            Node::Text { text, .. } => Node::Text {
                id: Id::INVALID,
                text: text.clone(),
            },
            Node::Comment { text, .. } => Node::Comment {
                id: Id::INVALID,
                text: text.clone(),
            },
        }
    }
}

pub(crate) enum NodeKind {
    Document { doctype: Option<String> },
    Element {
        name: Arc<str>,
        attributes: Vec<Attribute>,
    },
    Text { text: String },
    Comment { text: String },
}

pub(crate) struct NodeRecord {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<Id>,
    pub(crate) children: Vec<Id>,
}

impl NodeRecord {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn allows_children(&self) -> bool {
        matches!(self.kind, NodeKind::Document { .. } | NodeKind::Element { .. })
    }
}
