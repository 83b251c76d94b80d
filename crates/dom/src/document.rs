use crate::events::ListenerRegistry;
use crate::types::{Attribute, Id, Node, NodeKind, NodeRecord};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DomError {
    #[error("node {0:?} is not part of the document")]
    MissingNode(Id),
    #[error("node {0:?} has the wrong kind for this operation")]
    WrongNodeKind(Id),
    #[error("node {0:?} cannot be inserted here")]
    InvalidParent(Id),
    #[error("node {before:?} is not a child of {parent:?}")]
    InvalidSibling { parent: Id, before: Id },
    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    CycleDetected { parent: Id, child: Id },
}

/// Mutable document tree.
///
/// Nodes live in an arena and are addressed by [`Id`]. Ids are never reused, so a
/// stale id held by a timer or a teardown simply stops resolving once its node
/// has been removed; every query on such an id answers "nothing" instead of
/// failing.
pub struct Document {
    nodes: Vec<NodeRecord>,
    live: HashMap<Id, usize>,
    root: Id,
    next_id: u32,
    pub(crate) listeners: ListenerRegistry,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            live: HashMap::new(),
            root: Id::INVALID,
            next_id: 1,
            listeners: ListenerRegistry::default(),
        };
        doc.root = doc.insert_node(NodeKind::Document { doctype: None });
        doc
    }

    /// Builds a document from a `Node` tree.
    ///
    /// A `Node::Document` root becomes the document root; any other node is
    /// imported as its only child.
    pub fn from_node(node: &Node) -> Self {
        let mut doc = Self::new();
        match node {
            Node::Document {
                doctype, children, ..
            } => {
                if let Some(record) = doc.record_mut(doc.root) {
                    record.kind = NodeKind::Document {
                        doctype: doctype.clone(),
                    };
                }
                for child in children {
                    let root = doc.root;
                    // a fresh root always accepts element/text/comment children
                    if let Err(err) = doc.append_tree(root, child) {
                        log::error!(target: "dom", "import failed: {err}");
                    }
                }
            }
            other => {
                let root = doc.root;
                if let Err(err) = doc.append_tree(root, other) {
                    log::error!(target: "dom", "import failed: {err}");
                }
            }
        }
        doc
    }

    pub fn root(&self) -> Id {
        self.root
    }

    /// Number of nodes currently attached to the arena, root included.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.len() <= 1
    }

    pub fn is_live(&self, id: Id) -> bool {
        self.live.contains_key(&id)
    }

    pub fn create_element(&mut self, name: &str) -> Id {
        self.insert_node(NodeKind::Element {
            name: Arc::from(name.to_ascii_lowercase()),
            attributes: Vec::new(),
        })
    }

    pub fn create_element_with(&mut self, name: &str, attributes: Vec<Attribute>) -> Id {
        self.insert_node(NodeKind::Element {
            name: Arc::from(name.to_ascii_lowercase()),
            attributes,
        })
    }

    pub fn create_text(&mut self, text: &str) -> Id {
        self.insert_node(NodeKind::Text {
            text: text.to_string(),
        })
    }

    pub fn create_comment(&mut self, text: &str) -> Id {
        self.insert_node(NodeKind::Comment {
            text: text.to_string(),
        })
    }

    /// Imports `node` (and its subtree) as the last child of `parent`.
    pub fn append_tree(&mut self, parent: Id, node: &Node) -> Result<Id, DomError> {
        let id = match node {
            Node::Document { .. } => return Err(DomError::InvalidParent(node.id())),
            Node::Element {
                name,
                attributes,
                ..
            } => self.create_element_with(name, attributes.clone()),
            Node::Text { text, .. } => self.create_text(text),
            Node::Comment { text, .. } => self.create_comment(text),
        };
        self.append_child(parent, id)?;
        for child in node.children() {
            self.append_tree(id, child)?;
        }
        Ok(id)
    }

    pub fn append_child(&mut self, parent: Id, child: Id) -> Result<(), DomError> {
        self.check_insertion(parent, child)?;
        let parent_index = self.index_of(parent)?;
        let child_index = self.index_of(child)?;
        self.nodes[parent_index].children.push(child);
        self.nodes[child_index].parent = Some(parent);
        Ok(())
    }

    pub fn insert_before(&mut self, parent: Id, child: Id, before: Id) -> Result<(), DomError> {
        self.check_insertion(parent, child)?;
        let before_index = self.index_of(before)?;
        if self.nodes[before_index].parent != Some(parent) {
            return Err(DomError::InvalidSibling { parent, before });
        }
        let parent_index = self.index_of(parent)?;
        let child_index = self.index_of(child)?;
        let siblings = &mut self.nodes[parent_index].children;
        let pos = siblings
            .iter()
            .position(|k| *k == before)
            .ok_or(DomError::InvalidSibling { parent, before })?;
        siblings.insert(pos, child);
        self.nodes[child_index].parent = Some(parent);
        Ok(())
    }

    /// Detaches `id` from its parent and drops it, its subtree and every
    /// listener registered on them.
    pub fn remove(&mut self, id: Id) -> Result<(), DomError> {
        if id == self.root {
            return Err(DomError::InvalidParent(id));
        }
        let index = self.index_of(id)?;
        if let Some(parent) = self.nodes[index].parent.take() {
            if let Some(parent_index) = self.live.get(&parent).copied() {
                self.nodes[parent_index].children.retain(|k| *k != id);
            }
        }
        self.drop_subtree(id);
        Ok(())
    }

    /// Removes every child of `id`.
    pub fn clear_children(&mut self, id: Id) -> Result<(), DomError> {
        let index = self.index_of(id)?;
        let children = std::mem::take(&mut self.nodes[index].children);
        for child in children {
            if let Some(child_index) = self.live.get(&child).copied() {
                self.nodes[child_index].parent = None;
            }
            self.drop_subtree(child);
        }
        Ok(())
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.record(id).and_then(|r| r.parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.record(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    /// Lowercase element name, `None` for non-elements and removed nodes.
    pub fn element_name(&self, id: Id) -> Option<&str> {
        match &self.record(id)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, id: Id) -> bool {
        self.element_name(id).is_some()
    }

    pub fn is_element_named(&self, id: Id, want: &str) -> bool {
        self.element_name(id)
            .is_some_and(|name| name.eq_ignore_ascii_case(want))
    }

    pub fn attributes(&self, id: Id) -> &[Attribute] {
        match self.record(id).map(|r| &r.kind) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    pub fn attribute(&self, id: Id, key: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn has_attribute(&self, id: Id, key: &str) -> bool {
        self.attributes(id)
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    pub fn set_attribute(&mut self, id: Id, key: &str, value: &str) -> Result<(), DomError> {
        let attributes = self.attributes_mut(id)?;
        match attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some((_, v)) => *v = Some(value.to_string()),
            None => attributes.push((Arc::from(key.to_ascii_lowercase()), Some(value.to_string()))),
        }
        Ok(())
    }

    /// Returns whether the attribute was present.
    pub fn remove_attribute(&mut self, id: Id, key: &str) -> Result<bool, DomError> {
        let attributes = self.attributes_mut(id)?;
        let before = attributes.len();
        attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        Ok(attributes.len() != before)
    }

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    /// Adds `class` to the class list. Returns `false` if it was already there.
    pub fn add_class(&mut self, id: Id, class: &str) -> Result<bool, DomError> {
        let current = self.attribute(id, "class").unwrap_or("").to_string();
        if current.split_whitespace().any(|c| c == class) {
            self.attributes_mut(id)?;
            return Ok(false);
        }
        let next = if current.trim().is_empty() {
            class.to_string()
        } else {
            format!("{} {class}", current.trim_end())
        };
        self.set_attribute(id, "class", &next)?;
        Ok(true)
    }

    /// Removes `class` from the class list. Returns whether it was present.
    pub fn remove_class(&mut self, id: Id, class: &str) -> Result<bool, DomError> {
        let Some(current) = self.attribute(id, "class") else {
            self.attributes_mut(id)?;
            return Ok(false);
        };
        if !current.split_whitespace().any(|c| c == class) {
            return Ok(false);
        }
        let next = current
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if next.is_empty() {
            self.remove_attribute(id, "class")?;
        } else {
            self.set_attribute(id, "class", &next)?;
        }
        Ok(true)
    }

    /// Replaces the text of a text node.
    pub fn set_text(&mut self, id: Id, text: &str) -> Result<(), DomError> {
        let index = self.index_of(id)?;
        match &mut self.nodes[index].kind {
            NodeKind::Text { text: existing } => {
                existing.clear();
                existing.push_str(text);
                Ok(())
            }
            _ => Err(DomError::WrongNodeKind(id)),
        }
    }

    /// Text of a text or comment node.
    pub fn node_text(&self, id: Id) -> Option<&str> {
        match &self.record(id)?.kind {
            NodeKind::Text { text } | NodeKind::Comment { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self, id: Id) -> bool {
        matches!(self.record(id).map(|r| &r.kind), Some(NodeKind::Text { .. }))
    }

    /// Whether `id` is `ancestor` or lies inside its subtree.
    pub fn is_inclusive_descendant(&self, id: Id, ancestor: Id) -> bool {
        if !self.is_live(id) {
            return false;
        }
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// First element under `scope` (inclusive) whose `id` attribute equals `value`.
    pub fn element_by_id_attr(&self, scope: Id, value: &str) -> Option<Id> {
        if self.attribute(scope, "id") == Some(value) {
            return Some(scope);
        }
        self.descendants(scope)
            .find(|node| self.attribute(*node, "id") == Some(value))
    }

    /// The first `<head>` element, if the document has one.
    pub fn head(&self) -> Option<Id> {
        self.descendants(self.root)
            .find(|node| self.is_element_named(*node, "head"))
    }

    /// Returns the document's `<head>`, creating one when missing.
    ///
    /// A created head goes first inside `<html>` when there is one, otherwise
    /// first under the document root.
    pub fn ensure_head(&mut self) -> Result<Id, DomError> {
        if let Some(head) = self.head() {
            return Ok(head);
        }
        let parent = self
            .children(self.root)
            .iter()
            .copied()
            .find(|node| self.is_element_named(*node, "html"))
            .unwrap_or(self.root);
        let head = self.create_element("head");
        match self.children(parent).first().copied() {
            Some(first) => self.insert_before(parent, head, first)?,
            None => self.append_child(parent, head)?,
        }
        log::debug!(target: "dom", "created <head> {head:?} under {parent:?}");
        Ok(head)
    }

    pub fn materialize(&self, id: Id) -> Result<Node, DomError> {
        let record = self.record(id).ok_or(DomError::MissingNode(id))?;
        let children = record
            .children
            .iter()
            .map(|child| self.materialize(*child))
            .collect::<Result<Vec<_>, _>>()?;
        let node = match &record.kind {
            NodeKind::Document { doctype } => Node::Document {
                id,
                doctype: doctype.clone(),
                children,
            },
            NodeKind::Element { name, attributes } => Node::Element {
                id,
                name: Arc::clone(name),
                attributes: attributes.clone(),
                children,
            },
            NodeKind::Text { text } => Node::Text {
                id,
                text: text.clone(),
            },
            NodeKind::Comment { text } => Node::Comment {
                id,
                text: text.clone(),
            },
        };
        Ok(node)
    }

    pub(crate) fn record(&self, id: Id) -> Option<&NodeRecord> {
        self.live.get(&id).map(|index| &self.nodes[*index])
    }

    fn record_mut(&mut self, id: Id) -> Option<&mut NodeRecord> {
        let index = *self.live.get(&id)?;
        Some(&mut self.nodes[index])
    }

    fn index_of(&self, id: Id) -> Result<usize, DomError> {
        self.live.get(&id).copied().ok_or(DomError::MissingNode(id))
    }

    fn attributes_mut(&mut self, id: Id) -> Result<&mut Vec<Attribute>, DomError> {
        let index = self.index_of(id)?;
        match &mut self.nodes[index].kind {
            NodeKind::Element { attributes, .. } => Ok(attributes),
            _ => Err(DomError::WrongNodeKind(id)),
        }
    }

    fn insert_node(&mut self, kind: NodeKind) -> Id {
        let id = Id(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let index = self.nodes.len();
        self.nodes.push(NodeRecord::new(kind));
        self.live.insert(id, index);
        id
    }

    fn check_insertion(&self, parent: Id, child: Id) -> Result<(), DomError> {
        if parent == child || self.is_inclusive_descendant(parent, child) {
            return Err(DomError::CycleDetected { parent, child });
        }
        let parent_record = self.record(parent).ok_or(DomError::MissingNode(parent))?;
        if !parent_record.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        let child_record = self.record(child).ok_or(DomError::MissingNode(child))?;
        if child_record.parent.is_some() || matches!(child_record.kind, NodeKind::Document { .. }) {
            return Err(DomError::InvalidParent(child));
        }
        Ok(())
    }

    fn drop_subtree(&mut self, id: Id) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(index) = self.live.remove(&current) else {
                continue;
            };
            let record = &mut self.nodes[index];
            record.parent = None;
            stack.extend(record.children.drain(..));
            // Free the payload; the slot itself stays so indices remain valid.
            record.kind = NodeKind::Comment {
                text: String::new(),
            };
            self.listeners.forget_node(current);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
