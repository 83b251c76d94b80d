//! Terse constructors for `Node` fixtures.

use crate::{Id, Node};
use std::sync::Arc;

pub fn doc(children: Vec<Node>) -> Node {
    Node::Document {
        id: Id::INVALID,
        doctype: None,
        children,
    }
}

pub fn elem(name: &str, attributes: Vec<(&str, &str)>, children: Vec<Node>) -> Node {
    Node::Element {
        id: Id::INVALID,
        name: Arc::from(name),
        attributes: attributes
            .into_iter()
            .map(|(k, v)| (Arc::from(k), Some(v.to_string())))
            .collect(),
        children,
    }
}

pub fn text(text: &str) -> Node {
    Node::Text {
        id: Id::INVALID,
        text: text.to_string(),
    }
}

/// `<pre><code>{source}</code></pre>`
pub fn code_block(source: &str) -> Node {
    elem("pre", vec![], vec![elem("code", vec![], vec![text(source)])])
}
