#![allow(dead_code)]

use copy_code::{Clipboard, MemoryClipboard, Page};
use dom::build::{doc, elem};
use dom::{Document, Id, Node};
use std::time::Duration;

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// `<html><head></head><body>{content}</body></html>`
pub fn page_doc(content: Vec<Node>) -> Node {
    doc(vec![elem(
        "html",
        vec![],
        vec![elem("head", vec![], vec![]), elem("body", vec![], content)],
    )])
}

pub fn page_with(content: Vec<Node>, clipboard: impl Clipboard + 'static) -> Page {
    Page::new(Document::from_node(&page_doc(content)), clipboard)
}

/// Page with an in-memory clipboard; the returned handle observes its writes.
pub fn memory_page(content: Vec<Node>) -> (Page, MemoryClipboard) {
    let clipboard = MemoryClipboard::new();
    (page_with(content, clipboard.clone()), clipboard)
}

pub fn body(page: &Page) -> Id {
    find(page.document(), |doc, id| doc.is_element_named(id, "body"))
        .expect("fixture has a body")
}

pub fn find(doc: &Document, pred: impl Fn(&Document, Id) -> bool) -> Option<Id> {
    doc.descendants(doc.root()).find(|id| pred(doc, *id))
}

pub fn all(doc: &Document, pred: impl Fn(&Document, Id) -> bool) -> Vec<Id> {
    doc.descendants(doc.root()).filter(|id| pred(doc, *id)).collect()
}

pub fn with_class(doc: &Document, class: &str) -> Vec<Id> {
    all(doc, |d, id| d.has_class(id, class))
}

pub fn pres(doc: &Document) -> Vec<Id> {
    all(doc, |d, id| d.is_element_named(id, "pre"))
}

/// Snapshot of `id` with the inline style dropped from every `pre`.
pub fn snapshot_without_pre_style(doc: &Document, id: Id) -> Node {
    fn strip(node: &Node) -> Node {
        match node {
            Node::Element {
                id,
                name,
                attributes,
                children,
            } => Node::Element {
                id: *id,
                name: name.clone(),
                attributes: attributes
                    .iter()
                    .filter(|(k, _)| !(name.as_ref() == "pre" && k.as_ref() == "style"))
                    .cloned()
                    .collect(),
                children: children.iter().map(strip).collect(),
            },
            other => other.clone(),
        }
    }
    strip(&doc.materialize(id).expect("live node").without_ids())
}

pub fn success_content(page: &Page, button: Id) -> Option<Id> {
    let doc = page.document();
    doc.descendants(button)
        .find(|id| doc.has_class(*id, "copy-code-success-element"))
}

pub fn shows_copy_icon(page: &Page, button: Id) -> bool {
    let doc = page.document();
    doc.children(button)
        .iter()
        .any(|id| doc.is_element_named(*id, "svg"))
}
