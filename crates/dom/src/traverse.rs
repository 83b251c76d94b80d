use crate::{Document, Id};

/// Pre-order walk over the subtree below a node, excluding the node itself.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<Id>,
}

impl Iterator for Descendants<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let next = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(next).iter().rev().copied());
        Some(next)
    }
}

/// Walk from a node's parent up to the document root.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<Id>,
}

impl Iterator for Ancestors<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

impl Document {
    /// Descendants of `id` in document order.
    pub fn descendants(&self, id: Id) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    pub fn ancestors(&self, id: Id) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// Concatenated text of every text node below `id`, in document order.
    pub fn text_content(&self, id: Id) -> String {
        self.text_content_where(id, |_, _| true)
    }

    /// Like [`Document::text_content`], but subtrees rooted at elements for which
    /// `keep` returns `false` are skipped entirely.
    pub fn text_content_where(&self, id: Id, keep: impl Fn(&Document, Id) -> bool) -> String {
        let mut out = String::new();
        if let Some(text) = self.node_text(id).filter(|_| self.is_text(id)) {
            out.push_str(text);
            return out;
        }
        let mut stack: Vec<Id> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.is_element(node) && !keep(self, node) {
                continue;
            }
            if self.is_text(node) {
                if let Some(text) = self.node_text(node) {
                    out.push_str(text);
                }
                continue;
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }
}
