//! Scope lifetime: mount, re-attach on change, unmount.

use crate::engine::{Teardown, attach};
use crate::options::Options;
use crate::page::Page;
use dom::{DomError, Id, Node};

/// Owns one scope's attachment and keeps it in step with its options.
#[derive(Debug)]
pub struct ScopeBinding {
    scope: Option<Id>,
    options: Options,
    teardown: Option<Teardown>,
    /// Wrapper element created by [`ScopeBinding::wrap`], removed on unmount.
    wrapper: Option<Id>,
}

impl ScopeBinding {
    /// Attaches to `scope` (or the whole document) right away.
    pub fn mount(page: &mut Page, scope: Option<Id>, options: Options) -> Self {
        let teardown = attach(page, scope, &options);
        Self {
            scope,
            options,
            teardown: Some(teardown),
            wrapper: None,
        }
    }

    /// Creates a `<div class="{prefix}-wrapper {class_name}">` under `parent`
    /// holding `content`, and binds to it.
    pub fn wrap(
        page: &mut Page,
        parent: Id,
        class_name: Option<&str>,
        content: &[Node],
        options: Options,
    ) -> Result<Self, DomError> {
        let base = options.style_names().wrapper;
        let class = match class_name {
            Some(extra) if !extra.trim().is_empty() => format!("{base} {}", extra.trim()),
            _ => base,
        };
        let doc = page.document_mut();
        let wrapper = doc.create_element("div");
        doc.set_attribute(wrapper, "class", &class)?;
        for node in content {
            doc.append_tree(wrapper, node)?;
        }
        doc.append_child(parent, wrapper)?;

        let mut binding = Self::mount(page, Some(wrapper), options);
        binding.wrapper = Some(wrapper);
        Ok(binding)
    }

    pub fn scope(&self) -> Option<Id> {
        self.scope
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The live attachment.
    pub fn attachment(&self) -> Option<&Teardown> {
        self.teardown.as_ref()
    }

    /// Replaces the options. Re-attaches only when they differ from the
    /// current ones; returns whether it did.
    pub fn update(&mut self, page: &mut Page, options: Options) -> bool {
        if options == self.options {
            return false;
        }
        self.options = options;
        self.reattach(page);
        true
    }

    /// Points the binding at another scope.
    pub fn set_scope(&mut self, page: &mut Page, scope: Option<Id>) -> bool {
        if scope == self.scope {
            return false;
        }
        self.scope = scope;
        self.reattach(page);
        true
    }

    /// Tears down and scans again, e.g. after the scope's content changed.
    pub fn rescan(&mut self, page: &mut Page) {
        self.reattach(page);
    }

    pub fn unmount(mut self, page: &mut Page) {
        if let Some(teardown) = self.teardown.take() {
            teardown.run(page);
        }
        if let Some(wrapper) = self.wrapper.take() {
            if page.document().is_live(wrapper) {
                if let Err(err) = page.document_mut().remove(wrapper) {
                    log::trace!(target: "copy_code.binding", "remove wrapper {wrapper:?}: {err}");
                }
            }
        }
    }

    fn reattach(&mut self, page: &mut Page) {
        if let Some(teardown) = self.teardown.take() {
            teardown.run(page);
        }
        log::debug!(target: "copy_code.binding", "re-attaching {:?}", self.scope);
        self.teardown = Some(attach(page, self.scope, &self.options));
    }
}
