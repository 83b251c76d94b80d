//! Scanning a scope and attaching one control per code block.

use crate::control::{ControlRecord, build_control, has_control, render_idle};
use crate::options::Options;
use crate::page::Page;
use crate::state::CopyState;
use crate::styles::{StyleNames, ensure_stylesheet};
use dom::{DomError, Id, ListenerId};
use std::rc::Rc;

/// One control created by an [`attach`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachedControl {
    pub block: Id,
    pub pre: Id,
    pub container: Id,
    pub button: Id,
    listener: ListenerId,
}

/// Release capability for everything one [`attach`] call created.
///
/// Consumed by [`Teardown::run`], so it can only be run once.
#[must_use = "dropping a Teardown leaves its controls attached"]
#[derive(Debug)]
pub struct Teardown {
    attachment: u64,
    names: Rc<StyleNames>,
    controls: Vec<AttachedControl>,
}

impl Teardown {
    fn new(attachment: u64, names: Rc<StyleNames>) -> Self {
        Self {
            attachment,
            names,
            controls: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn controls(&self) -> &[AttachedControl] {
        &self.controls
    }

    /// Buttons in document order of their blocks.
    pub fn buttons(&self) -> impl Iterator<Item = Id> + '_ {
        self.controls.iter().map(|c| c.button)
    }

    /// Removes listeners, control nodes and icon renderings. Pending timers are
    /// left to fire; they find nothing to act on.
    pub fn run(self, page: &mut Page) {
        let mut removed = 0;
        for control in &self.controls {
            page.remove_listener(control.button, control.listener);
            if let Some(mut record) = page.controls.remove(&control.button) {
                if let Some(mount) = record.icon.take() {
                    page.icons.unmount(&mut page.document, mount);
                }
            }
            let doc = &mut page.document;
            let in_place = doc.parent(control.container) == Some(control.pre)
                && doc.has_class(control.container, &self.names.container_marker);
            if !in_place {
                log::trace!(target: "copy_code.attach", "control under {:?} already gone", control.pre);
                continue;
            }
            match doc.remove(control.container) {
                Ok(()) => removed += 1,
                Err(err) => log::trace!(target: "copy_code.attach", "remove {:?}: {err}", control.container),
            }
        }
        log::debug!(
            target: "copy_code.attach",
            "teardown #{}: removed {removed} of {} controls",
            self.attachment,
            self.controls.len()
        );
    }
}

/// Attaches a copy control to every eligible code block under `scope`, or under
/// the whole document when `scope` is `None`.
///
/// Nothing here fails: ineligible matches are skipped; options rejected by
/// [`Options::validate`] or a scope that is no longer in the document yield an
/// empty [`Teardown`].
pub fn attach(page: &mut Page, scope: Option<Id>, options: &Options) -> Teardown {
    let attachment = page.next_attachment();
    let names = Rc::new(options.style_names());
    let mut teardown = Teardown::new(attachment, Rc::clone(&names));

    let selector = match options
        .validate()
        .and_then(|()| options.parsed_selector())
    {
        Ok(selector) => selector,
        Err(err) => {
            log::warn!(target: "copy_code.attach", "attachment #{attachment}: {err}");
            return teardown;
        }
    };

    if let Err(err) = ensure_stylesheet(&mut page.document, &names) {
        log::warn!(target: "copy_code.styles", "stylesheet injection failed: {err}");
    }

    let root = match scope {
        None => page.document.root(),
        Some(scope) if page.document.is_live(scope) => scope,
        Some(scope) => {
            log::debug!(target: "copy_code.attach", "attachment #{attachment}: scope {scope:?} is gone");
            return teardown;
        }
    };

    let options = Rc::new(options.clone());
    let blocks = selector.query_all(&page.document, root);
    let matched = blocks.len();
    for block in blocks {
        match attach_one(page, block, &options, &names) {
            Ok(Some(control)) => teardown.controls.push(control),
            Ok(None) => {}
            Err(err) => log::trace!(target: "copy_code.attach", "skipping {block:?}: {err}"),
        }
    }
    log::debug!(
        target: "copy_code.attach",
        "attachment #{attachment}: `{}` matched {matched}, attached {}",
        selector,
        teardown.len()
    );
    teardown
}

fn attach_one(
    page: &mut Page,
    block: Id,
    options: &Rc<Options>,
    names: &Rc<StyleNames>,
) -> Result<Option<AttachedControl>, DomError> {
    let doc = &mut page.document;
    let Some(pre) = doc.parent(block).filter(|p| doc.is_element_named(*p, "pre")) else {
        log::trace!(target: "copy_code.attach", "{block:?} is not directly inside a pre");
        return Ok(None);
    };
    if has_control(doc, pre, names) {
        log::trace!(target: "copy_code.attach", "{pre:?} already has a control");
        return Ok(None);
    }

    css::set_inline_property(doc, pre, "position", "relative")?;
    let (container, button) = build_control(doc, names, options)?;
    let mut record = ControlRecord {
        block,
        pre,
        button,
        options: Rc::clone(options),
        names: Rc::clone(names),
        state: CopyState::Idle,
        revert_timer: None,
        icon: None,
    };
    render_idle(doc, page.icons.as_mut(), &mut record, false)?;
    doc.append_child(pre, container)?;

    let listener = page.add_copy_listener(button)?;
    page.controls.insert(button, record);
    Ok(Some(AttachedControl {
        block,
        pre,
        container,
        button,
        listener,
    }))
}
