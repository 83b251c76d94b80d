//! The control subtree and the content shown in each state.
//!
//! ```text
//! <pre style="position: relative;">
//!   <code>…</code>
//!   <div class="{container} {position} {container marker}">
//!     <button class="{button} {button marker}" aria-label="Copy code">
//!       idle:    copy icon
//!       copied:  <div class="{success} {success marker} {flex} {fade-in}"><div>{message}</div>{check icon}</div>
//!       failed:  <div class="{fade-in} {error}" style="color: #ef4444;">Failed to copy!</div>
//! ```

use crate::icons::{IconMount, IconRenderer, default_copy_icon, default_success_icon};
use crate::options::Options;
use crate::state::CopyState;
use crate::styles::StyleNames;
use dom::{Document, DomError, Id};
use runtime::TimerId;
use std::rc::Rc;

pub const ARIA_LABEL: &str = "Copy code";
pub const FAILURE_MESSAGE: &str = "Failed to copy!";
pub const LINE_NUMBER_CLASS: &str = "line-number";

/// Everything the page keeps about one live control.
pub(crate) struct ControlRecord {
    pub(crate) block: Id,
    pub(crate) pre: Id,
    pub(crate) button: Id,
    pub(crate) options: Rc<Options>,
    pub(crate) names: Rc<StyleNames>,
    pub(crate) state: CopyState,
    pub(crate) revert_timer: Option<TimerId>,
    /// Custom icon currently rendered inside the button.
    pub(crate) icon: Option<IconMount>,
}

/// Builds a detached container + button pair.
pub(crate) fn build_control(
    doc: &mut Document,
    names: &StyleNames,
    options: &Options,
) -> Result<(Id, Id), DomError> {
    let container = doc.create_element("div");
    doc.set_attribute(
        container,
        "class",
        &format!(
            "{} {} {}",
            options.container_class(),
            names.position(options.position),
            names.container_marker
        ),
    )?;
    let button = doc.create_element("button");
    doc.set_attribute(
        button,
        "class",
        &format!("{} {}", options.button_class(), names.button_marker),
    )?;
    doc.set_attribute(button, "aria-label", ARIA_LABEL)?;
    doc.append_child(container, button)?;
    Ok((container, button))
}

/// Whether `pre` already holds a control under this naming scheme.
pub(crate) fn has_control(doc: &Document, pre: Id, names: &StyleNames) -> bool {
    doc.descendants(pre).any(|node| {
        doc.has_class(node, &names.container_marker) || doc.has_class(node, &names.button_marker)
    })
}

/// Text to put on the clipboard, read at activation time.
pub(crate) fn block_text(doc: &Document, block: Id, include_line_numbers: bool) -> String {
    if include_line_numbers {
        doc.text_content(block)
    } else {
        doc.text_content_where(block, |d, node| !d.has_class(node, LINE_NUMBER_CLASS))
    }
}

fn reset_button(
    doc: &mut Document,
    icons: &mut dyn IconRenderer,
    record: &mut ControlRecord,
) -> Result<(), DomError> {
    if let Some(mount) = record.icon.take() {
        icons.unmount(doc, mount);
    }
    doc.clear_children(record.button)
}

/// `restored` marks a return from a result state; the default icon then fades in.
pub(crate) fn render_idle(
    doc: &mut Document,
    icons: &mut dyn IconRenderer,
    record: &mut ControlRecord,
    restored: bool,
) -> Result<(), DomError> {
    reset_button(doc, icons, record)?;
    let options = Rc::clone(&record.options);
    match &options.custom_copy_icon {
        Some(icon) => record.icon = Some(icons.mount(doc, record.button, icon)?),
        None => {
            let class = restored.then_some(record.names.fade_in.as_str());
            doc.append_tree(record.button, &default_copy_icon(class))?;
        }
    }
    Ok(())
}

pub(crate) fn render_success(
    doc: &mut Document,
    icons: &mut dyn IconRenderer,
    record: &mut ControlRecord,
) -> Result<(), DomError> {
    reset_button(doc, icons, record)?;
    let options = Rc::clone(&record.options);
    let names = Rc::clone(&record.names);

    let content = doc.create_element("div");
    doc.set_attribute(
        content,
        "class",
        &format!(
            "{} {} {} {}",
            options.success_class(),
            names.success_marker,
            names.flex,
            names.fade_in
        ),
    )?;
    if !options.copy_message.is_empty() {
        let message = doc.create_element("div");
        let text = doc.create_text(&options.copy_message);
        doc.append_child(message, text)?;
        doc.append_child(content, message)?;
    }
    doc.append_child(record.button, content)?;

    match &options.custom_success_icon {
        Some(icon) => record.icon = Some(icons.mount(doc, content, icon)?),
        None => {
            doc.append_tree(content, &default_success_icon())?;
        }
    }
    Ok(())
}

pub(crate) fn render_failure(
    doc: &mut Document,
    icons: &mut dyn IconRenderer,
    record: &mut ControlRecord,
) -> Result<(), DomError> {
    reset_button(doc, icons, record)?;
    let content = doc.create_element("div");
    doc.set_attribute(
        content,
        "class",
        &format!("{} {}", record.names.fade_in, record.names.error),
    )?;
    doc.set_attribute(content, "style", "color: #ef4444;")?;
    let text = doc.create_text(FAILURE_MESSAGE);
    doc.append_child(content, text)?;
    doc.append_child(record.button, content)
}
