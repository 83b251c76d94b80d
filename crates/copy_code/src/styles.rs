//! Style hooks and the shared stylesheet.
//!
//! Every identifier the engine writes into the document derives from one class
//! prefix. The `*-element` markers are always present on the nodes they tag,
//! whatever extra classes a caller configures; idempotency checks and teardown
//! rely on them.
//!
//! The stylesheet text for a prefix is rendered once per process and cached in
//! a registry. Each document receives it at most once, as a `<style>` element in
//! its head carrying the reserved id; it is never removed, since other scopes on
//! the same document may still depend on it.

use dom::{Document, DomError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::options::Position;

pub const DEFAULT_PREFIX: &str = "copy-code";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleNames {
    pub prefix: String,
    pub style_element_id: String,
    pub wrapper: String,
    pub container: String,
    pub container_marker: String,
    pub button: String,
    pub button_marker: String,
    pub success: String,
    pub success_marker: String,
    pub highlight: String,
    pub fade_in: String,
    pub flex: String,
    pub error: String,
}

impl StyleNames {
    pub fn new(prefix: &str) -> Self {
        let name = |suffix: &str| format!("{prefix}-{suffix}");
        Self {
            prefix: prefix.to_string(),
            style_element_id: name("styles"),
            wrapper: name("wrapper"),
            container: name("button-container"),
            container_marker: name("button-container-element"),
            button: name("button"),
            button_marker: name("button-element"),
            success: name("success"),
            success_marker: name("success-element"),
            highlight: name("highlight"),
            fade_in: name("fade-in"),
            flex: name("flex"),
            error: name("error"),
        }
    }

    pub fn position(&self, position: Position) -> String {
        format!("{}-position-{}", self.prefix, position.code())
    }
}

impl Default for StyleNames {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

static STYLESHEETS: Lazy<Mutex<HashMap<String, Arc<str>>>> = Lazy::new(Default::default);

/// Cached stylesheet text for `names.prefix`, rendered on first request.
pub fn stylesheet_for(names: &StyleNames) -> Arc<str> {
    let mut registry = STYLESHEETS.lock().unwrap_or_else(PoisonError::into_inner);
    let sheet = registry
        .entry(names.prefix.clone())
        .or_insert_with(|| {
            log::debug!(target: "copy_code.styles", "rendering stylesheet for `{}`", names.prefix);
            Arc::from(render_stylesheet(names))
        });
    Arc::clone(sheet)
}

/// Prefixes whose stylesheet has been rendered in this process.
pub fn registered_prefixes() -> Vec<String> {
    let registry = STYLESHEETS.lock().unwrap_or_else(PoisonError::into_inner);
    let mut prefixes: Vec<_> = registry.keys().cloned().collect();
    prefixes.sort();
    prefixes
}

/// Injects the stylesheet into the document head unless an element with the
/// reserved id is already there. Returns whether anything was inserted.
pub fn ensure_stylesheet(doc: &mut Document, names: &StyleNames) -> Result<bool, DomError> {
    let head = doc.ensure_head()?;
    if doc.element_by_id_attr(head, &names.style_element_id).is_some() {
        return Ok(false);
    }
    let css = stylesheet_for(names);
    let style = doc.create_element("style");
    doc.set_attribute(style, "id", &names.style_element_id)?;
    let text = doc.create_text(&css);
    doc.append_child(style, text)?;
    doc.append_child(head, style)?;
    log::debug!(target: "copy_code.styles", "injected #{} into {head:?}", names.style_element_id);
    Ok(true)
}

fn render_stylesheet(n: &StyleNames) -> String {
    let p = &n.prefix;
    format!(
        r#"
.{wrapper} pre {{ position: relative; }}
.{container} {{ position: absolute; z-index: 100; pointer-events: auto; }}
.{p}-position-tr {{ top: 8px; right: 8px; }}
.{p}-position-tl {{ top: 8px; left: 8px; }}
.{p}-position-br {{ bottom: 8px; right: 8px; }}
.{p}-position-bl {{ bottom: 8px; left: 8px; }}
.{button} {{ display: flex; align-items: center; justify-content: center; padding: 8px; background-color: rgb(50, 58, 80); border: 1px solid rgb(79, 84, 104); border-radius: 4px; cursor: pointer; transition: all 0.2s ease; pointer-events: auto; color: currentColor; opacity: 0.8; }}
.{button}:hover {{ background-color: rgb(79, 84, 104); border-color: rgb(86, 90, 105); opacity: 1; }}
.{button}:focus {{ outline: none; }}
.{success} {{ color: rgb(30, 218, 155); }}
.{error} {{ color: #ef4444; }}
@keyframes {fade_in} {{ from {{ opacity: 0; }} to {{ opacity: 1; }} }}
.{fade_in} {{ animation: {fade_in} 0.5s ease-in-out; }}
.{highlight} {{ transition: filter 0.15s ease-in-out; filter: invert(80%); }}
.{flex} {{ display: flex; align-items: center; gap: 4px; }}
"#,
        wrapper = n.wrapper,
        container = n.container,
        button = n.button,
        success = n.success,
        error = n.error,
        fade_in = n.fade_in,
        highlight = n.highlight,
        flex = n.flex,
    )
}
