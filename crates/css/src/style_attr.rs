//! Inline `style="…"` attribute access.

use crate::syntax::{Declaration, parse_declarations, serialize_declarations};
use dom::{Document, DomError, Id};

// If the element has an inline style attribute, return its value
pub fn get_inline_style(doc: &Document, element: Id) -> Option<&str> {
    doc.attribute(element, "style")
}

/// Value of one inline property, e.g. `position` → `relative`.
pub fn inline_property(doc: &Document, element: Id, name: &str) -> Option<String> {
    let name = name.to_ascii_lowercase();
    parse_declarations(get_inline_style(doc, element)?)
        .into_iter()
        .rev()
        .find(|d| d.name == name)
        .map(|d| d.value)
}

/// Sets one inline property, replacing earlier values and keeping the rest of
/// the declarations in their original order.
pub fn set_inline_property(
    doc: &mut Document,
    element: Id,
    name: &str,
    value: &str,
) -> Result<(), DomError> {
    if !doc.is_element(element) {
        return Err(if doc.is_live(element) {
            DomError::WrongNodeKind(element)
        } else {
            DomError::MissingNode(element)
        });
    }
    let name = name.to_ascii_lowercase();
    let mut declarations = get_inline_style(doc, element)
        .map(parse_declarations)
        .unwrap_or_default();
    match declarations.iter().position(|d| d.name == name) {
        Some(pos) => {
            declarations[pos].value = value.to_string();
            let mut seen = false;
            declarations.retain(|d| {
                if d.name != name {
                    return true;
                }
                let keep = !seen;
                seen = true;
                keep
            });
        }
        None => declarations.push(Declaration {
            name,
            value: value.to_string(),
        }),
    }
    doc.set_attribute(element, "style", &serialize_declarations(&declarations))
}
