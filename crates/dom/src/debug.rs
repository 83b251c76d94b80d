use crate::{Document, Id};

/// Indented one-line-per-node dump of the subtree at `id`, capped at `cap` lines.
pub fn outline(doc: &Document, id: Id, cap: usize) -> Vec<String> {
    fn walk(doc: &Document, node: Id, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        if node == doc.root() {
            out.push(format!("{indent}#document"));
        } else if let Some(name) = doc.element_name(node) {
            let mut line = format!("{indent}<{name}");
            for (key, value) in doc.attributes(node) {
                match value {
                    Some(v) => line.push_str(&format!(r#" {key}="{v}""#)),
                    None => line.push_str(&format!(" {key}")),
                }
            }
            line.push('>');
            out.push(line);
        } else if let Some(text) = doc.node_text(node) {
            let t = text.replace('\n', "\\n");
            let show = if t.chars().count() > 40 {
                format!("{}…", t.chars().take(40).collect::<String>())
            } else {
                t
            };
            if doc.is_text(node) {
                out.push(format!("{indent}\"{show}\""));
            } else {
                out.push(format!("{indent}<!-- {show} -->"));
            }
        }
        for child in doc.children(node) {
            walk(doc, *child, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(doc, id, 0, &mut out, &mut left);
    out
}
