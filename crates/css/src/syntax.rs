use crate::selector::SelectorList;
use memchr::memchr2;

// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// Selector list and declarations
#[derive(Clone, Debug)]
pub struct Rule {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
}

// A full stylesheet: style rules plus the raw text of at-rules (`@keyframes`, ...)
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
    pub at_rules: Vec<String>,
}

/// Splits `input` into top-level `prelude { body }` blocks.
///
/// Nested blocks (as in `@keyframes x { from { … } }`) stay inside their
/// parent's body.
fn top_level_blocks(input: &str) -> Vec<(&str, &str)> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut prelude_start = 0usize;
    let mut body_start = 0usize;
    let mut i = 0usize;
    while let Some(rel) = memchr2(b'{', b'}', &bytes[i..]) {
        let pos = i + rel;
        if bytes[pos] == b'{' {
            if depth == 0 {
                body_start = pos + 1;
            }
            depth += 1;
        } else if depth > 0 {
            depth -= 1;
            if depth == 0 {
                out.push((&input[prelude_start..body_start - 1], &input[body_start..pos]));
                prelude_start = pos + 1;
            }
        }
        i = pos + 1;
    }
    out
}

// input: "pre code, .x { color: red; } @keyframes f { from { opacity: 0; } }"
// output: one rule + one at-rule; rules with unsupported selectors are dropped
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let mut sheet = Stylesheet::default();
    for (prelude, body) in top_level_blocks(input) {
        let prelude = prelude.trim();
        if prelude.starts_with('@') {
            sheet.at_rules.push(format!("{prelude} {{{body}}}"));
            continue;
        }
        let selectors = match SelectorList::parse(prelude) {
            Ok(selectors) => selectors,
            Err(err) => {
                log::trace!(target: "css", "skipping rule `{prelude}`: {err}");
                continue;
            }
        };
        let declarations = parse_declarations(body);
        if declarations.is_empty() {
            continue;
        }
        sheet.rules.push(Rule {
            selectors,
            declarations,
        });
    }
    sheet
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

// input: [Declaration { name: "position", value: "relative" }]
// output: "position: relative;"
pub fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {};", d.name, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}
