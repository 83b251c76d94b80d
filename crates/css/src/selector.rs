//! Selector parsing and matching.
//!
//! Supported grammar (a practical subset of Selectors Level 3):
//! - simple selectors: `*`, `tag`, `.class`, `#id`, `[attr]`, `[attr=value]`
//! - compounds of the above, e.g. `pre.rust[data-lang=rust]`
//! - descendant (` `) and child (`>`) combinators
//! - comma-separated lists
//!
//! Matching is done right-to-left against the whole document, like
//! `Element.querySelectorAll`: ancestors outside the query scope still count
//! for combinators, only the *results* are restricted to the scope.

use dom::{Document, Id};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("combinator without a selector on both sides in `{0}`")]
    DanglingCombinator(String),
    #[error("unsupported selector syntax `{0}`")]
    Unsupported(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
    Attribute { name: String, value: Option<String> },
}

impl Selector {
    fn matches(&self, doc: &Document, element: Id) -> bool {
        match self {
            Selector::Universal => doc.is_element(element),
            Selector::Type(t) => doc.is_element_named(element, t),
            Selector::Id(want) => doc.attribute(element, "id") == Some(want.as_str()),
            Selector::Class(want) => doc.has_class(element, want),
            Selector::Attribute { name, value: None } => doc.has_attribute(element, name),
            Selector::Attribute {
                name,
                value: Some(want),
            } => doc.attribute(element, name) == Some(want.as_str()),
        }
    }
}

/// Simple selectors that must all hold for one element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compound(pub Vec<Selector>);

impl Compound {
    fn matches(&self, doc: &Document, element: Id) -> bool {
        doc.is_element(element) && self.0.iter().all(|s| s.matches(doc, element))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// `compounds[i]` and `compounds[i + 1]` are joined by `combinators[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

impl ComplexSelector {
    pub fn matches(&self, doc: &Document, element: Id) -> bool {
        let Some(last) = self.compounds.last() else {
            return false;
        };
        last.matches(doc, element) && self.matches_left_of(doc, element, self.compounds.len() - 1)
    }

    /// `compounds[idx]` already matched `element`; check everything to its left.
    fn matches_left_of(&self, doc: &Document, element: Id, idx: usize) -> bool {
        if idx == 0 {
            return true;
        }
        let prev = &self.compounds[idx - 1];
        match self.combinators[idx - 1] {
            Combinator::Child => doc.parent(element).is_some_and(|parent| {
                prev.matches(doc, parent) && self.matches_left_of(doc, parent, idx - 1)
            }),
            Combinator::Descendant => doc.ancestors(element).any(|ancestor| {
                prev.matches(doc, ancestor) && self.matches_left_of(doc, ancestor, idx - 1)
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    source: String,
    selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let selectors = input
            .split(',')
            .map(parse_complex)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source: input.trim().to_string(),
            selectors,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, doc: &Document, element: Id) -> bool {
        self.selectors.iter().any(|s| s.matches(doc, element))
    }

    /// Matching elements strictly below `scope`, in document order.
    pub fn query_all(&self, doc: &Document, scope: Id) -> Vec<Id> {
        doc.descendants(scope)
            .filter(|node| self.matches(doc, *node))
            .collect()
    }

    pub fn query_first(&self, doc: &Document, scope: Id) -> Option<Id> {
        doc.descendants(scope).find(|node| self.matches(doc, *node))
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

// input: "div > pre code"
// output: compounds [div, pre, code], combinators [Child, Descendant]
fn parse_complex(input: &str) -> Result<ComplexSelector, SelectorError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    let mut pending: Option<Combinator> = None;
    let mut chunk = String::new();
    let mut in_brackets = false;

    let flush = |chunk: &mut String,
                     pending: &mut Option<Combinator>,
                     compounds: &mut Vec<Compound>,
                     combinators: &mut Vec<Combinator>|
     -> Result<(), SelectorError> {
        if chunk.is_empty() {
            return Ok(());
        }
        let compound = parse_compound(chunk)?;
        if !compounds.is_empty() {
            combinators.push(pending.take().unwrap_or(Combinator::Descendant));
        } else if pending.is_some() {
            return Err(SelectorError::DanglingCombinator(s.to_string()));
        }
        compounds.push(compound);
        chunk.clear();
        Ok(())
    };

    for c in s.chars() {
        match c {
            '[' => {
                in_brackets = true;
                chunk.push(c);
            }
            ']' => {
                in_brackets = false;
                chunk.push(c);
            }
            _ if in_brackets => chunk.push(c),
            '>' => {
                flush(&mut chunk, &mut pending, &mut compounds, &mut combinators)?;
                if pending.is_some() {
                    return Err(SelectorError::DanglingCombinator(s.to_string()));
                }
                pending = Some(Combinator::Child);
            }
            c if c.is_whitespace() => {
                flush(&mut chunk, &mut pending, &mut compounds, &mut combinators)?;
            }
            _ => chunk.push(c),
        }
    }
    flush(&mut chunk, &mut pending, &mut compounds, &mut combinators)?;

    if pending.is_some() || compounds.is_empty() {
        return Err(SelectorError::DanglingCombinator(s.to_string()));
    }
    Ok(ComplexSelector {
        compounds,
        combinators,
    })
}

// input: "pre.rust#main[data-x=1]"
// output: Compound([Type("pre"), Class("rust"), Id("main"), Attribute{..}])
fn parse_compound(s: &str) -> Result<Compound, SelectorError> {
    let unsupported = || SelectorError::Unsupported(s.to_string());
    let take_ident = |rest: &str| -> Result<(String, usize), SelectorError> {
        let len = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
        if len == 0 {
            return Err(unsupported());
        }
        Ok((rest[..len].to_string(), len))
    };

    let mut parts = Vec::new();
    let mut rest = s;

    if let Some(after) = rest.strip_prefix('*') {
        parts.push(Selector::Universal);
        rest = after;
    } else if rest.starts_with(is_ident_char) {
        let (name, len) = take_ident(rest)?;
        parts.push(Selector::Type(name.to_ascii_lowercase()));
        rest = &rest[len..];
    }

    while let Some(c) = rest.chars().next() {
        match c {
            '.' => {
                let (class, len) = take_ident(&rest[1..])?;
                parts.push(Selector::Class(class));
                rest = &rest[1 + len..];
            }
            '#' => {
                let (id, len) = take_ident(&rest[1..])?;
                parts.push(Selector::Id(id));
                rest = &rest[1 + len..];
            }
            '[' => {
                let end = rest.find(']').ok_or_else(unsupported)?;
                let body = rest[1..end].trim();
                let attribute = match body.split_once('=') {
                    Some((name, value)) => {
                        let name = name.trim();
                        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                        if name.is_empty() || !name.chars().all(is_ident_char) {
                            return Err(unsupported());
                        }
                        Selector::Attribute {
                            name: name.to_ascii_lowercase(),
                            value: Some(value.to_string()),
                        }
                    }
                    None => {
                        if body.is_empty() || !body.chars().all(is_ident_char) {
                            return Err(unsupported());
                        }
                        Selector::Attribute {
                            name: body.to_ascii_lowercase(),
                            value: None,
                        }
                    }
                };
                parts.push(attribute);
                rest = &rest[end + 1..];
            }
            _ => return Err(unsupported()),
        }
    }

    if parts.is_empty() {
        return Err(unsupported());
    }
    Ok(Compound(parts))
}
