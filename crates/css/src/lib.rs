pub mod selector;
pub mod style_attr;
pub mod syntax;

// Re-exports so other crates can just use `css::...` nicely.
pub use selector::{Combinator, ComplexSelector, Compound, Selector, SelectorError, SelectorList};
pub use style_attr::{get_inline_style, inline_property, set_inline_property};
pub use syntax::{
    Declaration, Rule, Stylesheet, parse_declarations, parse_stylesheet, serialize_declarations,
};
