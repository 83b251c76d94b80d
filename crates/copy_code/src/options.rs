//! Per-invocation configuration.
//!
//! Every field has a default, so callers (and config files) only name what they
//! change. Class-name fields left as `None` resolve against `class_prefix`.

use crate::icons::Renderable;
use crate::styles::{DEFAULT_PREFIX, StyleNames};
use css::{SelectorError, SelectorList};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SELECTOR: &str = "pre code";
pub const DEFAULT_COPY_MESSAGE: &str = "Copied";
pub const DEFAULT_COPY_MESSAGE_TIMEOUT: Duration = Duration::from_millis(2000);
/// Fixed duration of the highlight marker, independent of the message timeout.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(400);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl Position {
    /// Short code used in the position class, e.g. `tr` for top-right.
    pub fn code(self) -> &'static str {
        match self {
            Position::TopRight => "tr",
            Position::TopLeft => "tl",
            Position::BottomRight => "br",
            Position::BottomLeft => "bl",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("invalid selector `{selector}`: {source}")]
    Selector {
        selector: String,
        source: SelectorError,
    },
    #[error("class prefix `{0}` must be a non-empty identifier")]
    ClassPrefix(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Options {
    pub selector: String,
    pub position: Position,
    pub copy_message: String,
    #[serde(with = "millis")]
    pub copy_message_timeout: Duration,
    pub class_prefix: String,
    pub container_class_name: Option<String>,
    pub button_class_name: Option<String>,
    pub success_class_name: Option<String>,
    pub highlight_on_copy: bool,
    /// Defaults to `true`: the block's full text is copied. When `false`,
    /// elements with class `line-number` are left out of the copied text.
    pub include_line_numbers: bool,
    #[serde(skip)]
    pub custom_copy_icon: Option<Renderable>,
    #[serde(skip)]
    pub custom_success_icon: Option<Renderable>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            position: Position::TopRight,
            copy_message: DEFAULT_COPY_MESSAGE.to_string(),
            copy_message_timeout: DEFAULT_COPY_MESSAGE_TIMEOUT,
            class_prefix: DEFAULT_PREFIX.to_string(),
            container_class_name: None,
            button_class_name: None,
            success_class_name: None,
            highlight_on_copy: false,
            include_line_numbers: true,
            custom_copy_icon: None,
            custom_success_icon: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_copy_message(mut self, message: impl Into<String>) -> Self {
        self.copy_message = message.into();
        self
    }

    pub fn with_copy_message_timeout(mut self, timeout: Duration) -> Self {
        self.copy_message_timeout = timeout;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn with_container_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.container_class_name = Some(class_name.into());
        self
    }

    pub fn with_button_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.button_class_name = Some(class_name.into());
        self
    }

    pub fn with_success_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.success_class_name = Some(class_name.into());
        self
    }

    /// Keeps the current (or default) container class and adds `extra`.
    pub fn with_extra_container_class(mut self, extra: &str) -> Self {
        let base = self.container_class();
        self.container_class_name = Some(format!("{base} {extra}"));
        self
    }

    pub fn with_extra_button_class(mut self, extra: &str) -> Self {
        let base = self.button_class();
        self.button_class_name = Some(format!("{base} {extra}"));
        self
    }

    pub fn with_extra_success_class(mut self, extra: &str) -> Self {
        let base = self.success_class();
        self.success_class_name = Some(format!("{base} {extra}"));
        self
    }

    pub fn with_highlight_on_copy(mut self, highlight: bool) -> Self {
        self.highlight_on_copy = highlight;
        self
    }

    pub fn with_include_line_numbers(mut self, include: bool) -> Self {
        self.include_line_numbers = include;
        self
    }

    pub fn with_custom_copy_icon(mut self, icon: Renderable) -> Self {
        self.custom_copy_icon = Some(icon);
        self
    }

    pub fn with_custom_success_icon(mut self, icon: Renderable) -> Self {
        self.custom_success_icon = Some(icon);
        self
    }

    pub fn style_names(&self) -> StyleNames {
        StyleNames::new(&self.class_prefix)
    }

    pub fn container_class(&self) -> String {
        self.container_class_name
            .clone()
            .unwrap_or_else(|| self.style_names().container)
    }

    pub fn button_class(&self) -> String {
        self.button_class_name
            .clone()
            .unwrap_or_else(|| self.style_names().button)
    }

    pub fn success_class(&self) -> String {
        self.success_class_name
            .clone()
            .unwrap_or_else(|| self.style_names().success)
    }

    pub fn parsed_selector(&self) -> Result<SelectorList, OptionsError> {
        SelectorList::parse(&self.selector).map_err(|source| OptionsError::Selector {
            selector: self.selector.clone(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        let prefix_ok = !self.class_prefix.is_empty()
            && self
                .class_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !prefix_ok {
            return Err(OptionsError::ClassPrefix(self.class_prefix.clone()));
        }
        self.parsed_selector().map(|_| ())
    }
}

mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
