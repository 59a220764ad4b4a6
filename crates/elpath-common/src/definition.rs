//! Definition tree nodes.
//!
//! A definition says what an alias means on a page: which selector finds it, and
//! whether it yields one element, a collection, or a nested component with its own
//! aliases. The tree is built once and only read afterwards.

use crate::registry::{Registry, RegistryError};
use std::fmt;
use std::str::FromStr;

/// Locator strategy of a definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SelectorStrategy {
    #[default]
    Css,
    Xpath,
    /// Inline script run in the driver context. Parameters cannot be passed to it.
    Js,
    Android,
    Ios,
    AccessibilityId,
}

impl SelectorStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorStrategy::Css => "css",
            SelectorStrategy::Xpath => "xpath",
            SelectorStrategy::Js => "js",
            SelectorStrategy::Android => "android",
            SelectorStrategy::Ios => "ios",
            SelectorStrategy::AccessibilityId => "accessibilityId",
        }
    }
}

impl fmt::Display for SelectorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectorStrategy {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "css" => Ok(SelectorStrategy::Css),
            "xpath" => Ok(SelectorStrategy::Xpath),
            "js" => Ok(SelectorStrategy::Js),
            "android" => Ok(SelectorStrategy::Android),
            "ios" => Ok(SelectorStrategy::Ios),
            "accessibilityId" => Ok(SelectorStrategy::AccessibilityId),
            other => Err(RegistryError::UnknownStrategy(other.to_string())),
        }
    }
}

/// A strategy paired with its raw selector text (or script source for `js`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub strategy: SelectorStrategy,
    pub value: String,
}

impl Selector {
    pub fn new(strategy: SelectorStrategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::new(SelectorStrategy::Css, value)
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(SelectorStrategy::Xpath, value)
    }

    pub fn js(script: impl Into<String>) -> Self {
        Self::new(SelectorStrategy::Js, script)
    }

    pub fn android(value: impl Into<String>) -> Self {
        Self::new(SelectorStrategy::Android, value)
    }

    pub fn ios(value: impl Into<String>) -> Self {
        Self::new(SelectorStrategy::Ios, value)
    }

    pub fn accessibility_id(value: impl Into<String>) -> Self {
        Self::new(SelectorStrategy::AccessibilityId, value)
    }

    /// Build a selector from a strategy name as it appears in registration input.
    /// `None` falls back to css.
    pub fn parse(strategy: Option<&str>, value: impl Into<String>) -> Result<Self, RegistryError> {
        let strategy = match strategy {
            Some(s) => s.parse()?,
            None => SelectorStrategy::default(),
        };
        Ok(Self::new(strategy, value))
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Selector::css(value)
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        Selector::css(value)
    }
}

/// What a definition yields when materialized.
#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionKind {
    /// A single element.
    Element,
    /// Every element matching the selector.
    Collection,
    /// A subtree with its own aliases. When `collection` is set, every match is a
    /// separate instance of the component.
    Component { children: Registry, collection: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub alias: String,
    pub selector: Selector,
    pub kind: DefinitionKind,
}

impl Definition {
    pub fn element(alias: impl Into<String>, selector: impl Into<Selector>) -> Self {
        Self {
            alias: alias.into(),
            selector: selector.into(),
            kind: DefinitionKind::Element,
        }
    }

    pub fn collection(alias: impl Into<String>, selector: impl Into<Selector>) -> Self {
        Self {
            alias: alias.into(),
            selector: selector.into(),
            kind: DefinitionKind::Collection,
        }
    }

    /// True when materializing this definition yields an array of handles.
    pub fn is_collection(&self) -> bool {
        match &self.kind {
            DefinitionKind::Element => false,
            DefinitionKind::Collection => true,
            DefinitionKind::Component { collection, .. } => *collection,
        }
    }

    /// Nested aliases, for components only.
    pub fn children(&self) -> Option<&Registry> {
        match &self.kind {
            DefinitionKind::Component { children, .. } => Some(children),
            _ => None,
        }
    }
}
