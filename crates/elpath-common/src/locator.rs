//! Selector mapping.
//!
//! Turns a definition's selector into the shape a WebDriver-style driver expects:
//! a `using` strategy tag plus value, or a script to execute.

use crate::definition::{Selector, SelectorStrategy};
use std::fmt;

pub const USING_CSS: &str = "css selector";
pub const USING_XPATH: &str = "xpath";
pub const USING_ANDROID: &str = "-android uiautomator";
pub const USING_IOS: &str = "-ios uiautomation";
pub const USING_ACCESSIBILITY_ID: &str = "accessibility id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A find-by-selector invocation.
    By { using: &'static str, value: String },
    /// Script source handed to the driver's script execution, bypassing find-by-selector.
    Script(String),
}

impl Locator {
    pub fn css(value: impl Into<String>) -> Self {
        Locator::By {
            using: USING_CSS,
            value: value.into(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::By { using, value } => write!(f, "{}={}", using, value),
            Locator::Script(_) => f.write_str("script"),
        }
    }
}

pub fn to_locator(selector: &Selector) -> Locator {
    let value = selector.value.clone();
    match selector.strategy {
        SelectorStrategy::Css => Locator::By {
            using: USING_CSS,
            value,
        },
        SelectorStrategy::Xpath => Locator::By {
            using: USING_XPATH,
            value,
        },
        SelectorStrategy::Js => Locator::Script(value),
        SelectorStrategy::Android => Locator::By {
            using: USING_ANDROID,
            value,
        },
        SelectorStrategy::Ios => Locator::By {
            using: USING_IOS,
            value,
        },
        SelectorStrategy::AccessibilityId => Locator::By {
            using: USING_ACCESSIBILITY_ID,
            value,
        },
    }
}
