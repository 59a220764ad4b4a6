//! [`Driver`] over a fantoccini WebDriver session.
//!
//! css and xpath locators map to fantoccini's own. The mobile strategies need an
//! Appium-style server and are reported as unsupported.
//!
//! `js` results cannot be returned as element handles directly. The script is wrapped
//! so each returned node gets a `data-elpath-js` attribute holding a per-call mark and
//! its position in the result; the nodes are then found by that attribute and put back
//! in the order the script returned them.

use crate::webdriver::WebDriverClient;
use async_trait::async_trait;
use elpath_common::locator::{USING_CSS, USING_XPATH};
use elpath_engine::{Driver, DriverError, Locator, Scope};
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use std::sync::atomic::Ordering;
use tracing::debug;

pub const SCRIPT_MARK_ATTRIBUTE: &str = "data-elpath-js";

fn to_fantoccini(locator: &Locator) -> Result<fantoccini::Locator<'_>, DriverError> {
    match locator {
        Locator::By { using, value } if *using == USING_CSS => Ok(fantoccini::Locator::Css(value)),
        Locator::By { using, value } if *using == USING_XPATH => {
            Ok(fantoccini::Locator::XPath(value))
        }
        Locator::By { using, .. } => Err(DriverError::UnsupportedLocator(using.to_string())),
        Locator::Script(_) => Err(DriverError::UnsupportedLocator("script".into())),
    }
}

fn map_cmd_error(err: CmdError, locator: &Locator) -> DriverError {
    if err.is_no_such_element() {
        return DriverError::NoSuchElement {
            locator: locator.to_string(),
        };
    }
    map_element_error(err)
}

fn map_element_error(err: CmdError) -> DriverError {
    let message = err.to_string();
    if message.contains("stale element") {
        DriverError::StaleElement(message)
    } else {
        DriverError::Other(message)
    }
}

/// Wraps a user script so every element it returns is tagged with `mark` and its
/// position in the result, as `<mark>-<position>`.
///
/// The wrapper reports whether the script produced a list, so a single element
/// stays a single handle.
pub fn marking_script(script: &str, mark: &str) -> String {
    format!(
        r#"
        const result = (function () {{
{script}
        }}).apply(null, arguments);
        const isList = Array.isArray(result)
            || result instanceof NodeList
            || result instanceof HTMLCollection;
        const nodes = result == null ? [] : (isList ? Array.from(result) : [result]);
        nodes.forEach(function (node, i) {{ node.setAttribute('{attr}', '{mark}-' + i); }});
        return {{ list: isList, count: nodes.length }};
        "#,
        script = script,
        attr = SCRIPT_MARK_ATTRIBUTE,
        mark = mark,
    )
}

/// CSS selector for every node tagged with `mark`.
fn marked_selector(mark: &str) -> String {
    format!(r#"[{}^="{}-"]"#, SCRIPT_MARK_ATTRIBUTE, mark)
}

/// Position encoded in a tag value written by [`marking_script`].
fn mark_position(value: &str, mark: &str) -> Option<usize> {
    value.strip_prefix(mark)?.strip_prefix('-')?.parse().ok()
}

fn unmark_script(mark: &str) -> String {
    format!(
        r#"document.querySelectorAll('{selector}').forEach(function (node) {{ node.removeAttribute('{attr}'); }});"#,
        selector = marked_selector(mark),
        attr = SCRIPT_MARK_ATTRIBUTE,
    )
}

impl WebDriverClient {
    /// Find the nodes tagged with `mark`, in the order the script returned them.
    async fn find_marked(&self, mark: &str) -> Result<Vec<Element>, DriverError> {
        let selector = marked_selector(mark);
        let found = self
            .client
            .find_all(fantoccini::Locator::Css(&selector))
            .await
            .map_err(|e| map_cmd_error(e, &Locator::css(selector.clone())))?;

        let mut positioned = Vec::with_capacity(found.len());
        for element in found {
            let position = element
                .attr(SCRIPT_MARK_ATTRIBUTE)
                .await
                .map_err(map_element_error)?
                .and_then(|value| mark_position(&value, mark))
                .unwrap_or(usize::MAX);
            positioned.push((position, element));
        }
        positioned.sort_by_key(|(position, _)| *position);
        Ok(positioned.into_iter().map(|(_, element)| element).collect())
    }
}

#[async_trait]
impl Driver for WebDriverClient {
    type Element = Element;

    async fn find_root(&self, locator: &Locator) -> Result<Element, DriverError> {
        self.client
            .find(to_fantoccini(locator)?)
            .await
            .map_err(|e| map_cmd_error(e, locator))
    }

    async fn find_element(&self, scope: &Element, locator: &Locator) -> Result<Element, DriverError> {
        scope
            .find(to_fantoccini(locator)?)
            .await
            .map_err(|e| map_cmd_error(e, locator))
    }

    async fn find_elements(
        &self,
        scope: &Element,
        locator: &Locator,
    ) -> Result<Vec<Element>, DriverError> {
        scope
            .find_all(to_fantoccini(locator)?)
            .await
            .map_err(|e| map_cmd_error(e, locator))
    }

    async fn get_text(&self, element: &Element) -> Result<String, DriverError> {
        element
            .text()
            .await
            .map_err(map_element_error)
    }

    async fn execute_script(&self, script: &str) -> Result<Scope<Element>, DriverError> {
        let mark = self.script_marks.fetch_add(1, Ordering::Relaxed).to_string();
        let summary = self
            .client
            .execute(&marking_script(script, &mark), vec![])
            .await
            .map_err(|e| DriverError::Script(e.to_string()))?;
        debug!(%summary, "script executed");

        // Tags come off the page whether or not the lookup succeeded.
        let found = self.find_marked(&mark).await;
        let unmarked = self
            .client
            .execute(&unmark_script(&mark), vec![])
            .await
            .map_err(|e| DriverError::Script(e.to_string()));
        let found = found?;
        unmarked?;

        let is_list = summary
            .get("list")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if is_list {
            return Ok(Scope::Many(found));
        }
        found
            .into_iter()
            .next()
            .map(Scope::One)
            .ok_or_else(|| DriverError::Script("script returned no element".into()))
    }
}
