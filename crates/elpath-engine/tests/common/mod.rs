#![allow(dead_code)]

use async_trait::async_trait;
use elpath_engine::{Component, Driver, DriverError, Locator, Registry, Scope, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// A node of the in-memory page. Nodes are stored in document order.
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<usize>,
    pub selectors: Vec<&'static str>,
    pub text: String,
}

/// In-memory driver: a node matches a locator when the locator's value is one of
/// the node's selectors. Element handles are node indices.
#[derive(Debug, Default)]
pub struct MockDriver {
    pub nodes: Vec<Node>,
    pub scripts: HashMap<String, Vec<usize>>,
    pub stale: HashSet<usize>,
    pub find_delays: HashMap<usize, u64>,
    pub calls: Mutex<Vec<String>>,
}

impl MockDriver {
    pub fn add(&mut self, parent: Option<usize>, selectors: &[&'static str], text: &str) -> usize {
        self.nodes.push(Node {
            parent,
            selectors: selectors.to_vec(),
            text: text.to_string(),
        });
        self.nodes.len() - 1
    }

    pub fn text(&self, id: usize) -> &str {
        &self.nodes[id].text
    }

    pub fn texts(&self, scope: &Scope<usize>) -> Vec<String> {
        scope.iter().map(|id| self.text(*id).to_string()).collect()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn is_descendant(&self, id: usize, ancestor: usize) -> bool {
        let mut current = self.nodes[id].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes[parent].parent;
        }
        false
    }

    fn check_live(&self, id: usize) -> Result<(), DriverError> {
        if self.stale.contains(&id) {
            Err(DriverError::StaleElement(format!("node {}", id)))
        } else {
            Ok(())
        }
    }

    fn matching(&self, scope: Option<usize>, locator: &Locator) -> Result<Vec<usize>, DriverError> {
        let value = match locator {
            Locator::By { value, .. } => value.as_str(),
            Locator::Script(_) => return Err(DriverError::UnsupportedLocator("script".into())),
        };
        Ok((0..self.nodes.len())
            .filter(|id| scope.is_none_or(|s| self.is_descendant(*id, s)))
            .filter(|id| self.nodes[*id].selectors.contains(&value))
            .collect())
    }

    async fn delay(&self, id: usize) {
        if let Some(ms) = self.find_delays.get(&id) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
    }
}

#[async_trait]
impl Driver for MockDriver {
    type Element = usize;

    async fn find_root(&self, locator: &Locator) -> Result<usize, DriverError> {
        self.record(format!("find_root {}", locator));
        self.matching(None, locator)?
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::NoSuchElement {
                locator: locator.to_string(),
            })
    }

    async fn find_element(&self, scope: &usize, locator: &Locator) -> Result<usize, DriverError> {
        self.record(format!("find_element {} {}", scope, locator));
        self.check_live(*scope)?;
        self.delay(*scope).await;
        self.matching(Some(*scope), locator)?
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::NoSuchElement {
                locator: locator.to_string(),
            })
    }

    async fn find_elements(
        &self,
        scope: &usize,
        locator: &Locator,
    ) -> Result<Vec<usize>, DriverError> {
        self.record(format!("find_elements {} {}", scope, locator));
        self.check_live(*scope)?;
        self.delay(*scope).await;
        self.matching(Some(*scope), locator)
    }

    async fn get_text(&self, element: &usize) -> Result<String, DriverError> {
        self.record(format!("get_text {}", element));
        self.check_live(*element)?;
        Ok(self.nodes[*element].text.clone())
    }

    async fn execute_script(&self, script: &str) -> Result<Scope<usize>, DriverError> {
        self.record(format!("execute_script {}", script));
        match self.scripts.get(script) {
            Some(ids) if ids.len() == 1 => Ok(Scope::One(ids[0])),
            Some(ids) => Ok(Scope::Many(ids.clone())),
            None => Err(DriverError::Script(format!("unknown script: {}", script))),
        }
    }
}

pub const SINGLE_ELEMENT_JS: &str = r#"return document.querySelector(".single-element")"#;

/// The test page:
///
/// ```html
/// <div class="single-element">text of single element</div>
/// <div class="container">
///   <div class="child-item">text of first child item</div>
///   <div class="child-item">text of second child item</div>
/// </div>
/// <ol><li>First</li><li>Second</li><li>Third</li><li>Third Third</li><li>Last</li></ol>
/// <div class="list-components">
///   <div class="l-component"><div>1</div></div>
///   <div class="l-component"><div>2</div></div>
///   <div class="l-component"><div>3</div></div>
/// </div>
/// ```
pub fn test_page() -> MockDriver {
    let mut driver = MockDriver::default();
    let html = driver.add(None, &["html"], "");
    let single = driver.add(Some(html), &[".single-element"], "text of single element");
    let container = driver.add(Some(html), &[".container"], "");
    driver.add(Some(container), &[".child-item"], "text of first child item");
    driver.add(Some(container), &[".child-item"], "text of second child item");
    let ol = driver.add(Some(html), &["ol"], "");
    for text in ["First", "Second", "Third", "Third Third", "Last"] {
        driver.add(Some(ol), &["ol > li", "li"], text);
    }
    let list = driver.add(Some(html), &[".list-components"], "");
    for text in ["1", "2", "3"] {
        let component = driver.add(Some(list), &[".l-component"], "");
        driver.add(Some(component), &["div"], text);
    }
    driver.scripts.insert(SINGLE_ELEMENT_JS.to_string(), vec![single]);
    driver
}

/// Definitions matching [`test_page`].
pub fn test_registry() -> Registry {
    let mut component = Component::new(".container");
    component
        .children_mut()
        .define_element("child element", ".child-item")
        .unwrap();

    let mut child_component = Component::new(".l-component").as_collection();
    child_component
        .children_mut()
        .define_element("child element", "div")
        .unwrap();

    let mut component2 = Component::new(".list-components");
    component2
        .children_mut()
        .define_component("child component", child_component)
        .unwrap();

    let mut registry = Registry::new();
    registry
        .define_component("component2", component2)
        .unwrap()
        .define_element("single element", ".single-element")
        .unwrap()
        .define_component("component", component)
        .unwrap()
        .define_collection("collection", "ol > li")
        .unwrap()
        .define_element("single element js", Selector::js(SINGLE_ELEMENT_JS))
        .unwrap();
    registry
}
