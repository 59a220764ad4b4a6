//! Path resolution.
//!
//! Walks the definition tree one step at a time, materializing elements through the
//! driver. Each step waits for the previous one; only the per-member finds inside a
//! single step may run concurrently.

use crate::config::schema::ElpathConfig;
use crate::driver::Driver;
use crate::error::ResolveError;
use crate::filter::{select_index, select_text};
use crate::scope::Scope;
use elpath_common::{Definition, Locator, LookupError, Registry, Selector, to_locator};
use elpath_parser::{Modifier, Step, StepTarget, parse};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_ROOT_SELECTOR: &str = "html";

/// How a step fans out over a list scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanOut {
    /// Query every member at once. Output order is still document order.
    #[default]
    Concurrent,
    /// Query members one after another, for single-connection drivers.
    Sequential,
}

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Selector used to acquire the document root.
    pub root: Selector,
    pub fan_out: FanOut,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            root: Selector::css(DEFAULT_ROOT_SELECTOR),
            fan_out: FanOut::default(),
        }
    }
}

impl ResolverOptions {
    pub fn from_config(config: &ElpathConfig) -> Self {
        Self {
            root: Selector::css(config.root_selector.clone()),
            fan_out: config.fan_out,
        }
    }
}

/// Resolves locator paths against a shared, read-only definition tree.
pub struct PathResolver<D: Driver> {
    driver: D,
    registry: Arc<Registry>,
    options: ResolverOptions,
}

impl<D: Driver> PathResolver<D> {
    pub fn new(driver: D, registry: impl Into<Arc<Registry>>) -> Self {
        Self {
            driver,
            registry: registry.into(),
            options: ResolverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Swap the driver, e.g. after a new session was started. The tree is kept.
    pub fn set_driver(&mut self, driver: D) -> &mut Self {
        self.driver = driver;
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Give the driver back, e.g. to end its session.
    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve `path` starting from the document root.
    pub async fn resolve(&self, path: &str) -> Result<Scope<D::Element>, ResolveError> {
        let steps = parse(path)?;
        let root = self
            .driver
            .find_root(&to_locator(&self.options.root))
            .await?;
        debug!(path, steps = steps.len(), "resolving path");
        self.resolve_steps(&steps, Scope::One(root)).await
    }

    /// Resolve `path` starting from a scope the caller already holds.
    pub async fn resolve_in(
        &self,
        path: &str,
        root: Scope<D::Element>,
    ) -> Result<Scope<D::Element>, ResolveError> {
        let steps = parse(path)?;
        self.resolve_steps(&steps, root).await
    }

    /// Resolve `path` and read the text of every resulting handle, in order.
    pub async fn text_of(&self, path: &str) -> Result<Vec<String>, ResolveError> {
        let scope = self.resolve(path).await?;
        let mut texts = Vec::with_capacity(scope.len());
        for element in scope.iter() {
            texts.push(self.driver.get_text(element).await?);
        }
        Ok(texts)
    }

    pub async fn resolve_steps(
        &self,
        steps: &[Step],
        root: Scope<D::Element>,
    ) -> Result<Scope<D::Element>, ResolveError> {
        let mut scope = root;
        // Last resolved definition; `this` steps leave it untouched.
        let mut current: Option<&Definition> = None;

        for step in steps {
            debug!(step = %step, scope_len = scope.len(), "resolving step");

            scope = match &step.target {
                StepTarget::This => match &step.modifier {
                    None => scope,
                    Some(modifier) => match scope {
                        Scope::Many(elements) => self.apply_modifier(elements, modifier).await?,
                        Scope::One(_) => {
                            return Err(ResolveError::InvalidModifier {
                                step: step.to_string(),
                                reason: "'this' does not refer to a collection".into(),
                            });
                        }
                    },
                },
                StepTarget::Alias(alias) => {
                    let definition = self.lookup(current, alias)?;

                    if step.modifier.is_some() && !definition.is_collection() {
                        return Err(ResolveError::InvalidModifier {
                            step: step.to_string(),
                            reason: format!("'{}' is not a collection", alias),
                        });
                    }

                    let materialized = self.materialize(scope, definition).await?;
                    current = Some(definition);

                    match &step.modifier {
                        None => materialized,
                        Some(modifier) => {
                            self.apply_modifier(materialized.into_vec(), modifier)
                                .await?
                        }
                    }
                }
            };
        }

        Ok(scope)
    }

    /// Find `alias` among the root aliases, or among the children of the last
    /// resolved definition.
    fn lookup<'a>(
        &'a self,
        current: Option<&'a Definition>,
        alias: &str,
    ) -> Result<&'a Definition, LookupError> {
        match current {
            None => self.registry.lookup(alias),
            Some(parent) => match parent.children() {
                Some(children) => children.lookup(alias),
                None => Err(LookupError {
                    alias: alias.to_string(),
                    suggestions: vec![],
                }),
            },
        }
    }

    async fn materialize(
        &self,
        scope: Scope<D::Element>,
        definition: &Definition,
    ) -> Result<Scope<D::Element>, ResolveError> {
        let collection = definition.is_collection();

        match (to_locator(&definition.selector), scope) {
            (Locator::Script(script), _) => {
                let produced = self.driver.execute_script(&script).await?;
                Ok(if collection {
                    Scope::Many(produced.into_vec())
                } else {
                    produced
                })
            }
            (locator, Scope::One(element)) => {
                if collection {
                    Ok(Scope::Many(
                        self.driver.find_elements(&element, &locator).await?,
                    ))
                } else {
                    Ok(Scope::One(
                        self.driver.find_element(&element, &locator).await?,
                    ))
                }
            }
            (locator, Scope::Many(elements)) => {
                debug!(members = elements.len(), alias = %definition.alias, "fanning out");
                let found = match self.options.fan_out {
                    FanOut::Concurrent => {
                        try_join_all(
                            elements
                                .iter()
                                .map(|element| self.find_in(element, &locator, collection)),
                        )
                        .await?
                    }
                    FanOut::Sequential => {
                        let mut found = Vec::with_capacity(elements.len());
                        for element in &elements {
                            found.push(self.find_in(element, &locator, collection).await?);
                        }
                        found
                    }
                };
                Ok(Scope::Many(found.into_iter().flatten().collect()))
            }
        }
    }

    async fn find_in(
        &self,
        element: &D::Element,
        locator: &Locator,
        collection: bool,
    ) -> Result<Vec<D::Element>, ResolveError> {
        if collection {
            Ok(self.driver.find_elements(element, locator).await?)
        } else {
            Ok(vec![self.driver.find_element(element, locator).await?])
        }
    }

    async fn apply_modifier(
        &self,
        elements: Vec<D::Element>,
        modifier: &Modifier,
    ) -> Result<Scope<D::Element>, ResolveError> {
        match modifier {
            Modifier::Index(spec) => select_index(elements, *spec),
            Modifier::Text {
                filter,
                cardinality,
            } => select_text(&self.driver, elements, filter, *cardinality).await,
        }
    }
}
