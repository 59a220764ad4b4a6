use crate::definition::{Definition, DefinitionKind, Selector};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building a definition tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Selector type {0} is not defined")]
    UnknownStrategy(String),

    #[error("Alias '{0}' is already defined in this scope")]
    DuplicateAlias(String),

    #[error("Alias must not be empty")]
    EmptyAlias,
}

/// An alias that is not registered at the current tree position.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("There is no such element: '{alias}'{}", did_you_mean(.suggestions))]
pub struct LookupError {
    pub alias: String,
    pub suggestions: Vec<String>,
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("\nDid you mean:\n{}", suggestions.join("\n"))
    }
}

/// The aliases registered at one level of the definition tree.
///
/// The page root is a `Registry`; every component owns another one for its children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    definitions: HashMap<String, Definition>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Insert a fully built definition. Aliases are unique per registry.
    pub fn insert(&mut self, definition: Definition) -> Result<&mut Self, RegistryError> {
        if definition.alias.trim().is_empty() {
            return Err(RegistryError::EmptyAlias);
        }
        if self.definitions.contains_key(&definition.alias) {
            return Err(RegistryError::DuplicateAlias(definition.alias));
        }
        self.definitions
            .insert(definition.alias.clone(), definition);
        Ok(self)
    }

    pub fn define_element(
        &mut self,
        alias: impl Into<String>,
        selector: impl Into<Selector>,
    ) -> Result<&mut Self, RegistryError> {
        self.insert(Definition::element(alias, selector))
    }

    pub fn define_collection(
        &mut self,
        alias: impl Into<String>,
        selector: impl Into<Selector>,
    ) -> Result<&mut Self, RegistryError> {
        self.insert(Definition::collection(alias, selector))
    }

    /// Register a component under `alias`. The alias given here wins over any name
    /// the component was built with.
    pub fn define_component(
        &mut self,
        alias: impl Into<String>,
        component: Component,
    ) -> Result<&mut Self, RegistryError> {
        self.insert(Definition {
            alias: alias.into(),
            selector: component.selector,
            kind: DefinitionKind::Component {
                children: component.children,
                collection: component.collection,
            },
        })
    }

    pub fn get(&self, alias: &str) -> Option<&Definition> {
        self.definitions.get(alias)
    }

    /// Like [`Registry::get`], but a miss carries near-miss suggestions.
    pub fn lookup(&self, alias: &str) -> Result<&Definition, LookupError> {
        self.get(alias).ok_or_else(|| LookupError {
            alias: alias.to_string(),
            suggestions: self.suggest(alias),
        })
    }

    /// Registered aliases close to `alias`, best match first.
    pub fn suggest(&self, alias: &str) -> Vec<String> {
        let max_distance = (alias.chars().count() / 3).max(2);

        let mut candidates: Vec<(f64, &str)> = self
            .definitions
            .keys()
            .filter(|candidate| strsim::levenshtein(alias, candidate) <= max_distance)
            .map(|candidate| (strsim::normalized_levenshtein(alias, candidate), candidate.as_str()))
            .collect();

        candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        candidates
            .into_iter()
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    /// Registered aliases, sorted.
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Builder for a component: a selector plus the aliases nested under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    selector: Selector,
    collection: bool,
    children: Registry,
}

impl Component {
    pub fn new(selector: impl Into<Selector>) -> Self {
        Self {
            selector: selector.into(),
            collection: false,
            children: Registry::new(),
        }
    }

    /// Every match of the selector is a separate component instance.
    pub fn as_collection(mut self) -> Self {
        self.collection = true;
        self
    }

    pub fn children(&self) -> &Registry {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Registry {
        &mut self.children
    }
}
