//! Definition tree files.
//!
//! ```yaml
//! definitions:
//!   - alias: collection
//!     selector: ol > li
//!     collection: true
//!   - alias: component
//!     selector: .container
//!     children:
//!       - alias: child element
//!         selector: .child-item
//!   - alias: single element js
//!     selector_type: js
//!     selector: return document.querySelector(".single-element")
//! ```

use elpath_common::{Component, Definition, Registry, RegistryError, Selector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DefinitionLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid definition '{alias}': {source}")]
    Registry {
        alias: String,
        #[source]
        source: RegistryError,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionFile {
    #[serde(default)]
    pub definitions: Vec<DefinitionSpec>,
}

/// One node as written in a definition file.
///
/// A node with `children` is a component; otherwise `collection` decides between a
/// collection and a single element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionSpec {
    pub alias: String,
    pub selector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector_type: Option<String>,
    #[serde(default)]
    pub collection: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DefinitionSpec>>,
}

pub struct DefinitionLoader;

impl DefinitionLoader {
    pub async fn load_from(path: &Path) -> Result<Registry, DefinitionLoadError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::load_str(&content)
    }

    pub fn load_str(content: &str) -> Result<Registry, DefinitionLoadError> {
        let file: DefinitionFile = serde_yaml::from_str(content)?;
        build_registry(&file.definitions)
    }
}

pub fn build_registry(specs: &[DefinitionSpec]) -> Result<Registry, DefinitionLoadError> {
    let mut registry = Registry::new();
    for spec in specs {
        let invalid = |source| DefinitionLoadError::Registry {
            alias: spec.alias.clone(),
            source,
        };

        let selector =
            Selector::parse(spec.selector_type.as_deref(), spec.selector.as_str()).map_err(invalid)?;

        match &spec.children {
            Some(children) => {
                let mut component = Component::new(selector);
                if spec.collection {
                    component = component.as_collection();
                }
                *component.children_mut() = build_registry(children)?;
                registry
                    .define_component(spec.alias.as_str(), component)
                    .map_err(invalid)?;
            }
            None => {
                let definition = if spec.collection {
                    Definition::collection(spec.alias.as_str(), selector)
                } else {
                    Definition::element(spec.alias.as_str(), selector)
                };
                registry.insert(definition).map_err(invalid)?;
            }
        }
    }
    Ok(registry)
}
