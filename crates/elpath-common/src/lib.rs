pub mod definition;
pub mod error;
pub mod locator;
pub mod registry;

pub use definition::{Definition, DefinitionKind, Selector, SelectorStrategy};
pub use error::DriverError;
pub use locator::{Locator, to_locator};
pub use registry::{Component, LookupError, Registry, RegistryError};
