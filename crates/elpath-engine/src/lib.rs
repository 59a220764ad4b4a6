pub mod config;
pub mod definitions;
pub mod driver;
pub mod error;
pub mod filter;
pub mod resolver;
pub mod scope;

pub use elpath_common::{definition, locator, registry};
pub use elpath_common::{Component, Definition, DriverError, Locator, Registry, Selector};
pub use elpath_parser as parser;

pub use driver::Driver;
pub use error::ResolveError;
pub use resolver::{FanOut, PathResolver, ResolverOptions};
pub use scope::Scope;
