use crate::scope::Scope;
use async_trait::async_trait;
use elpath_common::{DriverError, Locator};

/// Capabilities the resolver needs from a browser or app automation session.
///
/// Methods take `&self` so per-member finds of one step can run concurrently.
/// Implementations only ever receive [`Locator::By`] in the find methods; scripts go
/// through [`Driver::execute_script`].
#[async_trait]
pub trait Driver: Send + Sync {
    /// Native element handle.
    type Element: Clone + Send + Sync;

    /// Find an element at session level. Used to acquire the document root.
    async fn find_root(&self, locator: &Locator) -> Result<Self::Element, DriverError>;

    /// Find the first descendant of `scope` matching `locator`.
    async fn find_element(
        &self,
        scope: &Self::Element,
        locator: &Locator,
    ) -> Result<Self::Element, DriverError>;

    /// Find every descendant of `scope` matching `locator`, in document order.
    async fn find_elements(
        &self,
        scope: &Self::Element,
        locator: &Locator,
    ) -> Result<Vec<Self::Element>, DriverError>;

    /// Rendered text of an element.
    async fn get_text(&self, element: &Self::Element) -> Result<String, DriverError>;

    /// Run a script in the page context and return the element(s) it produced.
    async fn execute_script(&self, script: &str) -> Result<Scope<Self::Element>, DriverError>;
}
