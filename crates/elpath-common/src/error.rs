/// Errors surfaced by an automation driver.
///
/// These pass through the resolver untouched: a stale handle or a missing node fails
/// the whole resolution with the driver's own error, no retry.
#[derive(thiserror::Error, Debug, Clone)]
pub enum DriverError {
    #[error("No element matches {locator}")]
    NoSuchElement { locator: String },

    #[error("Element is stale (removed from DOM): {0}")]
    StaleElement(String),

    #[error("Locator strategy '{0}' is not supported by this driver")]
    UnsupportedLocator(String),

    #[error("Script execution error: {0}")]
    Script(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other: {0}")]
    Other(String),
}

impl DriverError {
    /// Short machine-readable code, printed by the CLI for driver failures.
    pub fn code(&self) -> &'static str {
        match self {
            DriverError::NoSuchElement { .. } => "NO_SUCH_ELEMENT",
            DriverError::StaleElement(_) => "STALE_ELEMENT",
            DriverError::UnsupportedLocator(_) => "UNSUPPORTED_LOCATOR",
            DriverError::Script(_) => "SCRIPT_ERROR",
            DriverError::Timeout => "TIMEOUT",
            DriverError::Other(_) => "UNKNOWN_ERROR",
        }
    }
}
