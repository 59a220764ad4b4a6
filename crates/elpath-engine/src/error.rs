use elpath_common::{DriverError, LookupError};
use elpath_parser::ParseError;
use thiserror::Error;

/// Everything that can fail a `resolve` call. There is no partial success: the
/// first failing step aborts the whole path.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    MalformedPath(ParseError),

    #[error(transparent)]
    AliasNotFound(#[from] LookupError),

    #[error("Invalid modifier in '{step}': {reason}")]
    InvalidModifier { step: String, reason: String },

    #[error("Index {index} is out of range for a collection of {len} elements")]
    IndexOutOfRange { index: String, len: usize },

    #[error("No element matches {filter}")]
    NoMatch { filter: String },

    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl From<ParseError> for ResolveError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::AllWithIndex { segment } => ResolveError::InvalidModifier {
                step: segment,
                reason: "'all' cannot be combined with an index modifier".into(),
            },
            other => ResolveError::MalformedPath(other),
        }
    }
}
