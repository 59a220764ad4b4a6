//! Parsed path steps.
//!
//! Indices stay 1-based here, exactly as written in the path. Converting them to
//! positions is the filter's job.

use regex::Regex;
use std::fmt;

/// One `>`-separated unit of a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub target: StepTarget,
    pub modifier: Option<Modifier>,
}

impl Step {
    pub fn alias(alias: impl Into<String>) -> Self {
        Self {
            target: StepTarget::Alias(alias.into()),
            modifier: None,
        }
    }

    pub fn this() -> Self {
        Self {
            target: StepTarget::This,
            modifier: None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn is_this(&self) -> bool {
        matches!(self.target, StepTarget::This)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepTarget {
    /// Re-use the current scope without descending the tree.
    This,
    Alias(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    Index(IndexSpec),
    Text {
        filter: TextFilter,
        cardinality: Cardinality,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSpec {
    Exact(Position),
    /// Both bounds inclusive.
    Between { start: usize, end: usize },
    GreaterThan(usize),
    LessThan(usize),
}

impl IndexSpec {
    /// Whether the filter narrows to a single handle.
    pub fn is_single(&self) -> bool {
        matches!(self, IndexSpec::Exact(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Last,
    Nth(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cardinality {
    /// First match only.
    #[default]
    First,
    All,
}

#[derive(Debug, Clone)]
pub enum TextFilter {
    Partial(String),
    Exact(String),
    Pattern(Regex),
}

impl TextFilter {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            TextFilter::Partial(value) => text.contains(value.as_str()),
            TextFilter::Exact(value) => text == value,
            TextFilter::Pattern(re) => re.is_match(text),
        }
    }
}

impl PartialEq for TextFilter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TextFilter::Partial(a), TextFilter::Partial(b)) => a == b,
            (TextFilter::Exact(a), TextFilter::Exact(b)) => a == b,
            (TextFilter::Pattern(a), TextFilter::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for TextFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextFilter::Partial(value) => write!(f, "#{}", value),
            TextFilter::Exact(value) => write!(f, "@{}", value),
            TextFilter::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl fmt::Display for StepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepTarget::This => f.write_str("this"),
            StepTarget::Alias(alias) => f.write_str(alias),
        }
    }
}

impl fmt::Display for IndexSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSpec::Exact(Position::First) => f.write_str("#FIRST"),
            IndexSpec::Exact(Position::Last) => f.write_str("#LAST"),
            IndexSpec::Exact(Position::Nth(n)) => write!(f, "#{}", n),
            IndexSpec::Between { start, end } => write!(f, "#{}-{}", start, end),
            IndexSpec::GreaterThan(n) => write!(f, "#>{}", n),
            IndexSpec::LessThan(n) => write!(f, "#<{}", n),
        }
    }
}

/// Renders the step back in path syntax.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.modifier {
            None => write!(f, "{}", self.target),
            Some(Modifier::Index(index)) => write!(f, "{} of {}", index, self.target),
            Some(Modifier::Text {
                filter,
                cardinality,
            }) => {
                if *cardinality == Cardinality::All {
                    f.write_str("all ")?;
                }
                write!(f, "{} in {}", filter, self.target)
            }
        }
    }
}
