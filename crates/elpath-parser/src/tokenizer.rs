//! Path tokenizer.
//!
//! A path is a list of segments separated by `>`. Each segment is matched against
//! the recognised shapes in priority order: `this`, an exact index, an index range,
//! a text filter, and finally a bare alias.

use crate::step::{Cardinality, IndexSpec, Modifier, Position, Step, StepTarget, TextFilter};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

pub const SEPARATOR: char = '>';

lazy_static! {
    static ref EXACT_INDEX: Regex = Regex::new(r"^#(\d+|FIRST|LAST) of (.+)$").unwrap();
    static ref RANGE_INDEX: Regex =
        Regex::new(r"^#(?:(\d+)-(\d+)|>(\d+)|<(\d+)) of (.+)$").unwrap();
    static ref TEXT_FILTER: Regex =
        Regex::new(r"^(all )?(?:#(.+)|@(.+)|/(.+)/) in (.+)$").unwrap();
    static ref ALL_WITH_INDEX: Regex =
        Regex::new(r"^all #(?:\d+|FIRST|LAST|\d+-\d+|>\d+|<\d+) of .+$").unwrap();
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("Invalid regular expression /{pattern}/: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("'all' cannot be combined with an index modifier: '{segment}'")]
    AllWithIndex { segment: String },
}

/// Parse a full path into its steps.
pub fn parse(path: &str) -> Result<Vec<Step>, ParseError> {
    if path.trim().is_empty() {
        return Err(ParseError::MalformedPath {
            path: path.to_string(),
            reason: "path is empty".into(),
        });
    }

    split_segments(path)
        .into_iter()
        .map(|segment| {
            parse_segment(segment.trim()).map_err(|e| match e {
                ParseError::MalformedPath { reason, .. } => ParseError::MalformedPath {
                    path: path.to_string(),
                    reason,
                },
                other => other,
            })
        })
        .collect()
}

/// Split on the separator, except where `>` is the greater-than of `#>n`.
fn split_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut prev = None;
    for (i, c) in path.char_indices() {
        if c == SEPARATOR && prev != Some('#') {
            segments.push(&path[start..i]);
            start = i + c.len_utf8();
        }
        prev = Some(c);
    }
    segments.push(&path[start..]);
    segments
}

/// Parse one trimmed segment.
pub fn parse_segment(segment: &str) -> Result<Step, ParseError> {
    let malformed = |reason: String| ParseError::MalformedPath {
        path: segment.to_string(),
        reason,
    };

    if segment.is_empty() {
        return Err(malformed("empty segment".into()));
    }

    if segment == "this" {
        return Ok(Step::this());
    }

    if let Some(caps) = EXACT_INDEX.captures(segment) {
        let position = match &caps[1] {
            "FIRST" => Position::First,
            "LAST" => Position::Last,
            n => Position::Nth(parse_index(n, segment)?),
        };
        return Ok(Step {
            target: target(&caps[2], segment)?,
            modifier: Some(Modifier::Index(IndexSpec::Exact(position))),
        });
    }

    if let Some(caps) = RANGE_INDEX.captures(segment) {
        let index = if let (Some(start), Some(end)) = (caps.get(1), caps.get(2)) {
            IndexSpec::Between {
                start: parse_index(start.as_str(), segment)?,
                end: parse_index(end.as_str(), segment)?,
            }
        } else if let Some(n) = caps.get(3) {
            IndexSpec::GreaterThan(parse_index(n.as_str(), segment)?)
        } else if let Some(n) = caps.get(4) {
            IndexSpec::LessThan(parse_index(n.as_str(), segment)?)
        } else {
            return Err(malformed(format!("unrecognised index range in '{}'", segment)));
        };
        return Ok(Step {
            target: target(&caps[5], segment)?,
            modifier: Some(Modifier::Index(index)),
        });
    }

    if ALL_WITH_INDEX.is_match(segment) {
        return Err(ParseError::AllWithIndex {
            segment: segment.to_string(),
        });
    }

    if let Some(caps) = TEXT_FILTER.captures(segment) {
        let cardinality = if caps.get(1).is_some() {
            Cardinality::All
        } else {
            Cardinality::First
        };
        let filter = if let Some(text) = caps.get(2) {
            TextFilter::Partial(text.as_str().to_string())
        } else if let Some(text) = caps.get(3) {
            TextFilter::Exact(text.as_str().to_string())
        } else if let Some(pattern) = caps.get(4) {
            let re = Regex::new(pattern.as_str()).map_err(|source| ParseError::InvalidRegex {
                pattern: pattern.as_str().to_string(),
                source,
            })?;
            TextFilter::Pattern(re)
        } else {
            return Err(malformed(format!("unrecognised text filter in '{}'", segment)));
        };
        return Ok(Step {
            target: target(&caps[5], segment)?,
            modifier: Some(Modifier::Text {
                filter,
                cardinality,
            }),
        });
    }

    // Anything still starting with a modifier sigil matched none of the shapes above.
    if segment.starts_with(['#', '@', '/']) {
        return Err(malformed(format!(
            "segment '{}' is not a valid index or text filter",
            segment
        )));
    }

    Ok(Step::alias(segment))
}

fn target(alias: &str, segment: &str) -> Result<StepTarget, ParseError> {
    match alias.trim() {
        "" => Err(ParseError::MalformedPath {
            path: segment.to_string(),
            reason: format!("missing alias in '{}'", segment),
        }),
        "this" => Ok(StepTarget::This),
        alias => Ok(StepTarget::Alias(alias.to_string())),
    }
}

fn parse_index(raw: &str, segment: &str) -> Result<usize, ParseError> {
    raw.parse().map_err(|e| ParseError::MalformedPath {
        path: segment.to_string(),
        reason: format!("invalid index '{}': {}", raw, e),
    })
}
