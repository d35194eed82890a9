//! Path-pattern segments.
//!
//! A pattern component is either a literal (`users`) or a placeholder
//! (`{id}`) covering the whole component.

use std::fmt;

/// One token of a parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches a path component by exact string equality.
    Fixed(String),
    /// Matches any single path component, binding it under the name.
    Variable(String),
}

/// Errors raised while classifying a single pattern component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    #[error("path segment is empty")]
    Empty,

    #[error("variable segment `{0}` has no name")]
    UnnamedVariable(String),

    #[error("malformed variable segment `{0}`: a placeholder must span the whole segment")]
    Malformed(String),
}

impl Segment {
    /// Classify a single, non-empty pattern component.
    pub fn parse(component: &str) -> Result<Segment, SegmentError> {
        if component.is_empty() {
            return Err(SegmentError::Empty);
        }

        match component
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            Some("") => Err(SegmentError::UnnamedVariable(component.to_string())),
            Some(name) if name.contains(['{', '}']) => {
                Err(SegmentError::Malformed(component.to_string()))
            }
            Some(name) => Ok(Segment::Variable(name.to_string())),
            None if component.contains(['{', '}']) => {
                Err(SegmentError::Malformed(component.to_string()))
            }
            None => Ok(Segment::Fixed(component.to_string())),
        }
    }

    /// Literal value or variable name.
    pub fn name(&self) -> &str {
        match self {
            Segment::Fixed(value) => value,
            Segment::Variable(name) => name,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Segment::Variable(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Fixed(value) => f.write_str(value),
            Segment::Variable(name) => write!(f, "{{{}}}", name),
        }
    }
}
